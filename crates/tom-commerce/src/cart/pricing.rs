//! Cart pricing breakdown.

use crate::cart::LineKey;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Complete pricing breakdown for a cart.
///
/// The shop ships for free, so the grand total is the subtotal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartPricing {
    /// Sum of line totals.
    pub subtotal: Money,
    /// Shipping cost.
    pub shipping_total: Money,
    /// subtotal + shipping.
    pub grand_total: Money,
    /// Total units.
    pub item_count: i64,
    /// Per-line breakdown, in cart order.
    pub lines: Vec<LinePricing>,
}

impl CartPricing {
    pub(crate) fn new(subtotal: Money, item_count: i64, lines: Vec<LinePricing>) -> Self {
        Self {
            subtotal,
            shipping_total: Money::zero(subtotal.currency),
            grand_total: subtotal,
            item_count,
            lines,
        }
    }

    /// Whether shipping is free.
    pub fn has_free_shipping(&self) -> bool {
        self.shipping_total.is_zero()
    }

    /// Shipping as shown on the cart page.
    pub fn shipping_label(&self) -> String {
        if self.has_free_shipping() {
            "Free".to_string()
        } else {
            self.shipping_total.display()
        }
    }
}

/// Pricing for a single cart line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinePricing {
    pub key: LineKey,
    pub unit_price: Money,
    pub quantity: i64,
    /// unit_price × quantity.
    pub total: Money,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    #[test]
    fn test_shipping_is_free() {
        let pricing = CartPricing::new(Money::new(5600, Currency::USD), 2, vec![]);
        assert!(pricing.has_free_shipping());
        assert_eq!(pricing.shipping_label(), "Free");
        assert_eq!(pricing.grand_total, Money::new(5600, Currency::USD));
    }
}
