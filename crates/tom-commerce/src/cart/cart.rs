//! Cart and line types.

use crate::cart::{CartPricing, LinePricing};
use crate::catalog::{CatalogStore, Product};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a cart line: the product plus its chosen variant.
///
/// Empty color or size strings are the same as no selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineKey {
    pub product_id: ProductId,
    pub color: Option<String>,
    pub size: Option<String>,
}

impl LineKey {
    pub fn new(product_id: impl Into<ProductId>, color: Option<&str>, size: Option<&str>) -> Self {
        Self {
            product_id: product_id.into(),
            color: normalize(color),
            size: normalize(size),
        }
    }
}

impl fmt::Display for LineKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.product_id)?;
        if let Some(color) = &self.color {
            write!(f, " / {color}")?;
        }
        if let Some(size) = &self.size {
            write!(f, " / {size}")?;
        }
        Ok(())
    }
}

fn normalize(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// A line in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    pub product_id: ProductId,
    pub color: Option<String>,
    pub size: Option<String>,
    /// Always positive; a line that reaches zero is removed.
    pub quantity: i64,
    /// Price at the moment the line was first added.
    pub unit_price: Money,
    /// Product name (denormalized for display).
    pub product_name: String,
    #[serde(default)]
    pub image: Option<String>,
}

impl CartLine {
    fn from_product(product: &Product, key: LineKey) -> Self {
        Self {
            product_id: key.product_id,
            color: key.color,
            size: key.size,
            quantity: 1,
            unit_price: product.price,
            product_name: product.name.clone(),
            image: product.image.clone(),
        }
    }

    /// The key this line is stored under.
    pub fn key(&self) -> LineKey {
        LineKey {
            product_id: self.product_id.clone(),
            color: self.color.clone(),
            size: self.size.clone(),
        }
    }

    fn matches(&self, key: &LineKey) -> bool {
        self.product_id == key.product_id && self.color == key.color && self.size == key.size
    }

    /// `unit_price × quantity`, exact in minor units.
    pub fn line_total(&self) -> Money {
        self.unit_price * self.quantity
    }

    /// Variant label for display ("Blue / M"), if any variant was chosen.
    pub fn variant_label(&self) -> Option<String> {
        let parts: Vec<&str> = [self.color.as_deref(), self.size.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        (!parts.is_empty()).then(|| parts.join(" / "))
    }
}

/// The session's shopping cart.
///
/// Unit prices are frozen when a line is first added, so later catalog
/// edits never change what an existing line costs. Lines keep insertion
/// order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    currency: Currency,
    #[serde(default)]
    items: Vec<CartLine>,
}

impl Cart {
    /// An empty cart in the store currency.
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            items: Vec::new(),
        }
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Add one unit of `product` with the given variant.
    ///
    /// An existing line with the same key gains one unit; otherwise a new
    /// line is created at the product's current price. Only fails when the
    /// product is priced in a different currency than the cart.
    pub fn add_item(
        &mut self,
        product: &Product,
        color: Option<&str>,
        size: Option<&str>,
    ) -> Result<LineKey, CommerceError> {
        if product.price.currency != self.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: product.price.currency.code().to_string(),
            });
        }

        let key = LineKey::new(product.id.clone(), color, size);
        match self.items.iter_mut().find(|line| line.matches(&key)) {
            Some(line) => {
                line.quantity = line.quantity.saturating_add(1);
                tracing::debug!(line = %key, quantity = line.quantity, "cart line incremented");
            }
            None => {
                self.items.push(CartLine::from_product(product, key.clone()));
                tracing::debug!(line = %key, price = %product.price, "cart line added");
            }
        }
        Ok(key)
    }

    /// Set a line's quantity.
    ///
    /// Zero removes the line. A negative quantity is rejected and the cart is
    /// left untouched. Returns whether a line with `key` existed.
    pub fn update_quantity(&mut self, key: &LineKey, quantity: i64) -> Result<bool, CommerceError> {
        if quantity < 0 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }
        if quantity == 0 {
            return Ok(self.remove_item(key));
        }

        match self.items.iter_mut().find(|line| line.matches(key)) {
            Some(line) => {
                line.quantity = quantity;
                tracing::debug!(line = %key, quantity, "cart line updated");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove a line. Absent keys are a no-op; returns whether anything was removed.
    pub fn remove_item(&mut self, key: &LineKey) -> bool {
        let before = self.items.len();
        self.items.retain(|line| !line.matches(key));
        let removed = self.items.len() < before;
        if removed {
            tracing::debug!(line = %key, "cart line removed");
        }
        removed
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
        tracing::debug!("cart cleared");
    }

    /// Lines in insertion order.
    pub fn items(&self) -> &[CartLine] {
        &self.items
    }

    /// Look up a line.
    pub fn get(&self, key: &LineKey) -> Option<&CartLine> {
        self.items.iter().find(|line| line.matches(key))
    }

    /// Total units (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |acc, line| acc.saturating_add(line.quantity))
    }

    /// Number of distinct lines.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of `unit_price × quantity`, accumulated exactly in minor units.
    pub fn total(&self) -> Money {
        self.items
            .iter()
            .fold(Money::zero(self.currency), |acc, line| {
                // Lines always carry the cart currency.
                acc.try_add(&line.line_total()).unwrap_or(acc)
            })
    }

    /// Pricing breakdown for the cart page.
    pub fn calculate_pricing(&self) -> CartPricing {
        let lines = self
            .items
            .iter()
            .map(|line| LinePricing {
                key: line.key(),
                unit_price: line.unit_price,
                quantity: line.quantity,
                total: line.line_total(),
            })
            .collect();
        CartPricing::new(self.total(), self.item_count(), lines)
    }

    /// Drop lines whose product no longer exists in `catalog`.
    ///
    /// Prices of remaining lines are left as they were added. Returns the
    /// keys that were dropped.
    pub fn retain_available(&mut self, catalog: &CatalogStore) -> Vec<LineKey> {
        let (kept, dropped): (Vec<CartLine>, Vec<CartLine>) = std::mem::take(&mut self.items)
            .into_iter()
            .partition(|line| catalog.get(&line.product_id).is_some());
        self.items = kept;

        let dropped: Vec<LineKey> = dropped.iter().map(CartLine::key).collect();
        if !dropped.is_empty() {
            tracing::debug!(dropped = dropped.len(), "cart lines no longer in catalog");
        }
        dropped
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new(Currency::default())
    }
}
