//! WhatsApp contact-to-purchase links.
//!
//! The shop has no payment flow: buying means opening a WhatsApp chat with a
//! prefilled message. Phone numbers and delivery are not validated here.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::cart::Cart;
use crate::catalog::Product;
use crate::error::CommerceError;

/// Characters a browser's `encodeURIComponent` leaves alone.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Placeholder number used until a real one is configured.
pub const DEFAULT_PHONE: &str = "1234567890";

/// Link builder for one shop phone number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhatsApp {
    phone: String,
}

impl WhatsApp {
    /// Keeps only the digits of `phone` ("+1 (234) 567-890" becomes "1234567890").
    pub fn new(phone: impl AsRef<str>) -> Self {
        Self {
            phone: phone.as_ref().chars().filter(char::is_ascii_digit).collect(),
        }
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// `https://wa.me/<phone>?text=<encoded message>`.
    pub fn link(&self, message: &str) -> String {
        format!(
            "https://wa.me/{}?text={}",
            self.phone,
            utf8_percent_encode(message, COMPONENT)
        )
    }

    /// Link asking about one product and its selected variant.
    pub fn product_inquiry(&self, product: &Product, color: Option<&str>, size: Option<&str>) -> String {
        self.link(&inquiry_message(product, color, size))
    }

    /// Link placing the whole cart as an order.
    pub fn cart_order(&self, cart: &Cart, shop_name: &str) -> Result<String, CommerceError> {
        Ok(self.link(&order_message(cart, shop_name)?))
    }
}

impl Default for WhatsApp {
    fn default() -> Self {
        Self::new(DEFAULT_PHONE)
    }
}

/// "Hi! I'm interested in the {name} for {price}. Color: {c}. Size: {s}."
///
/// The color and size clauses only appear when selected.
pub fn inquiry_message(product: &Product, color: Option<&str>, size: Option<&str>) -> String {
    let mut message = format!(
        "Hi! I'm interested in the {} for {}.",
        product.name,
        product.price.display_short()
    );
    if let Some(color) = color.filter(|c| !c.trim().is_empty()) {
        message.push_str(&format!(" Color: {color}."));
    }
    if let Some(size) = size.filter(|s| !s.trim().is_empty()) {
        message.push_str(&format!(" Size: {size}."));
    }
    message
}

/// Itemized order message for the cart. An empty cart has nothing to order.
pub fn order_message(cart: &Cart, shop_name: &str) -> Result<String, CommerceError> {
    if cart.is_empty() {
        return Err(CommerceError::EmptyCart);
    }

    let mut message = format!("Hi {shop_name}! I'd like to order:\n");
    for line in cart.items() {
        let variant = line
            .variant_label()
            .map(|v| format!(" ({v})"))
            .unwrap_or_default();
        message.push_str(&format!(
            "- {} x{}{} = {}\n",
            line.product_name,
            line.quantity,
            variant,
            line.line_total().display()
        ));
    }
    message.push_str(&format!(
        "Total: {} ({} items)",
        cart.total().display(),
        cart.item_count()
    ));
    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::{Currency, Money};

    fn slides() -> Product {
        Product::new("3", "Denim Bow Slides", Money::new(2800, Currency::USD), "slides")
    }

    #[test]
    fn test_inquiry_message() {
        assert_eq!(
            inquiry_message(&slides(), None, None),
            "Hi! I'm interested in the Denim Bow Slides for $28."
        );
        assert_eq!(
            inquiry_message(&slides(), Some("Blue"), Some("M")),
            "Hi! I'm interested in the Denim Bow Slides for $28. Color: Blue. Size: M."
        );
        assert_eq!(
            inquiry_message(&slides(), Some(""), Some("L")),
            "Hi! I'm interested in the Denim Bow Slides for $28. Size: L."
        );
    }

    #[test]
    fn test_link_encodes_message() {
        let wa = WhatsApp::new("+1 (234) 567-890");
        assert_eq!(wa.phone(), "1234567890");
        assert_eq!(
            wa.link("Hi! Size: M & L"),
            "https://wa.me/1234567890?text=Hi!%20Size%3A%20M%20%26%20L"
        );
    }

    #[test]
    fn test_order_message() {
        let mut cart = Cart::new(Currency::USD);
        cart.add_item(&slides(), Some("Blue"), Some("M")).unwrap();
        cart.add_item(&slides(), Some("Blue"), Some("M")).unwrap();

        let message = order_message(&cart, "Shop With Tom").unwrap();
        assert_eq!(
            message,
            "Hi Shop With Tom! I'd like to order:\n- Denim Bow Slides x2 (Blue / M) = $56.00\nTotal: $56.00 (2 items)"
        );
        assert!(WhatsApp::default()
            .cart_order(&cart, "Shop With Tom")
            .unwrap()
            .starts_with("https://wa.me/1234567890?text=Hi%20Shop%20With%20Tom!"));
    }

    #[test]
    fn test_empty_cart_cannot_order() {
        let cart = Cart::new(Currency::USD);
        assert!(matches!(order_message(&cart, "Shop"), Err(CommerceError::EmptyCart)));
    }
}
