//! Product type.

use crate::ids::ProductId;
use crate::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Label of the implicit variant of a product without size options.
pub const ONE_SIZE: &str = "One Size";

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Price in the store currency.
    pub price: Money,
    /// Category slug (e.g. "slides").
    pub category: String,
    /// Whether the product is inside the new-arrival window.
    pub is_new: bool,
    /// Full description.
    #[serde(default)]
    pub description: Option<String>,
    /// Image URL.
    #[serde(default)]
    pub image: Option<String>,
    /// Color variant labels, in display order.
    #[serde(default)]
    pub colors: Vec<String>,
    /// Size variant labels, in display order.
    #[serde(default)]
    pub sizes: Vec<String>,
    /// Units in stock, when the backing store tracks it.
    #[serde(default)]
    pub stock_quantity: Option<i64>,
    /// Average review rating (0-5).
    #[serde(default)]
    pub rating: Option<f32>,
    /// Number of reviews.
    #[serde(default)]
    pub reviews: Option<u32>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Create a product with only the required fields set.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: Money,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            category: category.into(),
            is_new: false,
            description: None,
            image: None,
            colors: Vec::new(),
            sizes: Vec::new(),
            stock_quantity: None,
            rating: None,
            reviews: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Mark the product as a new arrival.
    pub fn with_new(mut self, is_new: bool) -> Self {
        self.is_new = is_new;
        self
    }

    /// Set the color options.
    pub fn with_colors<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.colors = colors.into_iter().map(Into::into).collect();
        self
    }

    /// Set the size options.
    pub fn with_sizes<I, S>(mut self, sizes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sizes = sizes.into_iter().map(Into::into).collect();
        self
    }

    /// Sizes a shopper can pick from; a product without sizes has one implicit size.
    pub fn size_options(&self) -> Vec<&str> {
        if self.sizes.is_empty() {
            vec![ONE_SIZE]
        } else {
            self.sizes.iter().map(String::as_str).collect()
        }
    }

    /// Colors a shopper can pick from (empty when the product has no color choice).
    pub fn color_options(&self) -> Vec<&str> {
        self.colors.iter().map(String::as_str).collect()
    }

    /// Whether the product can be ordered. Untracked stock counts as available.
    pub fn is_in_stock(&self) -> bool {
        self.stock_quantity.map_or(true, |q| q > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    #[test]
    fn test_product_creation() {
        let product = Product::new("1", "Denim Bow Slides", Money::new(2800, Currency::USD), "slides");
        assert_eq!(product.id.as_str(), "1");
        assert!(!product.is_new);
        assert!(product.is_in_stock());
    }

    #[test]
    fn test_implicit_size() {
        let product = Product::new("1", "Beret", Money::new(2200, Currency::USD), "crochet-accessories");
        assert_eq!(product.size_options(), vec![ONE_SIZE]);
        assert!(product.color_options().is_empty());

        let sized = product.with_sizes(["S", "M"]).with_colors(["blue"]);
        assert_eq!(sized.size_options(), vec!["S", "M"]);
        assert_eq!(sized.color_options(), vec!["blue"]);
    }

    #[test]
    fn test_out_of_stock() {
        let mut product = Product::new("1", "Beret", Money::new(2200, Currency::USD), "crochet-accessories");
        product.stock_quantity = Some(0);
        assert!(!product.is_in_stock());
    }
}
