//! Product predicates used by the query engine.

use crate::catalog::Product;
use crate::search::query::{CategoryFilter, PriceRange};
use serde::{Deserialize, Serialize};

/// A single narrowing stage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Filter {
    /// Exact, case-sensitive category slug match. `All` keeps everything.
    Category(CategoryFilter),
    /// Case-insensitive substring of name or category. Empty keeps everything.
    Text(String),
    /// Inclusive price bounds.
    PriceRange(PriceRange),
}

impl Filter {
    /// Create a category filter.
    pub fn category(slug: impl AsRef<str>) -> Self {
        Filter::Category(CategoryFilter::parse(slug.as_ref()))
    }

    /// Create a text search filter.
    pub fn text(term: impl Into<String>) -> Self {
        Filter::Text(term.into())
    }

    /// Create a price range filter.
    pub fn price_range(range: PriceRange) -> Self {
        Filter::PriceRange(range)
    }

    /// Whether this filter keeps every product.
    pub fn is_noop(&self) -> bool {
        match self {
            Filter::Category(c) => *c == CategoryFilter::All,
            Filter::Text(term) => term.is_empty(),
            Filter::PriceRange(range) => *range == PriceRange::any(),
        }
    }

    /// Test one product.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Filter::Category(CategoryFilter::All) => true,
            Filter::Category(CategoryFilter::Slug(slug)) => product.category == *slug,
            Filter::Text(term) if term.is_empty() => true,
            Filter::Text(term) => {
                let needle = term.to_lowercase();
                product.name.to_lowercase().contains(&needle)
                    || product.category.to_lowercase().contains(&needle)
            }
            Filter::PriceRange(range) => range.contains(&product.price),
        }
    }

    /// Keep the products this filter matches, preserving order.
    pub fn apply<'a>(&self, products: Vec<&'a Product>) -> Vec<&'a Product> {
        if self.is_noop() {
            return products;
        }
        products.into_iter().filter(|p| self.matches(p)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::{Currency, Money};

    fn beret() -> Product {
        Product::new("7", "Chunky Knit Beret", Money::new(2200, Currency::USD), "crochet-accessories")
    }

    #[test]
    fn test_category_is_exact_and_case_sensitive() {
        let p = beret();
        assert!(Filter::category("crochet-accessories").matches(&p));
        assert!(!Filter::category("Crochet-Accessories").matches(&p));
        assert!(!Filter::category("crochet").matches(&p));
        assert!(Filter::category("all").matches(&p));
    }

    #[test]
    fn test_text_matches_name_or_category() {
        let p = beret();
        assert!(Filter::text("BERET").matches(&p));
        assert!(Filter::text("accessor").matches(&p));
        assert!(Filter::text("").matches(&p));
        assert!(!Filter::text("slides").matches(&p));
    }

    #[test]
    fn test_price_is_inclusive() {
        let p = beret();
        assert!(Filter::price_range(PriceRange::new(2200, 2200)).matches(&p));
        assert!(!Filter::price_range(PriceRange::new(2201, 9999)).matches(&p));
    }
}
