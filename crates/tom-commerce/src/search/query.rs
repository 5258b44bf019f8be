//! Query state: what the shop page is currently asking for.

use crate::catalog::ALL_CATEGORIES;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Sort keys offered by the shop page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum SortKey {
    /// Catalog order, unchanged.
    #[default]
    Featured,
    /// Sort by price, low to high.
    PriceAsc,
    /// Sort by price, high to low.
    PriceDesc,
    /// New arrivals first.
    Newest,
}

impl SortKey {
    /// Parse a sort key. Anything unrecognized falls back to `Featured`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "price-asc" | "price_asc" => SortKey::PriceAsc,
            "price-desc" | "price_desc" => SortKey::PriceDesc,
            "newest" => SortKey::Newest,
            _ => SortKey::Featured,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Featured => "featured",
            SortKey::PriceAsc => "price-asc",
            SortKey::PriceDesc => "price-desc",
            SortKey::Newest => "newest",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortKey::Featured => "Featured",
            SortKey::PriceAsc => "Price: Low to High",
            SortKey::PriceDesc => "Price: High to Low",
            SortKey::Newest => "Newest",
        }
    }
}

impl From<String> for SortKey {
    fn from(s: String) -> Self {
        SortKey::parse(&s)
    }
}

impl From<SortKey> for String {
    fn from(key: SortKey) -> Self {
        key.as_str().to_string()
    }
}

/// Inclusive price bounds in minor units.
///
/// `min > max` is allowed and matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: i64,
    pub max: i64,
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::any()
    }
}

impl PriceRange {
    /// Inclusive range of minor-unit amounts.
    pub fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    /// Every price.
    pub fn any() -> Self {
        Self::new(i64::MIN, i64::MAX)
    }

    /// Inclusive range in major units of `currency` (e.g. 0..=100 dollars).
    pub fn major(min: i64, max: i64, currency: Currency) -> Self {
        let unit = currency.minor_per_major();
        Self::new(min.saturating_mul(unit), max.saturating_mul(unit))
    }

    /// Sidebar preset: strictly under `limit` major units.
    pub fn under(limit: i64, currency: Currency) -> Self {
        Self::new(0, limit.saturating_mul(currency.minor_per_major()).saturating_sub(1))
    }

    /// Sidebar preset: strictly over `limit` major units.
    pub fn over(limit: i64, currency: Currency) -> Self {
        Self::new(limit.saturating_mul(currency.minor_per_major()).saturating_add(1), i64::MAX)
    }

    /// Whether `price` is inside the bounds.
    pub fn contains(&self, price: &Money) -> bool {
        self.min <= price.amount_minor && price.amount_minor <= self.max
    }

    /// Whether the range can match anything at all.
    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }
}

/// Category selection: everything, or one exact slug.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Slug(String),
}

impl CategoryFilter {
    /// `"all"` (or empty) selects everything; anything else is an exact slug.
    pub fn parse(s: &str) -> Self {
        if s.is_empty() || s == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Slug(s.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CategoryFilter::All => ALL_CATEGORIES,
            CategoryFilter::Slug(s) => s,
        }
    }
}

impl From<String> for CategoryFilter {
    fn from(s: String) -> Self {
        CategoryFilter::parse(&s)
    }
}

impl From<CategoryFilter> for String {
    fn from(c: CategoryFilter) -> Self {
        c.as_str().to_string()
    }
}

/// Everything the query engine needs to derive the visible product list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct QueryState {
    /// Selected category.
    #[serde(default)]
    pub category: CategoryFilter,
    /// Free-text search; empty matches everything.
    #[serde(default)]
    pub search_term: String,
    /// Inclusive price bounds.
    #[serde(default)]
    pub price_range: PriceRange,
    /// Ordering of the result.
    #[serde(default)]
    pub sort_key: SortKey,
}

impl QueryState {
    /// All products, catalog order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the category (`"all"` clears it).
    pub fn with_category(mut self, category: impl AsRef<str>) -> Self {
        self.category = CategoryFilter::parse(category.as_ref());
        self
    }

    /// Set the search term.
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    /// Set the price bounds.
    pub fn with_price_range(mut self, range: PriceRange) -> Self {
        self.price_range = range;
        self
    }

    /// Set the sort key.
    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort_key = sort;
        self
    }
}
