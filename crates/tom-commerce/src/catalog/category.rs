//! Category records and sidebar counts.

use crate::ids::CategoryId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Slug that selects every product.
pub const ALL_CATEGORIES: &str = "all";

/// A product category as stored by the admin panel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    /// Unique category identifier.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// Slug matched against `Product::category`.
    pub slug: String,
    /// Category description.
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Category {
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            slug: slug.into(),
            description: None,
            created_at: None,
        }
    }
}

/// Number of catalog products in one category, for the shop sidebar.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryCount {
    /// Category slug, or `"all"`.
    pub slug: String,
    /// Display name.
    pub name: String,
    /// Products in the category.
    pub count: usize,
}

/// Turn a slug like "baby-crochet" into a display name like "Baby Crochet".
pub fn display_name(slug: &str) -> String {
    if slug == ALL_CATEGORIES {
        return "All Products".to_string();
    }
    slug.split(['-', '_'])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("baby-crochet"), "Baby Crochet");
        assert_eq!(display_name("slides"), "Slides");
        assert_eq!(display_name("all"), "All Products");
        assert_eq!(display_name("crochet--wear"), "Crochet Wear");
    }
}
