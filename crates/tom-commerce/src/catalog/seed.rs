//! Built-in catalog used when no backing store is configured or it is empty.

use serde::Deserialize;

use crate::catalog::{CatalogStore, Product};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};

const CATALOG_JSON: &str = include_str!("../../data/catalog.json");

#[derive(Debug, Deserialize)]
struct SeedProduct {
    id: u64,
    name: String,
    price: f64,
    category: String,
    is_new: bool,
    #[serde(default)]
    rating: Option<f32>,
    #[serde(default)]
    reviews: Option<u32>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    colors: Vec<String>,
    #[serde(default)]
    sizes: Vec<String>,
}

impl SeedProduct {
    fn into_product(self, currency: Currency) -> Product {
        Product {
            id: ProductId::from(self.id),
            name: self.name,
            price: Money::from_major(self.price, currency),
            category: self.category,
            is_new: self.is_new,
            description: self.description,
            image: self.image,
            colors: self.colors,
            sizes: self.sizes,
            stock_quantity: None,
            rating: self.rating,
            reviews: self.reviews,
            created_at: None,
            updated_at: None,
        }
    }
}

/// The built-in products, prices read as major units of `currency`.
pub fn seed_products(currency: Currency) -> Result<Vec<Product>, CommerceError> {
    let seed: Vec<SeedProduct> = serde_json::from_str(CATALOG_JSON)?;
    Ok(seed.into_iter().map(|p| p.into_product(currency)).collect())
}

/// A catalog store holding the built-in products.
pub fn seed_store(currency: Currency) -> Result<CatalogStore, CommerceError> {
    CatalogStore::new(seed_products(currency)?, currency)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_catalog_loads() {
        let store = seed_store(Currency::USD).unwrap();
        assert!(!store.is_empty());

        let slides = store.get(&ProductId::new("3")).unwrap();
        assert_eq!(slides.name, "Denim Bow Slides");
        assert_eq!(slides.price, Money::new(2800, Currency::USD));
        assert!(slides.is_new);
    }

    #[test]
    fn test_seed_categories() {
        let store = seed_store(Currency::USD).unwrap();
        let slugs: Vec<String> = store.category_counts().into_iter().map(|c| c.slug).collect();
        assert!(slugs.contains(&"slides".to_string()));
        assert!(slugs.contains(&"crochet-accessories".to_string()));
    }
}
