//! Conversion of backing-store rows into canonical products.
//!
//! Rows store prices as decimal major units (what the admin form writes);
//! this is the only place they become minor units.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};

/// Products created within this many days are flagged as new.
pub const NEW_ARRIVAL_DAYS: i64 = 7;

/// A row of the `products` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductRow {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    pub category: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub stock_quantity: Option<i64>,
    #[serde(default)]
    pub colors: Option<Vec<String>>,
    #[serde(default)]
    pub sizes: Option<Vec<String>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Settings applied while turning rows into products.
#[derive(Debug, Clone, Copy)]
pub struct IngestOptions {
    /// Store currency that row prices are expressed in.
    pub currency: Currency,
    /// Reference time for the new-arrival flag.
    pub now: DateTime<Utc>,
    /// Length of the new-arrival window in days.
    pub new_arrival_days: i64,
    /// Image shown for products without one.
    pub placeholder_image: Option<&'static str>,
}

impl IngestOptions {
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            now: Utc::now(),
            new_arrival_days: NEW_ARRIVAL_DAYS,
            placeholder_image: Some("/placeholder.svg"),
        }
    }

    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    pub fn with_new_arrival_days(mut self, days: i64) -> Self {
        self.new_arrival_days = days;
        self
    }
}

/// Whether a product created at `created_at` is still a new arrival at `now`.
///
/// Whole elapsed days are compared, so a product created 7 days and 23 hours
/// ago is still new with a 7-day window.
pub fn is_new_arrival(created_at: DateTime<Utc>, now: DateTime<Utc>, window_days: i64) -> bool {
    (now - created_at) < Duration::days(window_days + 1)
}

impl ProductRow {
    /// Convert into a canonical product.
    pub fn into_product(self, opts: &IngestOptions) -> Result<Product, CommerceError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(CommerceError::ValidationError(format!(
                "product {} has an empty name",
                self.id
            )));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(CommerceError::ValidationError(format!(
                "product {} has invalid price {}",
                self.id, self.price
            )));
        }

        let is_new = self
            .created_at
            .map(|created| is_new_arrival(created, opts.now, opts.new_arrival_days))
            .unwrap_or(false);

        let image = non_empty(self.image_url).or_else(|| opts.placeholder_image.map(str::to_string));

        Ok(Product {
            id: ProductId::new(self.id),
            name: name.to_string(),
            price: Money::from_major(self.price, opts.currency),
            category: self.category,
            is_new,
            description: non_empty(self.description),
            image,
            colors: self.colors.unwrap_or_default(),
            sizes: self.sizes.unwrap_or_default(),
            stock_quantity: self.stock_quantity,
            rating: None,
            reviews: None,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Convert rows in order, skipping (and logging) the ones that are unusable.
pub fn ingest_rows(rows: Vec<ProductRow>, opts: &IngestOptions) -> Vec<Product> {
    let total = rows.len();
    let products: Vec<Product> = rows
        .into_iter()
        .filter_map(|row| {
            let id = row.id.clone();
            match row.into_product(opts) {
                Ok(product) => Some(product),
                Err(e) => {
                    tracing::warn!(product_id = %id, error = %e, "skipping catalog row");
                    None
                }
            }
        })
        .collect();
    tracing::debug!(rows = total, kept = products.len(), "ingested product rows");
    products
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn row(id: &str, price: f64, created_at: Option<DateTime<Utc>>) -> ProductRow {
        ProductRow {
            id: id.to_string(),
            name: "Orange Crochet Beret".to_string(),
            description: Some(String::new()),
            price,
            category: "crochet-accessories".to_string(),
            image_url: None,
            stock_quantity: Some(3),
            colors: None,
            sizes: None,
            created_at,
            updated_at: None,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_price_converted_to_minor_units() {
        let opts = IngestOptions::new(Currency::USD).at(now());
        let product = row("a", 22.5, None).into_product(&opts).unwrap();
        assert_eq!(product.price, Money::new(2250, Currency::USD));
        assert_eq!(product.image.as_deref(), Some("/placeholder.svg"));
        assert_eq!(product.description, None);
        assert!(!product.is_new);
    }

    #[test]
    fn test_new_arrival_window() {
        let opts = IngestOptions::new(Currency::USD).at(now());
        let fresh = row("a", 1.0, Some(now() - Duration::days(7) - Duration::hours(23)));
        let stale = row("b", 1.0, Some(now() - Duration::days(8)));
        assert!(fresh.into_product(&opts).unwrap().is_new);
        assert!(!stale.into_product(&opts).unwrap().is_new);
    }

    #[test]
    fn test_invalid_rows_skipped() {
        let opts = IngestOptions::new(Currency::USD).at(now());
        let mut unnamed = row("c", 5.0, None);
        unnamed.name = "  ".to_string();
        let rows = vec![row("a", 10.0, None), row("b", -1.0, None), unnamed];

        let products = ingest_rows(rows, &opts);
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id.as_str(), "a");
    }

    #[test]
    fn test_row_deserializes_from_backend_json() {
        let json = serde_json::json!({
            "id": "7f1c",
            "name": "Tan Crossover Slides",
            "price": 29,
            "category": "slides",
            "image_url": "https://cdn.example/tan.png",
            "stock_quantity": null,
            "created_at": "2026-03-09T08:00:00Z"
        });
        let row: ProductRow = serde_json::from_value(json).unwrap();
        let product = row.into_product(&IngestOptions::new(Currency::USD).at(now())).unwrap();
        assert_eq!(product.price.amount_minor, 2900);
        assert!(product.is_new);
        assert_eq!(product.size_options(), vec!["One Size"]);
    }
}
