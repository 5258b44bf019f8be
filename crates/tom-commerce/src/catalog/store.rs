//! In-memory catalog for one shopping session.

use std::collections::HashMap;

use crate::catalog::category::{display_name, CategoryCount, ALL_CATEGORIES};
use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Currency;

/// The full set of products known to a session, in catalog order.
///
/// Catalog order is whatever the source gave us (newest first when fetched
/// from the backing store) and is what the "featured" sort preserves.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
    currency: Currency,
}

impl CatalogStore {
    /// Build a store, rejecting duplicate ids and prices in a foreign currency.
    pub fn new(products: Vec<Product>, currency: Currency) -> Result<Self, CommerceError> {
        let mut index = HashMap::with_capacity(products.len());
        for (pos, product) in products.iter().enumerate() {
            if product.price.currency != currency {
                return Err(CommerceError::CurrencyMismatch {
                    expected: currency.code().to_string(),
                    got: product.price.currency.code().to_string(),
                });
            }
            if index.insert(product.id.clone(), pos).is_some() {
                return Err(CommerceError::DuplicateProduct(product.id.to_string()));
            }
        }
        tracing::debug!(products = products.len(), currency = %currency, "catalog store built");
        Ok(Self {
            products,
            index,
            currency,
        })
    }

    /// An empty store.
    pub fn empty(currency: Currency) -> Self {
        Self {
            products: Vec::new(),
            index: HashMap::new(),
            currency,
        }
    }

    /// All products in catalog order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// The currency every price in the store is expressed in.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look a product up by id.
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.index.get(id).map(|&pos| &self.products[pos])
    }

    /// Look a product up by id, failing when it is gone.
    pub fn require(&self, id: &ProductId) -> Result<&Product, CommerceError> {
        self.get(id)
            .ok_or_else(|| CommerceError::ProductNotFound(id.to_string()))
    }

    /// The first `n` products, shown on the home page.
    pub fn featured(&self, n: usize) -> &[Product] {
        &self.products[..n.min(self.products.len())]
    }

    /// Up to `n` other products to show next to `id`.
    pub fn related(&self, id: &ProductId, n: usize) -> Vec<&Product> {
        self.products.iter().filter(|p| &p.id != id).take(n).collect()
    }

    /// Product counts per category, `"all"` first, then in first-seen order.
    pub fn category_counts(&self) -> Vec<CategoryCount> {
        let mut counts: Vec<CategoryCount> = vec![CategoryCount {
            slug: ALL_CATEGORIES.to_string(),
            name: display_name(ALL_CATEGORIES),
            count: self.products.len(),
        }];
        let mut positions: HashMap<&str, usize> = HashMap::new();

        for product in &self.products {
            match positions.get(product.category.as_str()) {
                Some(&pos) => counts[pos].count += 1,
                None => {
                    positions.insert(&product.category, counts.len());
                    counts.push(CategoryCount {
                        slug: product.category.clone(),
                        name: display_name(&product.category),
                        count: 1,
                    });
                }
            }
        }

        counts
    }

    /// Replace the contents after a re-fetch, keeping the store currency.
    pub fn replace(&mut self, products: Vec<Product>) -> Result<(), CommerceError> {
        *self = Self::new(products, self.currency)?;
        tracing::info!(products = self.len(), "catalog refreshed");
        Ok(())
    }
}
