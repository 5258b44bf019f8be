//! Loading the catalog from the backing store.

use chrono::Duration;
use tom_db::{Db, Order};

use crate::catalog::{ingest_rows, seed_products, CatalogStore, Category, IngestOptions, ProductRow};
use crate::error::CommerceError;

/// Table holding product rows.
pub const PRODUCTS_TABLE: &str = "products";
/// Table holding category rows.
pub const CATEGORIES_TABLE: &str = "categories";

/// Fetch every product, newest first, and build the session store.
///
/// A single request; failures are returned to the caller, never retried.
pub async fn fetch_products(db: &Db, opts: &IngestOptions) -> Result<CatalogStore, CommerceError> {
    let rows: Vec<ProductRow> = db
        .select_as(PRODUCTS_TABLE, Some(&Order::desc("created_at")))
        .await?;
    let products = ingest_rows(rows, opts);
    tracing::info!(products = products.len(), "catalog fetched");
    CatalogStore::new(products, opts.currency)
}

/// Fetch every category, oldest first.
pub async fn fetch_categories(db: &Db) -> Result<Vec<Category>, CommerceError> {
    Ok(db
        .select_as(CATEGORIES_TABLE, Some(&Order::asc("created_at")))
        .await?)
}

/// Write the built-in catalog into an empty products table.
///
/// Creation times are chosen so that the seed's new arrivals stay inside the
/// new-arrival window and keep their relative order. Returns how many rows
/// were written; a table that already has rows is left alone.
pub async fn seed_if_empty(db: &Db, opts: &IngestOptions) -> Result<usize, CommerceError> {
    if !db.select(PRODUCTS_TABLE, None).await?.is_empty() {
        return Ok(0);
    }

    let products = seed_products(opts.currency)?;
    let count = products.len();
    for (i, product) in products.into_iter().enumerate() {
        let age = if product.is_new {
            Duration::minutes(i as i64)
        } else {
            Duration::days(opts.new_arrival_days + 30) + Duration::minutes(i as i64)
        };
        let row = ProductRow {
            id: product.id.into_inner(),
            name: product.name,
            description: product.description,
            price: product.price.to_major(),
            category: product.category,
            image_url: product.image,
            stock_quantity: product.stock_quantity,
            colors: (!product.colors.is_empty()).then_some(product.colors),
            sizes: (!product.sizes.is_empty()).then_some(product.sizes),
            created_at: Some(opts.now - age),
            updated_at: None,
        };
        db.insert_as::<_, serde_json::Value>(PRODUCTS_TABLE, &row).await?;
    }
    tracing::info!(products = count, "seeded empty catalog");
    Ok(count)
}
