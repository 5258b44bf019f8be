//! Product catalog module.
//!
//! Contains the product and category types, the session catalog store,
//! row ingestion and the built-in seed catalog.

mod category;
mod ingest;
mod product;
mod seed;
mod store;

#[cfg(feature = "storage")]
mod fetch;

pub use category::{display_name, Category, CategoryCount, ALL_CATEGORIES};
pub use ingest::{ingest_rows, is_new_arrival, IngestOptions, ProductRow, NEW_ARRIVAL_DAYS};
pub use product::{Product, ONE_SIZE};
pub use seed::{seed_products, seed_store};
pub use store::CatalogStore;

#[cfg(feature = "storage")]
pub use fetch::{fetch_categories, fetch_products, seed_if_empty, CATEGORIES_TABLE, PRODUCTS_TABLE};
