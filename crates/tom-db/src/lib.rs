//! Backing-store client for Shop With Tom.
//!
//! The storefront keeps products and categories in a hosted row store with a
//! file bucket for images. This crate hides that behind a small [`Backend`]
//! trait (select/get/insert/update/delete/upload) with two implementations:
//! [`MemoryBackend`] for tests and [`FileBackend`], a JSON document on disk.
//!
//! # Example
//!
//! ```rust,ignore
//! use tom_db::{row, Db, Order};
//!
//! let db = Db::open_file(".tom/shop.json").await?;
//!
//! db.select("products", Some(&Order::desc("created_at"))).await?;
//!
//! let url = db.upload("products", "product-images/beret.png", bytes).await?;
//! ```

mod backend;
mod db;
mod error;
mod file;
mod memory;
mod types;

pub use backend::Backend;
pub use db::Db;
pub use error::DbError;
pub use file::FileBackend;
pub use memory::{MemoryBackend, Tables};
pub use types::{Order, Row, ID_COLUMN};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{row, Backend, Db, DbError, Order, Row};
}
