//! Storefront domain logic for Shop With Tom.
//!
//! This crate provides the pieces of the shop that are more than markup:
//!
//! - **Catalog**: products, categories, row ingestion and the session store
//! - **Search**: the query engine (category, search, price, sort)
//! - **Cart**: cart lines, totals and the pricing breakdown
//! - **Contact**: WhatsApp order and inquiry links
//! - **Admin**: form validation and catalog writes (`storage` feature)
//!
//! # Example
//!
//! ```rust,ignore
//! use tom_commerce::prelude::*;
//!
//! let catalog = seed_store(Currency::USD)?;
//! let mut session = ShopSession::new(catalog);
//!
//! // Slides under $50, cheapest first
//! session.set_query(
//!     QueryState::new()
//!         .with_category("slides")
//!         .with_price_range(PriceRange::under(50, Currency::USD))
//!         .with_sort(SortKey::PriceAsc),
//! );
//! let visible = session.visible_products();
//!
//! // Add to cart and build the order link
//! session.add_to_cart(&visible[0].id, Some("Blue"), Some("M"))?;
//! let link = WhatsApp::new("+1 234 567 890").cart_order(session.cart(), "Shop With Tom")?;
//! println!("Total: {}", session.cart().total());
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod contact;
pub mod search;
pub mod session;

#[cfg(feature = "storage")]
pub mod admin;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{seed_store, CatalogStore, Category, CategoryCount, Product};

    // Search
    pub use crate::search::{query, PriceRange, QueryState, SortKey};

    // Cart
    pub use crate::cart::{Cart, CartLine, CartPricing, LineKey};

    // Contact and session
    pub use crate::contact::WhatsApp;
    pub use crate::session::ShopSession;
}
