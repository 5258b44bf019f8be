//! Catalog querying.
//!
//! A [`QueryState`] (category, search term, price bounds, sort key) is turned
//! into the visible product list by [`query`]. Pure and deterministic.

mod engine;
mod filter;
mod query;

pub use engine::{query, sort};
pub use filter::Filter;
pub use query::{CategoryFilter, PriceRange, QueryState, SortKey};
