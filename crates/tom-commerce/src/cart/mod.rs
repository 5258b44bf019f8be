//! Shopping cart.
//!
//! Contains the cart, its lines, and the pricing breakdown.

mod cart;
mod pricing;

pub use cart::{Cart, CartLine, LineKey};
pub use pricing::{CartPricing, LinePricing};

#[cfg(feature = "storage")]
mod persist;

#[cfg(feature = "storage")]
pub use persist::{CartStore, CURRENT_SESSION_KEY};
