//! Type-safe key-value storage for Shop With Tom sessions.
//!
//! Plays the role browser local storage plays for the web storefront: small
//! JSON values (the cart, the current session id) kept between runs. Values
//! go through a [`Cache`] over a [`KvStore`], either in memory or as files in
//! a state directory.
//!
//! # Example
//!
//! ```rust,ignore
//! use tom_cache::{Cache, Session, SessionId};
//!
//! let cache = Cache::open_dir(".tom/state")?;
//!
//! // Store a value
//! cache.set("current-session", &SessionId::generate())?;
//!
//! // Retrieve a value
//! let id: Option<SessionId> = cache.get("current-session")?;
//!
//! // Typed, versioned per-session data
//! let carts = Session::<Cart>::new(cache, "cart");
//! ```

mod error;
mod kv;
mod session;
mod store;

pub use error::CacheError;
pub use kv::Cache;
pub use session::{Session, SessionData, SessionId};
pub use store::{DirStore, KvStore, MemoryStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, KvStore, Session, SessionId};
}
