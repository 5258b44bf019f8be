//! Saving carts between runs.

use tom_cache::{Cache, Session, SessionId};

use crate::cart::Cart;
use crate::error::CommerceError;
use crate::money::Currency;

/// Key under which the active session id is remembered.
pub const CURRENT_SESSION_KEY: &str = "current-session";

/// Carts stored per session in a [`Cache`].
#[derive(Debug, Clone)]
pub struct CartStore {
    cache: Cache,
    carts: Session<Cart>,
}

impl CartStore {
    pub fn new(cache: Cache) -> Self {
        Self {
            carts: Session::new(cache.clone(), "cart"),
            cache,
        }
    }

    /// The remembered session id, or a fresh one (which is then remembered).
    pub fn current_session(&self) -> Result<SessionId, CommerceError> {
        if let Some(id) = self.cache.get::<SessionId>(CURRENT_SESSION_KEY)? {
            return Ok(id);
        }
        let id = SessionId::generate();
        self.cache.set(CURRENT_SESSION_KEY, &id)?;
        tracing::debug!(session = %id, "started session");
        Ok(id)
    }

    /// The saved cart, or an empty one in `currency`.
    pub fn load(&self, id: &SessionId, currency: Currency) -> Result<Cart, CommerceError> {
        Ok(self.carts.get(id)?.unwrap_or_else(|| Cart::new(currency)))
    }

    pub fn save(&self, id: &SessionId, cart: &Cart) -> Result<(), CommerceError> {
        self.carts.set(id, cart)?;
        Ok(())
    }

    /// Forget the saved cart.
    pub fn discard(&self, id: &SessionId) -> Result<(), CommerceError> {
        self.carts.delete(id)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;
    use crate::money::Money;

    #[test]
    fn test_cart_survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let store = CartStore::new(Cache::open_dir(dir.path()).unwrap());
        let id = store.current_session().unwrap();
        assert_eq!(store.current_session().unwrap(), id);

        let mut cart = store.load(&id, Currency::USD).unwrap();
        assert!(cart.is_empty());
        let slides = Product::new("3", "Denim Bow Slides", Money::new(2800, Currency::USD), "slides");
        cart.add_item(&slides, Some("Blue"), Some("M")).unwrap();
        cart.add_item(&slides, Some("Blue"), Some("M")).unwrap();
        store.save(&id, &cart).unwrap();

        let reopened = CartStore::new(Cache::open_dir(dir.path()).unwrap());
        let restored = reopened.load(&reopened.current_session().unwrap(), Currency::USD).unwrap();
        assert_eq!(restored, cart);
        assert_eq!(restored.total(), Money::new(5600, Currency::USD));

        reopened.discard(&id).unwrap();
        assert!(reopened.load(&id, Currency::USD).unwrap().is_empty());
    }
}
