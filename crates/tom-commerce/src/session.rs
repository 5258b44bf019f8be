//! One shopper's session: the loaded catalog, the current query and the cart.

use crate::cart::{Cart, LineKey};
use crate::catalog::{CatalogStore, Product};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::search::{query, QueryState};

/// Owns all per-session state. Nothing here is shared between sessions.
#[derive(Debug, Clone)]
pub struct ShopSession {
    catalog: CatalogStore,
    query: QueryState,
    cart: Cart,
}

impl ShopSession {
    /// Start with an empty cart in the catalog's currency.
    pub fn new(catalog: CatalogStore) -> Self {
        let cart = Cart::new(catalog.currency());
        Self {
            catalog,
            query: QueryState::default(),
            cart,
        }
    }

    /// Resume with a previously saved cart.
    ///
    /// Lines for products that have since left the catalog are dropped.
    pub fn with_cart(catalog: CatalogStore, mut cart: Cart) -> Result<Self, CommerceError> {
        if cart.currency() != catalog.currency() {
            return Err(CommerceError::CurrencyMismatch {
                expected: catalog.currency().code().to_string(),
                got: cart.currency().code().to_string(),
            });
        }
        cart.retain_available(&catalog);
        Ok(Self {
            catalog,
            query: QueryState::default(),
            cart,
        })
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }

    pub fn into_cart(self) -> Cart {
        self.cart
    }

    pub fn query_state(&self) -> &QueryState {
        &self.query
    }

    pub fn set_query(&mut self, state: QueryState) {
        self.query = state;
    }

    /// Products visible under the current query.
    pub fn visible_products(&self) -> Vec<&Product> {
        query(self.catalog.products(), &self.query)
    }

    /// Add one unit of the catalog product `id`.
    pub fn add_to_cart(
        &mut self,
        id: &ProductId,
        color: Option<&str>,
        size: Option<&str>,
    ) -> Result<LineKey, CommerceError> {
        let product = self.catalog.require(id)?;
        self.cart.add_item(product, color, size)
    }

    /// Swap in a freshly fetched catalog. Existing cart lines keep their
    /// prices; lines whose product disappeared are dropped.
    pub fn refresh_catalog(&mut self, products: Vec<Product>) -> Result<Vec<LineKey>, CommerceError> {
        self.catalog.replace(products)?;
        Ok(self.cart.retain_available(&self.catalog))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::{Currency, Money};
    use crate::search::SortKey;

    fn catalog() -> CatalogStore {
        CatalogStore::new(
            vec![
                Product::new("1", "Denim Bow Slides", Money::new(2800, Currency::USD), "slides").with_new(true),
                Product::new("2", "Designer Buckle Slides", Money::new(3500, Currency::USD), "slides"),
                Product::new("3", "Baby Romper", Money::new(4500, Currency::USD), "baby-crochet").with_new(true),
            ],
            Currency::USD,
        )
        .unwrap()
    }

    #[test]
    fn test_query_and_cart() {
        let mut session = ShopSession::new(catalog());
        session.set_query(QueryState::new().with_sort(SortKey::PriceDesc));
        let ids: Vec<&str> = session.visible_products().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "2", "1"]);

        session.add_to_cart(&ProductId::new("1"), Some("blue"), Some("M")).unwrap();
        session.add_to_cart(&ProductId::new("1"), Some("blue"), Some("M")).unwrap();
        assert_eq!(session.cart().item_count(), 2);
        assert_eq!(session.cart().total(), Money::new(5600, Currency::USD));

        assert!(matches!(
            session.add_to_cart(&ProductId::new("404"), None, None),
            Err(CommerceError::ProductNotFound(_))
        ));
    }

    #[test]
    fn test_refresh_keeps_prices_and_drops_missing() {
        let mut session = ShopSession::new(catalog());
        session.add_to_cart(&ProductId::new("1"), None, None).unwrap();
        session.add_to_cart(&ProductId::new("2"), None, None).unwrap();

        let dropped = session
            .refresh_catalog(vec![Product::new(
                "1",
                "Denim Bow Slides",
                Money::new(3000, Currency::USD),
                "slides",
            )])
            .unwrap();
        assert_eq!(dropped, vec![LineKey::new("2", None, None)]);
        assert_eq!(session.cart().total(), Money::new(2800, Currency::USD));
    }

    #[test]
    fn test_resume_rejects_foreign_cart() {
        let cart = Cart::new(Currency::NGN);
        assert!(ShopSession::with_cart(catalog(), cart).is_err());
    }
}
