//! The query engine: catalog in, visible product list out.

use std::cmp::Ordering;

use crate::catalog::Product;
use crate::search::filter::Filter;
use crate::search::query::{QueryState, SortKey};

/// Derive the visible product list for `state`.
///
/// Stages run in a fixed order (category, search, price, sort) and each one
/// only narrows or reorders the output of the previous stage. Every sort is
/// stable, so ties keep their catalog order. Never fails: an unknown category
/// or an inverted price range simply matches nothing.
pub fn query<'a>(products: &'a [Product], state: &QueryState) -> Vec<&'a Product> {
    let stages = [
        Filter::Category(state.category.clone()),
        Filter::Text(state.search_term.clone()),
        Filter::PriceRange(state.price_range),
    ];

    let mut visible: Vec<&Product> = products.iter().collect();
    for stage in &stages {
        visible = stage.apply(visible);
    }
    sort(&mut visible, state.sort_key);

    tracing::debug!(
        category = state.category.as_str(),
        search = %state.search_term,
        sort = state.sort_key.as_str(),
        matched = visible.len(),
        total = products.len(),
        "catalog query"
    );
    visible
}

/// Stable in-place sort by `key`. `Featured` keeps the current order.
pub fn sort(products: &mut [&Product], key: SortKey) {
    let compare: fn(&&Product, &&Product) -> Ordering = match key {
        SortKey::Featured => return,
        SortKey::PriceAsc => |a, b| a.price.amount_minor.cmp(&b.price.amount_minor),
        SortKey::PriceDesc => |a, b| b.price.amount_minor.cmp(&a.price.amount_minor),
        SortKey::Newest => |a, b| b.is_new.cmp(&a.is_new),
    };
    products.sort_by(compare);
}
