//! Catalog browsing.

use anyhow::{bail, Result};
use tom_commerce::catalog::{display_name, Product};
use tom_commerce::search::{query, PriceRange, QueryState, SortKey};
use tom_commerce::{Currency, Money};

use super::{PricePreset, ProductsArgs};
use crate::context::Context;
use crate::output::new_badge;

/// Run the products command.
pub async fn run(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.load_catalog().await?;
    let currency = catalog.currency();

    let visible: Vec<&Product> = if args.featured {
        catalog.featured(ctx.config.store.featured_count).iter().collect()
    } else {
        let state = query_state(&args, currency)?;
        query(catalog.products(), &state)
    };
    let shown: Vec<&Product> = match args.limit {
        Some(limit) => visible.iter().copied().take(limit).collect(),
        None => visible.clone(),
    };

    if ctx.output.is_json() {
        ctx.output.json(&shown);
        return Ok(());
    }

    let title = if args.featured {
        "Featured".to_string()
    } else {
        display_name(&args.category)
    };
    ctx.output.header(&format!("{} ({} of {} products)", title, visible.len(), catalog.len()));
    if shown.is_empty() {
        ctx.output.info("No products match these filters.");
        return Ok(());
    }
    print_table(ctx, &shown);
    Ok(())
}

/// Build the query from the command line flags.
pub fn query_state(args: &ProductsArgs, currency: Currency) -> Result<QueryState> {
    let range = match args.price {
        Some(preset) => preset_range(preset, currency),
        None => {
            let min = parse_bound(args.min.as_deref(), currency)?.map_or(i64::MIN, |m| m.amount_minor);
            let max = parse_bound(args.max.as_deref(), currency)?.map_or(i64::MAX, |m| m.amount_minor);
            PriceRange::new(min, max)
        }
    };

    Ok(QueryState::new()
        .with_category(&args.category)
        .with_search(args.search.clone())
        .with_price_range(range)
        .with_sort(SortKey::parse(&args.sort)))
}

fn preset_range(preset: PricePreset, currency: Currency) -> PriceRange {
    match preset {
        PricePreset::Under50 => PriceRange::under(50, currency),
        PricePreset::From50To100 => PriceRange::major(50, 100, currency),
        PricePreset::Over100 => PriceRange::over(100, currency),
    }
}

fn parse_bound(value: Option<&str>, currency: Currency) -> Result<Option<Money>> {
    match value {
        None => Ok(None),
        Some(text) => match Money::parse_major(text, currency) {
            Some(money) => Ok(Some(money)),
            None => bail!("Not a price: {}", text),
        },
    }
}

/// Print products as a table.
pub fn print_table(ctx: &Context, products: &[&Product]) {
    let widths = [6, 34, 20, 10, 4];
    ctx.output
        .table_row(&["ID", "NAME", "CATEGORY", "PRICE", ""], &widths);
    for p in products {
        let price = p.price.display();
        let badge = new_badge(p.is_new);
        ctx.output.table_row(
            &[p.id.as_str(), &p.name, &p.category, &price, &badge],
            &widths,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> ProductsArgs {
        ProductsArgs {
            category: "slides".into(),
            search: String::new(),
            min: None,
            max: None,
            price: None,
            sort: "price-asc".into(),
            limit: None,
            featured: false,
        }
    }

    #[test]
    fn test_query_state_from_flags() {
        let state = query_state(&ProductsArgs { min: Some("0".into()), max: Some("100".into()), ..args() }, Currency::USD).unwrap();
        assert_eq!(state.price_range, PriceRange::new(0, 10_000));
        assert_eq!(state.sort_key, SortKey::PriceAsc);
        assert_eq!(state.category.as_str(), "slides");
    }

    #[test]
    fn test_preset_overrides_bounds() {
        let state = query_state(
            &ProductsArgs { min: Some("1".into()), price: Some(PricePreset::Over100), ..args() },
            Currency::USD,
        )
        .unwrap();
        assert_eq!(state.price_range, PriceRange::over(100, Currency::USD));
    }

    #[test]
    fn test_unknown_sort_and_bad_price() {
        let state = query_state(&ProductsArgs { sort: "popular".into(), ..args() }, Currency::USD).unwrap();
        assert_eq!(state.sort_key, SortKey::Featured);
        assert!(query_state(&ProductsArgs { max: Some("lots".into()), ..args() }, Currency::USD).is_err());
    }
}
