//! Category listing.

use anyhow::Result;
use serde::Serialize;
use tom_commerce::catalog::{Category, CategoryCount};

use super::CategoriesArgs;
use crate::context::Context;

#[derive(Serialize)]
struct CategoryListing {
    counts: Vec<CategoryCount>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    stored: Vec<Category>,
}

/// Run the categories command.
pub async fn run(_args: CategoriesArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.load_catalog().await?;
    let stored = match ctx.db().await? {
        Some(db) => tom_commerce::admin::AdminService::new(db).list_categories().await?,
        None => Vec::new(),
    };
    let listing = CategoryListing {
        counts: catalog.category_counts(),
        stored,
    };

    if ctx.output.is_json() {
        ctx.output.json(&listing);
        return Ok(());
    }

    ctx.output.header("Categories");
    let widths = [24, 28, 6];
    ctx.output.table_row(&["SLUG", "NAME", "COUNT"], &widths);
    for c in &listing.counts {
        ctx.output
            .table_row(&[&c.slug, &c.name, &c.count.to_string()], &widths);
    }

    let empty: Vec<&Category> = listing
        .stored
        .iter()
        .filter(|s| !listing.counts.iter().any(|c| c.slug == s.slug))
        .collect();
    if !empty.is_empty() {
        ctx.output.info("Categories without products:");
        for c in empty {
            ctx.output.list_item(&format!("{} ({})", c.name, c.slug));
        }
    }
    Ok(())
}
