//! Product details.

use anyhow::Result;
use serde::Serialize;
use tom_commerce::catalog::Product;
use tom_commerce::ProductId;

use super::ProductArgs;
use crate::context::Context;
use crate::output::new_badge;

/// Products listed under "You may also like".
const RELATED_COUNT: usize = 3;

#[derive(Serialize)]
struct ProductDetails<'a> {
    #[serde(flatten)]
    product: &'a Product,
    size_options: Vec<&'a str>,
    in_stock: bool,
    inquiry_link: String,
    related: Vec<&'a Product>,
}

/// Run the product command.
pub async fn run(args: ProductArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.load_catalog().await?;
    let id = ProductId::new(args.id);
    let product = catalog.require(&id)?;

    let details = ProductDetails {
        product,
        size_options: product.size_options(),
        in_stock: product.is_in_stock(),
        inquiry_link: ctx.whatsapp().product_inquiry(product, None, None),
        related: catalog.related(&id, RELATED_COUNT),
    };

    if ctx.output.is_json() {
        ctx.output.json(&details);
        return Ok(());
    }

    ctx.output.header(&format!("{} {}", product.name, new_badge(product.is_new)));
    ctx.output.kv("id", product.id.as_str());
    ctx.output.kv("price", &product.price.display());
    ctx.output.kv("category", &product.category);
    if let Some(description) = &product.description {
        ctx.output.kv("description", description);
    }
    if let (Some(rating), Some(reviews)) = (product.rating, product.reviews) {
        ctx.output.kv("rating", &format!("{:.1} ({} reviews)", rating, reviews));
    }
    let colors = product.color_options();
    if !colors.is_empty() {
        ctx.output.kv("colors", &colors.join(", "));
    }
    ctx.output.kv("sizes", &details.size_options.join(", "));
    if let Some(stock) = product.stock_quantity {
        ctx.output.kv("stock", &stock.to_string());
    }
    if !details.in_stock {
        ctx.output.warn("Out of stock");
    }

    ctx.output.info("Ask about this product on WhatsApp:");
    ctx.output.line(&details.inquiry_link);

    if !details.related.is_empty() {
        ctx.output.header("You may also like");
        for p in &details.related {
            ctx.output
                .list_item(&format!("{}  {}  {}", p.id, p.name, p.price.display()));
        }
    }
    Ok(())
}
