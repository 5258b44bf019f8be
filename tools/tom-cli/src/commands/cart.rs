//! Cart commands.

use anyhow::{bail, Result};
use serde_json::json;
use tom_commerce::cart::{Cart, LineKey};
use tom_commerce::ProductId;

use super::{confirm, CartArgs, CartCommand, VariantArgs};
use crate::context::Context;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => show(ctx).await,
        CartCommand::Add { id, variant } => add(&id, &variant, ctx).await,
        CartCommand::Update {
            id,
            quantity,
            variant,
        } => update(&id, quantity, &variant, ctx).await,
        CartCommand::Remove { id, variant } => remove(&id, &variant, ctx).await,
        CartCommand::Clear { yes } => clear(yes, ctx),
    }
}

/// Key of the cart line a command refers to.
pub fn line_key(id: &str, variant: &VariantArgs) -> LineKey {
    LineKey::new(id, variant.color.as_deref(), variant.size.as_deref())
}

async fn show(ctx: &Context) -> Result<()> {
    let saved = ctx.open_session().await?;
    // Lines may have been dropped while loading.
    saved.save()?;
    print_cart(saved.cart(), ctx);
    Ok(())
}

async fn add(id: &str, variant: &VariantArgs, ctx: &Context) -> Result<()> {
    let mut saved = ctx.open_session().await?;
    let product_id = ProductId::new(id);
    if let Some(product) = saved.session.catalog().get(&product_id) {
        if !product.is_in_stock() {
            ctx.output.warn(&format!("{} is out of stock", product.name));
        }
    }
    let key = saved.session.add_to_cart(
        &product_id,
        variant.color.as_deref(),
        variant.size.as_deref(),
    )?;
    saved.save()?;

    let quantity = saved.cart().get(&key).map_or(0, |line| line.quantity);
    if ctx.output.is_json() {
        ctx.output.json(&json!({ "line": key.to_string(), "quantity": quantity }));
        return Ok(());
    }
    ctx.output.success(&format!("Added {} (quantity {})", key, quantity));
    ctx.output.info(&format!(
        "Cart: {} items, {}",
        saved.cart().item_count(),
        saved.cart().total().display()
    ));
    Ok(())
}

async fn update(id: &str, quantity: i64, variant: &VariantArgs, ctx: &Context) -> Result<()> {
    let mut saved = ctx.open_session().await?;
    let key = line_key(id, variant);
    if !saved.session.cart_mut().update_quantity(&key, quantity)? {
        bail!("No cart line {}", key);
    }
    saved.save()?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "line": key.to_string(), "quantity": quantity }));
    } else if quantity == 0 {
        ctx.output.success(&format!("Removed {}", key));
    } else {
        ctx.output.success(&format!("Set {} to {}", key, quantity));
    }
    Ok(())
}

async fn remove(id: &str, variant: &VariantArgs, ctx: &Context) -> Result<()> {
    let mut saved = ctx.open_session().await?;
    let key = line_key(id, variant);
    if !saved.session.cart_mut().remove_item(&key) {
        bail!("No cart line {}", key);
    }
    saved.save()?;
    ctx.output.success(&format!("Removed {}", key));
    Ok(())
}

fn clear(yes: bool, ctx: &Context) -> Result<()> {
    if !confirm("Empty the cart?", yes || ctx.output.is_json())? {
        ctx.output.info("Cancelled");
        return Ok(());
    }
    ctx.discard_cart()?;
    ctx.output.success("Cart cleared");
    Ok(())
}

/// Print the cart with its totals.
pub fn print_cart(cart: &Cart, ctx: &Context) {
    let pricing = cart.calculate_pricing();
    if ctx.output.is_json() {
        ctx.output.json(&json!({ "items": cart.items(), "pricing": pricing }));
        return;
    }

    ctx.output.header(&format!("Cart ({} items)", pricing.item_count));
    if cart.is_empty() {
        ctx.output.info("Your cart is empty. Browse with `tom products`.");
        return;
    }

    let widths = [30, 18, 4, 10, 10];
    ctx.output
        .table_row(&["PRODUCT", "VARIANT", "QTY", "PRICE", "TOTAL"], &widths);
    for line in cart.items() {
        let variant = line.variant_label().unwrap_or_default();
        ctx.output.table_row(
            &[
                &line.product_name,
                &variant,
                &line.quantity.to_string(),
                &line.unit_price.display(),
                &line.line_total().display(),
            ],
            &widths,
        );
    }
    ctx.output.kv("subtotal", &pricing.subtotal.display());
    ctx.output.kv("shipping", &pricing.shipping_label());
    ctx.output.kv("total", &pricing.grand_total.display());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_key_matches_added_line() {
        let variant = VariantArgs {
            color: Some(" Black ".into()),
            size: Some(String::new()),
        };
        let key = line_key("3", &variant);
        assert_eq!(key, LineKey::new("3", Some("Black"), None));
        assert_eq!(key.to_string(), "3 / Black");
    }
}
