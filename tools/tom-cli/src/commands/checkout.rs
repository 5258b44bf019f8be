//! Order hand-off over WhatsApp.

use anyhow::Result;
use serde_json::json;
use tom_commerce::contact::order_message;

use super::cart::print_cart;
use super::CheckoutArgs;
use crate::context::Context;

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let mut saved = ctx.open_session().await?;
    let shop = &ctx.config.store.name;
    let link = ctx.whatsapp().cart_order(saved.cart(), shop)?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "message": order_message(saved.cart(), shop)?,
            "link": link,
            "total": saved.cart().total(),
        }));
    } else {
        print_cart(saved.cart(), ctx);
        ctx.output.info("Send this order on WhatsApp:");
        ctx.output.line(&link);
    }

    if args.clear {
        saved.session.cart_mut().clear();
        saved.save()?;
        ctx.output.success("Cart cleared");
    } else {
        saved.save()?;
    }
    Ok(())
}
