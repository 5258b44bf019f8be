//! WhatsApp product inquiries.

use anyhow::{bail, Result};
use serde_json::json;
use tom_commerce::contact::inquiry_message;
use tom_commerce::ProductId;

use super::ContactArgs;
use crate::context::Context;

/// Run the contact command.
pub async fn run(args: ContactArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.load_catalog().await?;
    let product = catalog.require(&ProductId::new(args.id))?;
    let color = args.variant.color.as_deref();
    let size = args.variant.size.as_deref();

    if let Some(size) = size {
        let sizes = product.size_options();
        if !sizes.iter().any(|s| s.eq_ignore_ascii_case(size.trim())) {
            bail!("{} comes in: {}", product.name, sizes.join(", "));
        }
    }

    let whatsapp = ctx.whatsapp();
    let link = whatsapp.product_inquiry(product, color, size);
    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "phone": whatsapp.phone(),
            "message": inquiry_message(product, color, size),
            "link": link,
        }));
        return Ok(());
    }

    ctx.output.info(&inquiry_message(product, color, size));
    ctx.output.line(&link);
    Ok(())
}
