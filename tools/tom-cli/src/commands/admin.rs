//! Catalog administration.

use std::path::Path;

use anyhow::{bail, Context as _, Result};
use serde_json::json;
use tom_commerce::admin::{slugify, AdminService, CategoryForm, ProductForm};
use tom_commerce::catalog::{Category, ProductRow};

use super::{
    confirm, AdminArgs, AdminCategoryCommand, AdminCommand, AdminProductCommand, CategoryFields,
    ProductFields,
};
use crate::context::Context;
use crate::output::{format_bytes, truncate};

/// Run the admin command.
pub async fn run(args: AdminArgs, ctx: &Context) -> Result<()> {
    let admin = ctx.admin().await?;
    match args.command {
        AdminCommand::Product { command } => product(command, &admin, ctx).await,
        AdminCommand::Category { command } => category(command, &admin, ctx).await,
        AdminCommand::Upload { file } => upload(&file, &admin, ctx).await,
    }
}

async fn product(command: AdminProductCommand, admin: &AdminService, ctx: &Context) -> Result<()> {
    match command {
        AdminProductCommand::List => {
            let rows = admin.list_products().await?;
            if ctx.output.is_json() {
                ctx.output.json(&rows);
                return Ok(());
            }
            ctx.output.header(&format!("Products ({})", rows.len()));
            let widths = [36, 30, 20, 10, 6];
            ctx.output
                .table_row(&["ID", "NAME", "CATEGORY", "PRICE", "STOCK"], &widths);
            for row in &rows {
                let stock = row.stock_quantity.map(|s| s.to_string()).unwrap_or_default();
                ctx.output.table_row(
                    &[&row.id, &row.name, &row.category, &row.price.to_string(), &stock],
                    &widths,
                );
            }
        }
        AdminProductCommand::Add(fields) => {
            let form = merge_product(ProductForm::default(), fields);
            let row = admin.create_product(&form).await?;
            print_product(&row, "Added", ctx);
        }
        AdminProductCommand::Edit { id, fields } => {
            let current = admin.get_product(&id).await?;
            let form = merge_product(ProductForm::from_row(&current), fields);
            let row = admin.update_product(&id, &form).await?;
            print_product(&row, "Updated", ctx);
        }
        AdminProductCommand::Delete { id, yes } => {
            let row = admin.get_product(&id).await?;
            let prompt = format!("Delete {}?", row.name);
            if !confirm(&prompt, yes || ctx.output.is_json())? {
                ctx.output.info("Cancelled");
                return Ok(());
            }
            admin.delete_product(&id).await?;
            ctx.output.success(&format!("Deleted {}", row.name));
        }
    }
    Ok(())
}

async fn category(command: AdminCategoryCommand, admin: &AdminService, ctx: &Context) -> Result<()> {
    match command {
        AdminCategoryCommand::List => {
            let categories = admin.list_categories().await?;
            if ctx.output.is_json() {
                ctx.output.json(&categories);
                return Ok(());
            }
            ctx.output.header(&format!("Categories ({})", categories.len()));
            let widths = [36, 24, 24, 30];
            ctx.output
                .table_row(&["ID", "NAME", "SLUG", "DESCRIPTION"], &widths);
            for c in &categories {
                let description = c.description.as_deref().unwrap_or_default();
                ctx.output
                    .table_row(&[c.id.as_str(), &c.name, &c.slug, description], &widths);
            }
        }
        AdminCategoryCommand::Add(fields) => {
            let mut form = merge_category(CategoryForm::default(), fields);
            if form.slug.trim().is_empty() {
                form.slug = slugify(&form.name);
            }
            let category = admin.create_category(&form).await?;
            print_category(&category, "Added", ctx);
        }
        AdminCategoryCommand::Edit { id, fields } => {
            let current = admin.get_category(&id).await?;
            let form = merge_category(CategoryForm::from_category(&current), fields);
            let category = admin.update_category(&id, &form).await?;
            print_category(&category, "Updated", ctx);
        }
        AdminCategoryCommand::Delete { id, yes } => {
            let category = admin.get_category(&id).await?;
            let prompt = format!("Delete category {}? Its products keep the slug.", category.name);
            if !confirm(&prompt, yes || ctx.output.is_json())? {
                ctx.output.info("Cancelled");
                return Ok(());
            }
            admin.delete_category(&id).await?;
            ctx.output.success(&format!("Deleted {}", category.name));
        }
    }
    Ok(())
}

async fn upload(file: &str, admin: &AdminService, ctx: &Context) -> Result<()> {
    let path = ctx.cwd.join(file);
    let bytes = std::fs::read(&path)
        .with_context(|| format!("Failed to read image: {}", path.display()))?;
    let Some(name) = Path::new(file).file_name().and_then(|n| n.to_str()) else {
        bail!("Not a file name: {}", file);
    };
    let size = bytes.len() as u64;

    let spinner = ctx.output.spinner("Uploading image...");
    let result = admin.upload_image(name, bytes).await;
    spinner.finish_and_clear();
    let url = result?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "url": url, "bytes": size }));
        return Ok(());
    }
    ctx.output
        .success(&format!("Uploaded {} ({})", name, format_bytes(size)));
    ctx.output.line(&url);
    Ok(())
}

/// Overlay the given fields on a form.
pub fn merge_product(mut form: ProductForm, fields: ProductFields) -> ProductForm {
    let ProductFields {
        name,
        description,
        price,
        category,
        image,
        stock,
    } = fields;
    if let Some(name) = name {
        form.name = name;
    }
    if let Some(description) = description {
        form.description = description;
    }
    if let Some(price) = price {
        form.price = price;
    }
    if let Some(category) = category {
        form.category = category;
    }
    if let Some(image) = image {
        form.image_url = image;
    }
    if let Some(stock) = stock {
        form.stock_quantity = stock;
    }
    form
}

/// Overlay the given fields on a form.
pub fn merge_category(mut form: CategoryForm, fields: CategoryFields) -> CategoryForm {
    if let Some(name) = fields.name {
        form.name = name;
    }
    if let Some(slug) = fields.slug {
        form.slug = slug;
    }
    if let Some(description) = fields.description {
        form.description = description;
    }
    form
}

fn print_product(row: &ProductRow, verb: &str, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(row);
        return;
    }
    ctx.output.success(&format!("{} {}", verb, row.name));
    ctx.output.kv("id", &row.id);
    ctx.output.kv("price", &row.price.to_string());
    ctx.output.kv("category", &row.category);
    if let Some(description) = &row.description {
        ctx.output.kv("description", &truncate(description, 60));
    }
    if let Some(image) = &row.image_url {
        ctx.output.kv("image", image);
    }
}

fn print_category(category: &Category, verb: &str, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(category);
        return;
    }
    ctx.output.success(&format!("{} {}", verb, category.name));
    ctx.output.kv("id", category.id.as_str());
    ctx.output.kv("slug", &category.slug);
}
