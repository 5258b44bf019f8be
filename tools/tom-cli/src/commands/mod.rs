//! CLI command implementations.

pub mod admin;
pub mod cart;
pub mod categories;
pub mod checkout;
pub mod config;
pub mod contact;
pub mod product;
pub mod products;

use clap::{Args, Subcommand, ValueEnum};

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    /// Category slug, or "all".
    #[arg(short = 'C', long, default_value = "all")]
    pub category: String,

    /// Case-insensitive text matched against name and category.
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Lowest price (inclusive, major units).
    #[arg(long)]
    pub min: Option<String>,

    /// Highest price (inclusive, major units).
    #[arg(long)]
    pub max: Option<String>,

    /// Sidebar price preset; overrides --min/--max.
    #[arg(long, value_enum)]
    pub price: Option<PricePreset>,

    /// featured, price-asc, price-desc or newest. Unknown keys keep catalog order.
    #[arg(long, default_value = "featured")]
    pub sort: String,

    /// Show only the first N products.
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Show only the featured products.
    #[arg(long)]
    pub featured: bool,
}

/// Price presets offered by the shop sidebar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PricePreset {
    /// Under 50.
    #[value(name = "under-50")]
    Under50,
    /// 50 to 100.
    #[value(name = "50-100")]
    From50To100,
    /// Over 100.
    #[value(name = "over-100")]
    Over100,
}

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    /// Product id.
    pub id: String,
}

/// Arguments for the categories command.
#[derive(Args)]
pub struct CategoriesArgs {}

/// Variant selection shared by cart and contact commands.
#[derive(Args, Clone, Default)]
pub struct VariantArgs {
    /// Selected color.
    #[arg(long)]
    pub color: Option<String>,

    /// Selected size.
    #[arg(long)]
    pub size: Option<String>,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart.
    Show,
    /// Add one unit of a product.
    Add {
        /// Product id.
        id: String,
        #[command(flatten)]
        variant: VariantArgs,
    },
    /// Set the quantity of a line (0 removes it).
    Update {
        /// Product id.
        id: String,
        /// New quantity.
        #[arg(allow_hyphen_values = true)]
        quantity: i64,
        #[command(flatten)]
        variant: VariantArgs,
    },
    /// Remove a line.
    Remove {
        /// Product id.
        id: String,
        #[command(flatten)]
        variant: VariantArgs,
    },
    /// Empty the cart.
    Clear {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the contact command.
#[derive(Args)]
pub struct ContactArgs {
    /// Product id.
    pub id: String,

    #[command(flatten)]
    pub variant: VariantArgs,
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Empty the cart once the order link is printed.
    #[arg(long)]
    pub clear: bool,
}

/// Arguments for the admin command.
#[derive(Args)]
pub struct AdminArgs {
    #[command(subcommand)]
    pub command: AdminCommand,
}

#[derive(Subcommand)]
pub enum AdminCommand {
    /// Manage products.
    Product {
        #[command(subcommand)]
        command: AdminProductCommand,
    },
    /// Manage categories.
    Category {
        #[command(subcommand)]
        command: AdminCategoryCommand,
    },
    /// Upload a product image and print its URL.
    Upload {
        /// Image file.
        file: String,
    },
}

/// Product form fields. On edit, omitted fields keep their value.
#[derive(Args, Clone, Default)]
pub struct ProductFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// Price in major units (e.g. 28 or 49.99).
    #[arg(long)]
    pub price: Option<String>,
    /// Category slug.
    #[arg(long)]
    pub category: Option<String>,
    /// Image URL (see `tom admin upload`).
    #[arg(long)]
    pub image: Option<String>,
    /// Units in stock.
    #[arg(long)]
    pub stock: Option<String>,
}

#[derive(Subcommand)]
pub enum AdminProductCommand {
    /// List stored products.
    List,
    /// Add a product.
    Add(ProductFields),
    /// Edit a product.
    Edit {
        /// Product id.
        id: String,
        #[command(flatten)]
        fields: ProductFields,
    },
    /// Delete a product.
    Delete {
        /// Product id.
        id: String,
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Category form fields. On edit, omitted fields keep their value.
#[derive(Args, Clone, Default)]
pub struct CategoryFields {
    #[arg(long)]
    pub name: Option<String>,
    /// Lowercase letters, digits and hyphens. Derived from the name when omitted on add.
    #[arg(long)]
    pub slug: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Subcommand)]
pub enum AdminCategoryCommand {
    /// List stored categories.
    List,
    /// Add a category.
    Add(CategoryFields),
    /// Edit a category.
    Edit {
        /// Category id.
        id: String,
        #[command(flatten)]
        fields: CategoryFields,
    },
    /// Delete a category.
    Delete {
        /// Category id.
        id: String,
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Get a config value.
    Get {
        /// Config key (dot-separated).
        key: String,
    },
    /// Initialize a new config file.
    Init {
        /// Shop name.
        #[arg(long, default_value = "Shop With Tom")]
        name: String,
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}

/// Ask before a destructive action unless `yes` was given.
pub fn confirm(prompt: &str, yes: bool) -> anyhow::Result<bool> {
    if yes {
        return Ok(true);
    }
    Ok(dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?)
}
