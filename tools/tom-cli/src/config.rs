//! CLI configuration.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use tom_commerce::catalog::NEW_ARRIVAL_DAYS;
use tom_commerce::contact::DEFAULT_PHONE;
use tom_commerce::Currency;

/// Config file names searched for, in order.
pub const CONFIG_NAMES: [&str; 3] = ["tom.toml", ".tom.toml", "tom.json"];

/// Shop configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ShopConfig {
    /// Storefront settings.
    #[serde(default)]
    pub store: StoreConfig,

    /// Backing store settings.
    #[serde(default)]
    pub data: DataConfig,

    /// Cart persistence settings.
    #[serde(default)]
    pub cart: CartConfig,
}

impl ShopConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// The store currency.
    pub fn currency(&self) -> Result<Currency> {
        Currency::from_code(&self.store.currency)
            .ok_or_else(|| anyhow!("Unknown currency in config: {}", self.store.currency))
    }
}

/// Storefront settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreConfig {
    /// Shop name, used in order messages.
    #[serde(default = "default_name")]
    pub name: String,

    /// ISO currency code every price is expressed in.
    #[serde(default = "default_currency")]
    pub currency: String,

    /// WhatsApp number receiving inquiries and orders.
    #[serde(default = "default_phone")]
    pub whatsapp_phone: String,

    /// Products created within this many days are new arrivals.
    #[serde(default = "default_new_arrival_days")]
    pub new_arrival_days: i64,

    /// Number of featured products on the home listing.
    #[serde(default = "default_featured_count")]
    pub featured_count: usize,
}

fn default_name() -> String {
    "Shop With Tom".to_string()
}

fn default_currency() -> String {
    Currency::USD.code().to_string()
}

fn default_phone() -> String {
    DEFAULT_PHONE.to_string()
}

fn default_new_arrival_days() -> i64 {
    NEW_ARRIVAL_DAYS
}

fn default_featured_count() -> usize {
    4
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            currency: default_currency(),
            whatsapp_phone: default_phone(),
            new_arrival_days: default_new_arrival_days(),
            featured_count: default_featured_count(),
        }
    }
}

/// Backing store settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataConfig {
    /// JSON document holding products and categories. Without it the
    /// built-in catalog is used and admin commands are unavailable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Write the built-in catalog into an empty store.
    #[serde(default = "default_true")]
    pub seed_if_empty: bool,
}

fn default_true() -> bool {
    true
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: None,
            seed_if_empty: true,
        }
    }
}

/// Cart persistence settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartConfig {
    /// Directory holding saved carts.
    #[serde(default = "default_state_dir")]
    pub state_dir: String,

    /// Fixed session id; a random one is generated and remembered otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

fn default_state_dir() -> String {
    ".tom/state".to_string()
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            state_dir: default_state_dir(),
            session_id: None,
        }
    }
}

/// Generate a default tom.toml config file.
pub fn generate_default_config(name: &str) -> String {
    format!(
        r#"# Shop With Tom configuration

[store]
name = "{name}"
# Every price is in this currency (USD, NGN, EUR, GBP, CAD, JPY).
currency = "USD"
whatsapp_phone = "{phone}"
new_arrival_days = {days}
featured_count = 4

[data]
# Products and categories; uploaded images go to an uploads/ folder next to it.
path = ".tom/shop.json"
seed_if_empty = true

[cart]
state_dir = ".tom/state"
# session_id = "my-session"
"#,
        name = name,
        phone = DEFAULT_PHONE,
        days = NEW_ARRIVAL_DAYS,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_config_parses() {
        let config: ShopConfig = toml::from_str(&generate_default_config("Shop With Tom")).unwrap();
        assert_eq!(config.store.name, "Shop With Tom");
        assert_eq!(config.currency().unwrap(), Currency::USD);
        assert_eq!(config.data.path.as_deref(), Some(".tom/shop.json"));
        assert_eq!(config.cart.session_id, None);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: ShopConfig = toml::from_str("[store]\ncurrency = \"NGN\"\n").unwrap();
        assert_eq!(config.currency().unwrap(), Currency::NGN);
        assert_eq!(config.store.new_arrival_days, 7);
        assert_eq!(config.data, DataConfig::default());
        assert_eq!(config.cart.state_dir, ".tom/state");
    }

    #[test]
    fn test_json_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tom.json");
        std::fs::write(&path, r#"{"store": {"whatsapp_phone": "2348000000000"}}"#).unwrap();
        let config = ShopConfig::load(path.to_str().unwrap()).unwrap();
        assert_eq!(config.store.whatsapp_phone, "2348000000000");
        assert_eq!(config.store.currency, "USD");
    }

    #[test]
    fn test_unknown_currency() {
        let mut config = ShopConfig::default();
        config.store.currency = "XYZ".into();
        assert!(config.currency().is_err());
    }
}
