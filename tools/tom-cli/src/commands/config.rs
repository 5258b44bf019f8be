//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};
use serde_json::Value;
use tom_commerce::contact::WhatsApp;

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, ShopConfig, CONFIG_NAMES};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Get { key } => get_config(&key, ctx),
        ConfigCommand::Init { name, force } => init_config(&name, force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let store = &ctx.config.store;
    ctx.output.line("\n[store]");
    ctx.output.kv("name", &store.name);
    ctx.output.kv("currency", &store.currency);
    ctx.output.kv("whatsapp_phone", &store.whatsapp_phone);
    ctx.output.kv("new_arrival_days", &store.new_arrival_days.to_string());
    ctx.output.kv("featured_count", &store.featured_count.to_string());

    ctx.output.line("\n[data]");
    match &ctx.config.data.path {
        Some(path) => ctx.output.kv("path", &ctx.resolve_path(path).display().to_string()),
        None => ctx.output.kv("path", "(built-in catalog)"),
    }
    ctx.output.kv("seed_if_empty", &ctx.config.data.seed_if_empty.to_string());

    ctx.output.line("\n[cart]");
    ctx.output.kv(
        "state_dir",
        &ctx.resolve_path(&ctx.config.cart.state_dir).display().to_string(),
    );
    if let Some(id) = &ctx.config.cart.session_id {
        ctx.output.kv("session_id", id);
    }
    Ok(())
}

fn get_config(key: &str, ctx: &Context) -> Result<()> {
    let value = get_config_value(&ctx.config, key)?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "key": key, "value": value }));
    } else {
        match value {
            Value::String(s) => println!("{}", s),
            other => println!("{}", other),
        }
    }
    Ok(())
}

fn init_config(name: &str, force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config(name))?;
    ctx.output.success(&format!("Created: {}", config_path.display()));
    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let (errors, warnings) = check_config(&ctx.config);

    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }
    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");
    Ok(())
}

/// Errors and warnings for a config.
pub fn check_config(config: &ShopConfig) -> (Vec<String>, Vec<String>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if config.store.name.trim().is_empty() {
        errors.push("store.name is required".to_string());
    }
    if let Err(e) = config.currency() {
        errors.push(e.to_string());
    }
    if WhatsApp::new(&config.store.whatsapp_phone).phone().is_empty() {
        errors.push("store.whatsapp_phone must contain digits".to_string());
    }
    if config.store.new_arrival_days < 0 {
        errors.push("store.new_arrival_days must not be negative".to_string());
    }
    if config.store.featured_count == 0 {
        warnings.push("store.featured_count is 0; the featured listing is empty".to_string());
    }
    if config.data.path.is_none() {
        warnings.push("data.path is not set; admin commands are unavailable".to_string());
    }
    if config.cart.state_dir.trim().is_empty() {
        errors.push("cart.state_dir is required".to_string());
    }

    (errors, warnings)
}

/// Look up a dot-separated key such as `store.currency`.
pub fn get_config_value(config: &ShopConfig, key: &str) -> Result<Value> {
    let mut value = serde_json::to_value(config)?;
    for part in key.split('.') {
        value = match value {
            Value::Object(mut map) => match map.remove(part) {
                Some(v) => v,
                None if is_optional_key(key) => Value::Null,
                None => bail!("Unknown config key: {}", key),
            },
            _ => bail!("Unknown config key: {}", key),
        };
    }
    Ok(value)
}

fn is_optional_key(key: &str) -> bool {
    matches!(key, "data.path" | "cart.session_id")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_config_value() {
        let config = ShopConfig::default();
        assert_eq!(get_config_value(&config, "store.currency").unwrap(), "USD");
        assert_eq!(get_config_value(&config, "store.featured_count").unwrap(), 4);
        assert_eq!(get_config_value(&config, "data.path").unwrap(), Value::Null);
        assert!(get_config_value(&config, "store.colour").is_err());
        assert!(get_config_value(&config, "store.name.first").is_err());
    }

    #[test]
    fn test_check_config() {
        let (errors, warnings) = check_config(&ShopConfig::default());
        assert!(errors.is_empty());
        assert_eq!(warnings.len(), 1);

        let mut config = ShopConfig::default();
        config.store.whatsapp_phone = "+".into();
        config.store.currency = "XYZ".into();
        let (errors, _) = check_config(&config);
        assert_eq!(errors.len(), 2);
    }
}
