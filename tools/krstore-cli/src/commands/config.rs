//! Configuration management commands.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Result};
use krstore_commerce::checkout::PaymentMethod;
use krstore_commerce::Currency;

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig, CONFIG_FILE_NAMES};
use crate::context::Context;

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Get { key } => get_config(&key, ctx),
        ConfigCommand::Set { key, value } => set_config(&key, &value, ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match ctx.config_path {
        Some(ref path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults, no config file found)"),
    }

    ctx.output.info("");
    ctx.output.info("[storage]");
    ctx.output.kv("path", &ctx.config.storage.path);

    ctx.output.info("");
    ctx.output.info("[catalog]");
    ctx.output.kv("path", &ctx.config.catalog.path);
    ctx.output.kv("currency", &ctx.config.catalog.currency);

    ctx.output.info("");
    ctx.output.info("[checkout]");
    ctx.output.kv("payment_url", &ctx.config.checkout.payment_url);
    ctx.output.kv("default_payment", &ctx.config.checkout.default_payment);

    ctx.output.info("");
    ctx.output.info("[logging]");
    ctx.output.kv("level", &ctx.config.logging.level);

    Ok(())
}

fn get_config(key: &str, ctx: &Context) -> Result<()> {
    let value = get_config_value(&ctx.config, key)?;

    if ctx.output.is_json() {
        ctx.output
            .json(&serde_json::json!({ "key": key, "value": value }));
    } else {
        println!("{}", value);
    }

    Ok(())
}

fn set_config(key: &str, value: &str, ctx: &Context) -> Result<()> {
    let Some(ref config_path) = ctx.config_path else {
        bail!("No config file found. Run `krstore config init` to create one.");
    };
    let config_path = config_path.to_string_lossy().to_string();

    let mut config = CliConfig::load(&config_path)?;
    set_config_value(&mut config, key, value)?;
    config.save(&config_path)?;

    ctx.output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path: PathBuf = ctx.cwd.join(CONFIG_FILE_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let (errors, warnings) = check_config(&ctx.config);
    let catalog_path = ctx.resolve_path(&ctx.config.catalog.path);
    let mut warnings = warnings;
    if !catalog_path.exists() {
        warnings.push(format!("catalog file {} does not exist", catalog_path.display()));
    }

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

/// Static checks on a configuration: `(errors, warnings)`.
fn check_config(config: &CliConfig) -> (Vec<String>, Vec<String>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if config.storage.path.trim().is_empty() {
        errors.push("storage.path is required".to_string());
    }

    if Currency::from_code(&config.catalog.currency).is_none() {
        errors.push(format!(
            "catalog.currency '{}' is not supported",
            config.catalog.currency
        ));
    }

    let url = &config.checkout.payment_url;
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        errors.push(format!("checkout.payment_url '{}' must be an http(s) URL", url));
    } else if url.starts_with("http://") && !url.contains("localhost") && !url.contains("127.0.0.1") {
        warnings.push("checkout.payment_url uses plain http".to_string());
    }

    if PaymentMethod::parse(&config.checkout.default_payment).is_none() {
        errors.push(format!(
            "checkout.default_payment '{}' must be qr or cash",
            config.checkout.default_payment
        ));
    }

    if tracing_subscriber::EnvFilter::try_new(&config.logging.level).is_err() {
        errors.push(format!("logging.level '{}' is not a valid filter", config.logging.level));
    }

    (errors, warnings)
}

fn get_config_value(config: &CliConfig, key: &str) -> Result<String> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["storage", "path"] => Ok(config.storage.path.clone()),
        ["catalog", "path"] => Ok(config.catalog.path.clone()),
        ["catalog", "currency"] => Ok(config.catalog.currency.clone()),
        ["checkout", "payment_url"] => Ok(config.checkout.payment_url.clone()),
        ["checkout", "default_payment"] => Ok(config.checkout.default_payment.clone()),
        ["logging", "level"] => Ok(config.logging.level.clone()),
        _ => bail!("Unknown config key: {}", key),
    }
}

fn set_config_value(config: &mut CliConfig, key: &str, value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["storage", "path"] => config.storage.path = value.to_string(),
        ["catalog", "path"] => config.catalog.path = value.to_string(),
        ["catalog", "currency"] => {
            let Some(currency) = Currency::from_code(value) else {
                bail!("Unsupported currency: {}", value);
            };
            config.catalog.currency = currency.code().to_string();
        }
        ["checkout", "payment_url"] => config.checkout.payment_url = value.to_string(),
        ["checkout", "default_payment"] => {
            if PaymentMethod::parse(value).is_none() {
                bail!("Unknown payment method: {} (use qr or cash)", value);
            }
            config.checkout.default_payment = value.to_string();
        }
        ["logging", "level"] => config.logging.level = value.to_string(),
        _ => bail!("Unknown config key: {}", key),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set_roundtrip() {
        let mut config = CliConfig::default();
        set_config_value(&mut config, "catalog.currency", "khr").unwrap();
        assert_eq!(get_config_value(&config, "catalog.currency").unwrap(), "KHR");

        set_config_value(&mut config, "checkout.default_payment", "cash").unwrap();
        assert_eq!(config.checkout.default_payment, "cash");
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = CliConfig::default();
        assert!(set_config_value(&mut config, "catalog.currency", "XYZ").is_err());
        assert!(set_config_value(&mut config, "checkout.default_payment", "card").is_err());
        assert!(set_config_value(&mut config, "nope.key", "1").is_err());
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_check_config() {
        let (errors, warnings) = check_config(&CliConfig::default());
        assert!(errors.is_empty());
        assert!(warnings.is_empty());

        let mut config = CliConfig::default();
        config.checkout.payment_url = "ftp://pay".to_string();
        config.catalog.currency = "XYZ".to_string();
        let (errors, _) = check_config(&config);
        assert_eq!(errors.len(), 2);
    }
}
