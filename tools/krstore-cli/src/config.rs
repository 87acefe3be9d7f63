//! CLI configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// File names searched for, in order, from the working directory upwards.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["krstore.toml", ".krstore.toml", "krstore.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CliConfig {
    /// Local storage configuration.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Catalog source configuration.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Checkout configuration.
    #[serde(default)]
    pub checkout: CheckoutConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CliConfig {
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

    /// Save config to a file.
    pub fn save(&self, path: &str) -> Result<()> {
        let content = if path.ends_with(".json") {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path))
    }
}

/// Where cart, ratings and the signed-in user are kept.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    /// Storage file, relative to the config file's directory.
    #[serde(default = "default_storage_path")]
    pub path: String,
}

fn default_storage_path() -> String {
    ".krstore/storage.json".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

/// Product catalog source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogConfig {
    /// Catalog JSON file (an array of product records).
    #[serde(default = "default_catalog_path")]
    pub path: String,

    /// ISO currency code prices are expressed in.
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_catalog_path() -> String {
    "catalog.json".to_string()
}

fn default_currency() -> String {
    "USD".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
            currency: default_currency(),
        }
    }
}

/// Checkout configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutConfig {
    /// Payment creation endpoint used for QR payments.
    #[serde(default = "default_payment_url")]
    pub payment_url: String,

    /// Payment method used when none is given (`qr` or `cash`).
    #[serde(default = "default_payment_method")]
    pub default_payment: String,
}

fn default_payment_url() -> String {
    "http://localhost:8000/api/payment".to_string()
}

fn default_payment_method() -> String {
    "qr".to_string()
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            payment_url: default_payment_url(),
            default_payment: default_payment_method(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset (e.g. `info`, `krstore_commerce=debug`).
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Generate a default krstore.toml config file.
pub fn generate_default_config() -> String {
    r#"# KR Store configuration

[storage]
# Cart, ratings and the signed-in user
path = ".krstore/storage.json"

[catalog]
path = "catalog.json"
currency = "USD"

[checkout]
payment_url = "http://localhost:8000/api/payment"
default_payment = "qr"

[logging]
# Overridden by RUST_LOG
level = "info"
"#
    .to_string()
}
