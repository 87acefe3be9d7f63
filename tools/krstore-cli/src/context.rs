//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context as _, Result};
use krstore_auth::AuthSession;
use krstore_cache::Cache;
use krstore_commerce::cart::{CartManager, KvCartStore};
use krstore_commerce::catalog::{parse_catalog, Product, RatingBook};
use krstore_commerce::checkout::UrlPaymentGateway;
use krstore_commerce::Currency;

use crate::config::{CliConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Config file the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            let path = absolutize(&cwd, Path::new(path));
            let config = CliConfig::load(&path.to_string_lossy())?;
            (config, Some(path))
        } else {
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd) {
                Some((path, config)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            }
        };

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(PathBuf, CliConfig)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    match CliConfig::load(config_path.to_str()?) {
                        Ok(config) => return Some((config_path, config)),
                        Err(e) => tracing::warn!(
                            path = %config_path.display(),
                            error = %e,
                            "skipping unreadable config"
                        ),
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Directory relative paths in the config are resolved against.
    pub fn base_dir(&self) -> PathBuf {
        self.config_path
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.cwd.clone())
    }

    /// Resolve a configured path.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        absolutize(&self.base_dir(), Path::new(path))
    }

    /// Path of the local storage file.
    pub fn storage_path(&self) -> PathBuf {
        self.resolve_path(&self.config.storage.path)
    }

    /// Open the local store shared by cart, ratings and session.
    pub fn open_store(&self) -> Result<Cache> {
        let path = self.storage_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        self.output.debug(&format!("Using storage {}", path.display()));
        Cache::open_file(&path).with_context(|| format!("Failed to open storage {}", path.display()))
    }

    /// Cart manager over `store`.
    pub fn cart(&self, store: &Cache) -> Result<CartManager<KvCartStore>> {
        Ok(CartManager::open_with_currency(
            KvCartStore::new(store.clone()),
            self.currency()?,
        ))
    }

    /// Ratings over `store`.
    pub fn ratings(&self, store: &Cache) -> RatingBook {
        RatingBook::new(store.clone())
    }

    /// Signed-in user state over `store`.
    pub fn session(&self, store: &Cache) -> AuthSession {
        AuthSession::new(store.clone())
    }

    /// Configured catalog currency.
    pub fn currency(&self) -> Result<Currency> {
        let code = &self.config.catalog.currency;
        Currency::from_code(code).ok_or_else(|| anyhow!("Unsupported currency: {}", code))
    }

    /// Load the product catalog. A missing catalog file is an empty catalog.
    pub fn load_catalog(&self) -> Result<Vec<Product>> {
        let path = self.resolve_path(&self.config.catalog.path);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no catalog file");
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read catalog {}", path.display()))?;
        let products = parse_catalog(&content, self.currency()?)
            .with_context(|| format!("Failed to parse catalog {}", path.display()))?;
        self.output
            .debug(&format!("Loaded {} products from {}", products.len(), path.display()));
        Ok(products)
    }

    /// Payment gateway for QR payments.
    pub fn payment_gateway(&self) -> UrlPaymentGateway {
        UrlPaymentGateway::new(self.config.checkout.payment_url.clone())
    }
}

fn absolutize(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context_in(dir: &Path) -> Context {
        Context {
            config: CliConfig::default(),
            config_path: Some(dir.join("krstore.toml")),
            output: Output::new(false, true),
            cwd: dir.join("sub"),
        }
    }

    #[test]
    fn test_paths_resolve_against_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context_in(dir.path());
        assert_eq!(ctx.storage_path(), dir.path().join(".krstore/storage.json"));
        assert_eq!(ctx.resolve_path("/abs/catalog.json"), PathBuf::from("/abs/catalog.json"));
    }

    #[test]
    fn test_find_config_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join("krstore.toml"), "[catalog]\ncurrency = \"EUR\"\n").unwrap();

        let (path, config) = Context::find_config(&nested).unwrap();
        assert_eq!(path, dir.path().join("krstore.toml"));
        assert_eq!(config.catalog.currency, "EUR");
    }

    #[test]
    fn test_missing_catalog_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context_in(dir.path());
        assert!(ctx.load_catalog().unwrap().is_empty());
    }

    #[test]
    fn test_store_is_created_and_shared() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context_in(dir.path());
        let store = ctx.open_store().unwrap();

        let user = krstore_auth::sign_in("a@b.c", "pw").unwrap();
        ctx.session(&store).login(&user).unwrap();

        let reopened = ctx.open_store().unwrap();
        assert_eq!(ctx.session(&reopened).current().unwrap(), Some(user));
    }
}
