//! # Demo Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     STOREFRONT_CATALOG_URL=http://localhost:3000                       │
//! │     STOREFRONT_PAGE_SIZE=24                                            │
//! │     STOREFRONT_DATA_DIR=/tmp/storefront                                │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/storefront-demo/storefront.toml (Linux)                  │
//! │     ~/Library/Application Support/com.storefront.demo/storefront.toml  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     https://dummyjson.com, 12 per page, platform data dir              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [catalog]
//! base_url = "https://dummyjson.com"
//! page_size = 12
//!
//! [storage]
//! data_dir = "/var/lib/storefront"
//!
//! [pricing]
//! tax_rate_bps = 800
//! free_shipping_threshold = 100.0
//! shipping_fee = 10.0
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use storefront_catalog::CatalogConfig;
use storefront_core::PricingPolicy;
use thiserror::Error;
use tracing::{debug, info, warn};

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read or write config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

// =============================================================================
// Sections
// =============================================================================

/// Where the persisted cart lives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory for `cart.json`. Defaults to the platform data directory.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

impl StorageConfig {
    /// The configured directory, else the platform data directory.
    pub fn resolve_data_dir(&self) -> Option<PathBuf> {
        self.data_dir.clone().or_else(|| {
            directories::ProjectDirs::from("com", "storefront", "demo")
                .map(|dirs| dirs.data_dir().to_path_buf())
        })
    }
}

// =============================================================================
// App Config
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub pricing: PricingPolicy,
}

impl AppConfig {
    /// Loads configuration: defaults, then the TOML file, then environment
    /// overrides, then validation.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        Self::load_with(config_path, |key| std::env::var(key).ok())
    }

    /// [`AppConfig::load`] with the environment lookup supplied by the caller.
    pub fn load_with(
        config_path: Option<PathBuf>,
        var: impl Fn(&str) -> Option<String>,
    ) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(var);
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns the defaults if loading fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Writes the configuration as TOML.
    pub fn save(&self, config_path: Option<PathBuf>) -> ConfigResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ConfigError::Invalid("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Config saved");
        Ok(())
    }

    pub fn validate(&self) -> ConfigResult<()> {
        self.catalog
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        if self.pricing.tax_rate_bps > 10_000 {
            return Err(ConfigError::Invalid(format!(
                "tax_rate_bps must be at most 10000, got {}",
                self.pricing.tax_rate_bps
            )));
        }
        if self.pricing.shipping_fee.is_negative()
            || self.pricing.free_shipping_threshold.is_negative()
        {
            return Err(ConfigError::Invalid(
                "shipping amounts must not be negative".into(),
            ));
        }

        Ok(())
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var("STOREFRONT_CATALOG_URL") {
            debug!(url = %url, "Overriding catalog URL from environment");
            self.catalog.base_url = url;
        }

        if let Some(size) = var("STOREFRONT_PAGE_SIZE") {
            match size.parse::<u32>() {
                Ok(n) => self.catalog.page_size = n,
                Err(_) => warn!(value = %size, "Ignoring non-numeric STOREFRONT_PAGE_SIZE"),
            }
        }

        if let Some(dir) = var("STOREFRONT_DATA_DIR") {
            debug!(dir = %dir, "Overriding data directory from environment");
            self.storage.data_dir = Some(PathBuf::from(dir));
        }
    }

    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "storefront", "demo")
            .map(|dirs| dirs.config_dir().join("storefront.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use storefront_core::Money;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.catalog.base_url, "https://dummyjson.com");
        assert_eq!(config.catalog.page_size, 12);
        assert_eq!(config.pricing.tax_rate_bps, 800);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_file_with_partial_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storefront.toml");
        std::fs::write(
            &path,
            r#"
[catalog]
page_size = 24

[pricing]
free_shipping_threshold = 50.0
"#,
        )
        .unwrap();

        let config = AppConfig::load_with(Some(path.clone()), |_| None).unwrap();
        assert_eq!(config.catalog.page_size, 24);
        assert_eq!(config.catalog.base_url, "https://dummyjson.com");
        assert_eq!(config.pricing.free_shipping_threshold, Money::from_cents(5000));
        assert_eq!(config.pricing.shipping_fee, Money::from_cents(1000));
        assert_eq!(config.storage.data_dir, None);

        // Environment beats the file.
        let config = AppConfig::load_with(Some(path), |key| {
            (key == "STOREFRONT_PAGE_SIZE").then(|| "30".to_string())
        })
        .unwrap();
        assert_eq!(config.catalog.page_size, 30);
        assert_eq!(config.pricing.free_shipping_threshold, Money::from_cents(5000));
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_with(Some(dir.path().join("absent.toml")), |_| None).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storefront.toml");
        std::fs::write(&path, "[catalog]\nbase_url = \"ftp://example.com\"\n").unwrap();
        assert!(matches!(
            AppConfig::load_with(Some(path.clone()), |_| None),
            Err(ConfigError::Invalid(_))
        ));

        // A bad override is caught after the file parses cleanly.
        std::fs::write(&path, "[catalog]\npage_size = 24\n").unwrap();
        let result = AppConfig::load_with(Some(path), |key| {
            (key == "STOREFRONT_CATALOG_URL").then(|| "not a url".to_string())
        });
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("STOREFRONT_CATALOG_URL", "http://localhost:4000"),
            ("STOREFRONT_PAGE_SIZE", "30"),
            ("STOREFRONT_DATA_DIR", "/tmp/storefront-test"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.catalog.base_url, "http://localhost:4000");
        assert_eq!(config.catalog.page_size, 30);
        assert_eq!(
            config.storage.resolve_data_dir(),
            Some(PathBuf::from("/tmp/storefront-test"))
        );
    }

    #[test]
    fn test_bad_page_size_env_is_ignored() {
        let mut config = AppConfig::default();
        config.apply_overrides(|key| (key == "STOREFRONT_PAGE_SIZE").then(|| "lots".to_string()));
        assert_eq!(config.catalog.page_size, 12);
    }

    #[test]
    fn test_validation() {
        let mut config = AppConfig::default();
        config.catalog.base_url = "ftp://example.com".into();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = AppConfig::default();
        config.pricing.tax_rate_bps = 20_000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storefront.toml");

        let mut config = AppConfig::default();
        config.catalog.page_size = 20;
        config.storage.data_dir = Some(dir.path().join("data"));
        config.save(Some(path.clone())).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("[catalog]"));
        assert!(text.contains("[pricing]"));

        let loaded: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(loaded, config);
    }
}
