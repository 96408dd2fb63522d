//! Catalog connection settings.

use serde::{Deserialize, Serialize};
use storefront_core::validation::validate_page_limit;
use storefront_core::DEFAULT_PAGE_SIZE;
use url::Url;

use crate::error::{CatalogError, CatalogResult};

/// Public demo catalog used when nothing else is configured.
pub const DEFAULT_CATALOG_URL: &str = "https://dummyjson.com";

/// Where the catalog lives and how much to ask for at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Catalog root, e.g. `https://dummyjson.com`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Products per listing page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_base_url() -> String {
    DEFAULT_CATALOG_URL.to_string()
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl Default for CatalogConfig {
    fn default() -> Self {
        CatalogConfig {
            base_url: default_base_url(),
            page_size: default_page_size(),
        }
    }
}

impl CatalogConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        CatalogConfig {
            base_url: base_url.into(),
            ..CatalogConfig::default()
        }
    }

    /// Parses and checks the base URL.
    pub fn parsed_base_url(&self) -> CatalogResult<Url> {
        let url = Url::parse(self.base_url.trim())?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(CatalogError::InvalidUrl(format!(
                "unsupported scheme '{}', expected http or https",
                other
            ))),
        }
    }

    /// Validates the configuration.
    ///
    /// ## Rules
    /// - `base_url` parses as an http(s) URL
    /// - `page_size` is between 1 and 100
    pub fn validate(&self) -> CatalogResult<()> {
        self.parsed_base_url()?;
        validate_page_limit(self.page_size)
            .map_err(|e| CatalogError::InvalidConfig(e.to_string()))?;
        Ok(())
    }
}
