//! # HTTP Catalog
//!
//! [`CatalogSource`] over the catalog's JSON HTTP API.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  list_products(query)                                                   │
//! │       │                                                                 │
//! │       ├── query.validate()        ──► InvalidQuery   (nothing sent)    │
//! │       ├── Endpoints::products()   ──► URL                              │
//! │       ├── GET                     ──► Transport on connection failure  │
//! │       ├── status 2xx?             ──► Status otherwise                 │
//! │       ├── decode JSON             ──► Decode on bad body               │
//! │       └── sort the page client-side when a sort was requested          │
//! │                                                                         │
//! │  One attempt per call. No retries, no timeouts.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use storefront_core::query::sort_products;
use storefront_core::types::display_name;
use storefront_core::{Category, Product, ProductId, ProductPage, ProductQuery};
use tracing::{debug, warn};
use url::Url;

use crate::config::CatalogConfig;
use crate::endpoints::Endpoints;
use crate::error::{CatalogError, CatalogResult};
use crate::source::CatalogSource;

/// HTTP client for the remote catalog.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    http: Client,
    endpoints: Endpoints,
}

impl HttpCatalog {
    /// Creates a client from validated configuration.
    pub fn new(config: &CatalogConfig) -> CatalogResult<Self> {
        Self::with_client(config, Client::new())
    }

    /// Creates a client that reuses an existing `reqwest::Client`.
    pub fn with_client(config: &CatalogConfig, http: Client) -> CatalogResult<Self> {
        config.validate()?;
        let endpoints = Endpoints::new(config.parsed_base_url()?)?;
        Ok(HttpCatalog { http, endpoints })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> CatalogResult<T> {
        debug!(url = %url, "Catalog request");

        let response = self.http.get(url.clone()).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "Catalog request failed");
            CatalogError::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "Catalog returned an error status");
            return Err(CatalogError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| {
            warn!(url = %url, error = %e, "Catalog response did not decode");
            CatalogError::from(e)
        })
    }
}

/// A category as returned by the catalog: a bare slug, or an object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CategoryEntry {
    Slug(String),
    Full {
        slug: String,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        url: Option<String>,
    },
}

impl CategoryEntry {
    fn into_category(self, base_url: &str) -> Category {
        match self {
            CategoryEntry::Slug(slug) => Category::from_slug(&slug, base_url),
            CategoryEntry::Full { slug, name, url } => {
                let derived = Category::from_slug(&slug, base_url);
                Category {
                    name: name.unwrap_or_else(|| display_name(&slug)),
                    url: url.unwrap_or(derived.url),
                    slug,
                }
            }
        }
    }
}

#[async_trait]
impl CatalogSource for HttpCatalog {
    async fn list_products(&self, query: &ProductQuery) -> CatalogResult<ProductPage> {
        query.validate()?;
        let url = self.endpoints.products(query)?;

        let mut page: ProductPage = self.get_json(url).await?;
        if let Some(sort) = query.sort {
            sort_products(&mut page.items, sort);
        }

        debug!(
            returned = page.items.len(),
            total = page.total,
            skip = page.skip,
            "Fetched product page"
        );
        Ok(page)
    }

    async fn list_categories(&self) -> CatalogResult<Vec<Category>> {
        let url = self.endpoints.categories()?;
        let entries: Vec<CategoryEntry> = self.get_json(url).await?;

        let base = self.endpoints.base_str();
        let categories: Vec<Category> = entries
            .into_iter()
            .map(|entry| entry.into_category(base))
            .collect();

        debug!(count = categories.len(), "Fetched categories");
        Ok(categories)
    }

    async fn get_product(&self, id: ProductId) -> CatalogResult<Product> {
        let url = self.endpoints.product(id)?;
        let product: Product = self.get_json(url).await?;
        debug!(product_id = %product.id, "Fetched product");
        Ok(product)
    }
}
