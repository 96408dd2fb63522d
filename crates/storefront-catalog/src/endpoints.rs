//! # Catalog Routes
//!
//! Builds request URLs from a [`ProductQuery`]. Pure; nothing here touches
//! the network.
//!
//! ## Listing Route Precedence
//! ```text
//!   search text set?  ──yes──► /products/search?q=<text>
//!        │ no
//!        ▼
//!   category set and not "all"?  ──yes──► /products/category/<slug>
//!        │ no
//!        ▼
//!   /products
//!
//!   then always:           &limit=<n>&skip=<n>
//!   and when sorting:      &sortBy=<price|rating>&order=<asc|desc>
//! ```

use storefront_core::{ProductId, ProductQuery};
use url::Url;

use crate::error::{CatalogError, CatalogResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    /// Routes relative to `base`. Any path on the base is kept as a prefix.
    pub fn new(base: Url) -> CatalogResult<Self> {
        if base.cannot_be_a_base() {
            return Err(CatalogError::InvalidUrl(format!(
                "{} cannot be used as a base URL",
                base
            )));
        }
        Ok(Endpoints { base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Base URL without a trailing slash, for building category links.
    pub fn base_str(&self) -> &str {
        self.base.as_str().trim_end_matches('/')
    }

    fn route(&self, segments: &[&str]) -> CatalogResult<Url> {
        let mut url = self.base.clone();
        url.set_query(None);
        url.path_segments_mut()
            .map_err(|_| CatalogError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// URL for one page of products.
    pub fn products(&self, query: &ProductQuery) -> CatalogResult<Url> {
        let mut url = if query.search_text().is_some() {
            self.route(&["products", "search"])?
        } else if let Some(category) = query.category_filter() {
            self.route(&["products", "category", category])?
        } else {
            self.route(&["products"])?
        };

        {
            let mut pairs = url.query_pairs_mut();
            if let Some(search) = query.search_text() {
                pairs.append_pair("q", search);
            }
            pairs
                .append_pair("limit", &query.page.limit.to_string())
                .append_pair("skip", &query.page.skip.to_string());
            if let Some(sort) = query.sort {
                pairs
                    .append_pair("sortBy", sort.key.as_str())
                    .append_pair("order", sort.order.as_str());
            }
        }

        Ok(url)
    }

    pub fn categories(&self) -> CatalogResult<Url> {
        self.route(&["products", "categories"])
    }

    pub fn product(&self, id: ProductId) -> CatalogResult<Url> {
        self.route(&["products", &id.to_string()])
    }
}
