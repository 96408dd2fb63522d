//! The catalog port.

use async_trait::async_trait;
use storefront_core::{Category, Product, ProductId, ProductPage, ProductQuery};

use crate::error::CatalogResult;

/// Read-only access to products and categories.
///
/// Implementations apply the server-side part of a [`ProductQuery`]
/// (category, search, sort, pagination). Price, brand and rating
/// refinement is left to the caller. A failed call is reported once and
/// never retried.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn list_products(&self, query: &ProductQuery) -> CatalogResult<ProductPage>;

    async fn list_categories(&self) -> CatalogResult<Vec<Category>>;

    async fn get_product(&self, id: ProductId) -> CatalogResult<Product>;
}
