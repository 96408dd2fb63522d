//! # storefront-catalog: Catalog Query Layer
//!
//! Read-only access to the remote product catalog, plus the listing
//! pipeline that turns catalog pages into what a page renders.
//!
//! ## Module Organization
//! - [`source`] - `CatalogSource`, the async port
//! - [`http`] - `HttpCatalog`, the reqwest implementation
//! - [`endpoints`] - URL routing for listings, categories and products
//! - [`listing`] - Two-stage pipeline, home page and product detail
//! - [`sequence`] - Request tickets for discarding stale listings
//! - [`config`] - Base URL and page size
//! - [`error`] - `CatalogError` and the uniform failure message
//!
//! ## Failure Model
//! Every failed call resolves to a [`CatalogError`] whose
//! [`user_message`](CatalogError::user_message) is the same generic text.
//! Nothing is retried and nothing touches the cart.

pub mod config;
pub mod endpoints;
pub mod error;
pub mod http;
pub mod listing;
pub mod sequence;
pub mod source;

pub use config::{CatalogConfig, DEFAULT_CATALOG_URL};
pub use error::{CatalogError, CatalogResult, FETCH_FAILED_MESSAGE};
pub use http::HttpCatalog;
pub use listing::{HomeView, Listing, ListingView, ProductDetailView};
pub use sequence::{RequestSequencer, Ticket};
pub use source::CatalogSource;
