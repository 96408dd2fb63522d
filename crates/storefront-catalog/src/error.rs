//! # Catalog Error Types
//!
//! Every way a catalog call can fail.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Catalog Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │     Request     │  │        Fetch            │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  InvalidQuery   │  │  Transport              │ │
//! │  │  InvalidUrl     │  │                 │  │  Status                 │ │
//! │  │                 │  │                 │  │  Decode                 │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  Whatever the variant, the shopper sees one message:                   │
//! │  "Failed to fetch data. Please try again."                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No variant is retried. The caller decides whether to ask again.

use storefront_core::CoreError;
use thiserror::Error;

/// Result type alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// The uniform failure text for the presentation layer.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch data. Please try again.";

#[derive(Debug, Error)]
pub enum CatalogError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Invalid catalog configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(String),

    // =========================================================================
    // Request Errors
    // =========================================================================
    /// Listing parameters failed validation before any request was sent.
    #[error("Invalid catalog query: {0}")]
    InvalidQuery(#[from] CoreError),

    // =========================================================================
    // Fetch Errors
    // =========================================================================
    /// Connection, TLS or protocol failure.
    #[error("Catalog request failed: {0}")]
    Transport(String),

    /// The catalog answered with a non-success status.
    #[error("Catalog returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    /// The body was not the expected JSON.
    #[error("Catalog response could not be decoded: {0}")]
    Decode(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            CatalogError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            CatalogError::Status {
                status: status.as_u16(),
                url: err.url().map(|u| u.to_string()).unwrap_or_default(),
            }
        } else {
            CatalogError::Transport(err.to_string())
        }
    }
}

impl From<url::ParseError> for CatalogError {
    fn from(err: url::ParseError) -> Self {
        CatalogError::InvalidUrl(err.to_string())
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Decode(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl CatalogError {
    /// The message to show the shopper. Identical for every variant.
    pub fn user_message(&self) -> &'static str {
        FETCH_FAILED_MESSAGE
    }

    /// True for failures that happened while talking to the catalog.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            CatalogError::Transport(_) | CatalogError::Status { .. } | CatalogError::Decode(_)
        )
    }

    /// True if the catalog answered "not found".
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::Status { status: 404, .. })
    }

    /// True for errors caused by local setup rather than the catalog.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            CatalogError::InvalidConfig(_) | CatalogError::InvalidUrl(_)
        )
    }
}
