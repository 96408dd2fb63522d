//! # Store Error Types
//!
//! Errors raised by persistence adapters.
//!
//! None of these reach callers of [`crate::CartStore`]: the store logs them
//! and carries on with its in-memory state. They are public so that
//! adapters and their tests can speak a common type.
//!
//! ```text
//! ┌─────────────────┐  ┌──────────────────┐  ┌─────────────────────────┐
//! │   Storage I/O   │  │   Record format  │  │      Availability       │
//! │                 │  │                  │  │                         │
//! │  Io             │  │  Serialization   │  │  Unavailable            │
//! │                 │  │  Corrupt         │  │  (poisoned lock, etc.)  │
//! └─────────────────┘  └──────────────────┘  └─────────────────────────┘
//! ```

use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing medium failed.
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The record could not be encoded or decoded as JSON.
    #[error("Cart record serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The record decoded but violates cart invariants.
    #[error("Cart record is corrupt: {0}")]
    Corrupt(String),

    /// The storage backend cannot be used right now.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl From<storefront_core::CoreError> for StoreError {
    fn from(err: storefront_core::CoreError) -> Self {
        StoreError::Corrupt(err.to_string())
    }
}

impl StoreError {
    /// True when the stored record itself is bad, as opposed to the medium.
    ///
    /// A bad record is expected after schema drift and is logged quietly;
    /// medium failures are worth a warning.
    pub fn is_bad_record(&self) -> bool {
        matches!(self, StoreError::Serialization(_) | StoreError::Corrupt(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_record_categorisation() {
        let decode = serde_json::from_str::<u32>("nope").unwrap_err();
        assert!(StoreError::from(decode).is_bad_record());
        assert!(StoreError::Corrupt("dup".into()).is_bad_record());

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert!(!StoreError::from(io).is_bad_record());
        assert!(!StoreError::Unavailable("poisoned".into()).is_bad_record());
    }

    #[test]
    fn test_core_error_maps_to_corrupt() {
        let err = StoreError::from(storefront_core::CoreError::InconsistentCart {
            reason: "product 1 has quantity 0".into(),
        });
        assert!(matches!(err, StoreError::Corrupt(_)));
        assert!(err.to_string().contains("quantity 0"));
    }
}
