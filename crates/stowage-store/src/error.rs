//! Error types for the store module.

use thiserror::Error;

/// Errors that can occur when operating on a host-backed store.
///
/// The in-memory fallback never produces these; they originate from a
/// working facility that fails after construction (a probe failure is
/// not an error at all, it is a fallback selection).
#[derive(Debug, Error)]
pub enum StoreError {
    /// The facility refused a write because its quota is exhausted.
    #[error("storage quota exceeded")]
    QuotaExceeded,

    /// The host denied access to the facility.
    #[error("storage access denied: {0}")]
    AccessDenied(String),

    /// Any other facility-reported failure.
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
