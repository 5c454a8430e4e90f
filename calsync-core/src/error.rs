//! Error types for calsync operations.

use thiserror::Error;

/// Errors that can occur in calsync operations.
///
/// Per-event create/delete failures are not represented here: the store
/// converts them to `false` returns so a single bad event never aborts a
/// batch. Only failures that sink the whole operation surface as errors.
#[derive(Error, Debug)]
pub enum CalSyncError {
    #[error("Event store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Collection not found: {0}")]
    CollectionNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for calsync operations.
pub type CalSyncResult<T> = Result<T, CalSyncError>;
