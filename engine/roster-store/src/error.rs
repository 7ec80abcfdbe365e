//! Error types for the roster store

use thiserror::Error;

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in the storage collaborator.
///
/// Lookups against unknown identifiers are not errors: they yield empty
/// collections, since the engine treats absence of data as a valid
/// low-information state. Only snapshot loading can actually fail.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot decode error: {0}")]
    Decode(#[from] serde_json::Error),
}
