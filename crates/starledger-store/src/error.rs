//! Error types for the store module.

use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Append was called with an empty payload.
    #[error("payload is empty")]
    EmptyPayload,

    /// The store has no genesis record yet.
    #[error("ledger is not initialized")]
    NotInitialized,

    /// The next position does not fit in a u64.
    #[error("ledger position overflow after {0}")]
    PositionOverflow(u64),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
