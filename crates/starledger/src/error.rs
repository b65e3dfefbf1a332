//! Error types for the Ledger.

use starledger_core::{CoreError, OwnershipError};
use starledger_store::StoreError;
use thiserror::Error;

/// Errors that can occur during Ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The ownership handshake rejected the submission.
    #[error("ownership error: {0}")]
    Ownership(#[from] OwnershipError),

    /// Storage error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// Payload encoding or decoding error.
    #[error("core error: {0}")]
    Core(#[from] CoreError),
}

/// Result type for Ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;
