//! Error types for the star ledger core.

use thiserror::Error;

use crate::types::Digest;

/// Core errors from encoding and decoding ledger data.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("payload decode failed: {0}")]
    DecodeFailed(String),

    #[error("encoding error: {0}")]
    EncodingError(String),
}

/// Rejections from the ownership handshake.
///
/// All of these are caller-input errors: they are surfaced as-is and never
/// retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OwnershipError {
    #[error("malformed challenge: {0}")]
    MalformedChallenge(String),

    #[error("challenge expired: {elapsed}s elapsed, window is {window}s")]
    ChallengeExpired { elapsed: i64, window: u64 },

    #[error("invalid signature")]
    InvalidSignature,

    #[error("challenge already used")]
    ChallengeReplayed,
}

/// Integrity findings reported by chain validation.
///
/// These are returned as data, never raised: validation enumerates every
/// problem in the chain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("chain is empty")]
    EmptyChain,

    #[error("tampered body at position {position}: recorded {recorded}, expected {expected}")]
    TamperedBody {
        position: u64,
        recorded: Digest,
        expected: Digest,
    },

    #[error("broken link at position {position}: expected previous {expected}, got {actual}")]
    BrokenLink {
        position: u64,
        expected: Digest,
        actual: Digest,
    },

    #[error("record at index {index} claims position {position}")]
    PositionMismatch { index: u64, position: u64 },
}

impl ValidationError {
    /// The position this finding is attached to, if any.
    pub fn position(&self) -> Option<u64> {
        match self {
            ValidationError::EmptyChain => None,
            ValidationError::TamperedBody { position, .. }
            | ValidationError::BrokenLink { position, .. } => Some(*position),
            ValidationError::PositionMismatch { index, .. } => Some(*index),
        }
    }
}
