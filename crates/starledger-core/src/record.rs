//! Record: the atomic unit of the ledger.
//!
//! A record is immutable once appended. Its digest covers every other field,
//! and its `previous_digest` links it to the record before it.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::canonical::{canonical_record_bytes, digest_canonical};
use crate::error::{CoreError, ValidationError};
use crate::payload::StarEntry;
use crate::types::Digest;

/// Payload carried by the genesis record unless configured otherwise.
pub const GENESIS_PAYLOAD: &[u8] = b"Genesis Block";

/// A single ledger record.
///
/// External representation (JSON):
/// `{position, timestamp, previous_digest: hex, digest: hex, payload: bytes}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Zero-based index in the ledger. Genesis is 0.
    pub position: u64,

    /// Unix seconds at append time.
    pub timestamp: i64,

    /// Digest of the preceding record, `Digest::ZERO` for genesis.
    pub previous_digest: Digest,

    /// Digest over all other fields.
    pub digest: Digest,

    /// Opaque payload bytes.
    pub payload: Bytes,
}

impl Record {
    /// Build a record and compute its digest.
    pub fn new(
        position: u64,
        timestamp: i64,
        previous_digest: Digest,
        payload: impl Into<Bytes>,
    ) -> Self {
        let payload = payload.into();
        let digest = Self::compute_digest(position, timestamp, &previous_digest, &payload);
        Self {
            position,
            timestamp,
            previous_digest,
            digest,
            payload,
        }
    }

    /// Build the genesis record.
    pub fn genesis(timestamp: i64, payload: impl Into<Bytes>) -> Self {
        Self::new(0, timestamp, Digest::ZERO, payload)
    }

    /// The hasher: digest over the canonical encoding of the record content.
    pub fn compute_digest(
        position: u64,
        timestamp: i64,
        previous_digest: &Digest,
        payload: &[u8],
    ) -> Digest {
        digest_canonical(&canonical_record_bytes(
            position,
            timestamp,
            previous_digest,
            payload,
        ))
    }

    /// Recompute the digest from the current field values.
    pub fn recompute_digest(&self) -> Digest {
        Self::compute_digest(
            self.position,
            self.timestamp,
            &self.previous_digest,
            &self.payload,
        )
    }

    /// Check this record's stored digest against its content.
    pub fn verify_digest(&self) -> Result<(), ValidationError> {
        let expected = self.recompute_digest();
        if expected == self.digest {
            Ok(())
        } else {
            Err(ValidationError::TamperedBody {
                position: self.position,
                recorded: self.digest,
                expected,
            })
        }
    }

    /// Check if this is the genesis record.
    pub fn is_genesis(&self) -> bool {
        self.position == 0 && self.previous_digest.is_sentinel()
    }

    /// Decode the payload as a star entry.
    pub fn decode_payload(&self) -> Result<StarEntry, CoreError> {
        StarEntry::from_bytes(&self.payload)
    }
}
