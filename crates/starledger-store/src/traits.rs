//! LedgerStore trait: the abstract interface for the record sequence.
//!
//! The in-memory implementation is the only one today. The trait is async so
//! a durable log can slot in behind it without changing callers.

use async_trait::async_trait;
use bytes::Bytes;
use starledger_core::{Digest, Record};

use crate::error::Result;

/// The LedgerStore trait: owner of the ordered record sequence.
///
/// # Design Notes
///
/// - **Single writer**: `append` reads the tail, computes linkage and pushes
///   as one exclusive step. Two appends never observe the same tail.
/// - **Snapshot reads**: every read sees a point-in-time view and never a
///   half-appended record.
/// - **No ownership checks**: the store trusts its caller to have verified
///   the proposer. It only maintains the linkage invariants.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    // ─────────────────────────────────────────────────────────────────────────
    // Write Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Seed the genesis record if the store is empty.
    ///
    /// Idempotent: when genesis already exists it is returned unchanged and
    /// `genesis_payload` is ignored.
    async fn initialize(&self, genesis_payload: &[u8]) -> Result<Record>;

    /// Append a new record after the current tail.
    ///
    /// # Returns
    /// - The appended record.
    /// - `EmptyPayload` if `payload` is empty, with no state change.
    /// - `NotInitialized` if there is no genesis record.
    async fn append(&self, payload: Bytes) -> Result<Record>;

    // ─────────────────────────────────────────────────────────────────────────
    // Read Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Number of records, genesis included.
    async fn height(&self) -> Result<u64>;

    /// The most recent record.
    async fn tail(&self) -> Result<Option<Record>>;

    /// First record with the given digest.
    async fn get_by_digest(&self, digest: &Digest) -> Result<Option<Record>>;

    /// Record at the given zero-based position.
    async fn get_by_position(&self, position: u64) -> Result<Option<Record>>;

    /// A point-in-time copy of every record, in position order.
    async fn snapshot(&self) -> Result<Vec<Record>>;
}
