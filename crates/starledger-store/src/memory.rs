//! In-memory implementation of the LedgerStore trait.
//!
//! Volatile: everything is lost when the store is dropped. Appends are
//! serialized by the write half of a `tokio::sync::RwLock`; reads clone under
//! the read half.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::RwLock;
use tracing::{debug, info};

use starledger_core::{
    find_by_digest, find_by_position, validate_chain, Clock, Digest, Record, SystemClock,
    ValidationError,
};

use crate::error::{Result, StoreError};
use crate::traits::LedgerStore;

/// In-memory ledger store.
pub struct MemoryLedger {
    records: RwLock<Vec<Record>>,
    clock: Arc<dyn Clock>,
}

impl MemoryLedger {
    /// Create a new empty store using the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create a new empty store that stamps records with `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            clock,
        }
    }

    /// Rebuild a store from previously persisted records.
    ///
    /// The records must form a valid chain; otherwise every finding is
    /// returned and no store is built.
    pub fn restore(
        records: Vec<Record>,
        clock: Arc<dyn Clock>,
    ) -> std::result::Result<Self, Vec<ValidationError>> {
        let findings = validate_chain(&records);
        if !findings.is_empty() {
            return Err(findings);
        }
        info!(height = records.len(), "restored ledger");
        Ok(Self {
            records: RwLock::new(records),
            clock,
        })
    }
}

impl Default for MemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LedgerStore for MemoryLedger {
    async fn initialize(&self, genesis_payload: &[u8]) -> Result<Record> {
        let mut records = self.records.write().await;

        if let Some(genesis) = records.first() {
            debug!(digest = %genesis.digest, "genesis already present");
            return Ok(genesis.clone());
        }

        let genesis = Record::genesis(self.clock.now_secs(), genesis_payload.to_vec());
        info!(digest = %genesis.digest, "created genesis record");
        records.push(genesis.clone());
        Ok(genesis)
    }

    async fn append(&self, payload: Bytes) -> Result<Record> {
        if payload.is_empty() {
            return Err(StoreError::EmptyPayload);
        }

        // Held across read-tail -> compute -> push.
        let mut records = self.records.write().await;

        let tail = records.last().ok_or(StoreError::NotInitialized)?;
        let position = tail
            .position
            .checked_add(1)
            .ok_or(StoreError::PositionOverflow(tail.position))?;
        let record = Record::new(position, self.clock.now_secs(), tail.digest, payload);

        debug!(
            position = record.position,
            digest = %record.digest,
            previous = %record.previous_digest,
            "appended record"
        );
        records.push(record.clone());
        Ok(record)
    }

    async fn height(&self) -> Result<u64> {
        let records = self.records.read().await;
        Ok(records.len() as u64)
    }

    async fn tail(&self) -> Result<Option<Record>> {
        let records = self.records.read().await;
        Ok(records.last().cloned())
    }

    async fn get_by_digest(&self, digest: &Digest) -> Result<Option<Record>> {
        let records = self.records.read().await;
        Ok(find_by_digest(&records, digest).cloned())
    }

    async fn get_by_position(&self, position: u64) -> Result<Option<Record>> {
        let records = self.records.read().await;
        Ok(find_by_position(&records, position).cloned())
    }

    async fn snapshot(&self) -> Result<Vec<Record>> {
        let records = self.records.read().await;
        Ok(records.clone())
    }
}
