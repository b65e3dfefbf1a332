//! The Ledger: the public API of the star ledger.
//!
//! Composes the ownership verifier with a [`LedgerStore`]. The store never
//! checks ownership itself; every write goes through [`Ledger::submit_record`].

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tracing::{debug, info, warn};

use starledger_core::{
    stars_by_owner, validate_chain, Address, Clock, Digest, Ed25519Signature, OwnedStar,
    OwnershipVerifier, Record, Star, StarEntry, SystemClock, ValidationError, DEFAULT_DOMAIN_TAG,
    DEFAULT_FRESHNESS_WINDOW, GENESIS_PAYLOAD,
};
use starledger_store::LedgerStore;

use crate::error::Result;
use crate::replay::ReplayGuard;

/// Configuration for the Ledger.
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    /// How long an issued challenge stays acceptable.
    pub freshness_window: Duration,
    /// Tag embedded in every challenge.
    pub domain_tag: String,
    /// Payload of the genesis record.
    pub genesis_payload: Bytes,
    /// Refuse a challenge that was already used for a successful submission.
    pub replay_protection: bool,
}

impl LedgerConfig {
    pub fn with_freshness_window(mut self, window: Duration) -> Self {
        self.freshness_window = window;
        self
    }

    pub fn with_domain_tag(mut self, tag: impl Into<String>) -> Self {
        self.domain_tag = tag.into();
        self
    }

    pub fn with_genesis_payload(mut self, payload: impl Into<Bytes>) -> Self {
        self.genesis_payload = payload.into();
        self
    }

    pub fn with_replay_protection(mut self, enabled: bool) -> Self {
        self.replay_protection = enabled;
        self
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            freshness_window: DEFAULT_FRESHNESS_WINDOW,
            domain_tag: DEFAULT_DOMAIN_TAG.to_string(),
            genesis_payload: Bytes::from_static(GENESIS_PAYLOAD),
            replay_protection: false,
        }
    }
}

/// The main Ledger struct.
///
/// Provides a unified API for:
/// - Issuing and checking ownership challenges
/// - Submitting records
/// - Querying records by digest, position, and owner
/// - Auditing the whole chain
pub struct Ledger<S: LedgerStore> {
    /// The storage backend.
    store: S,
    /// Challenge issuer and checker.
    verifier: OwnershipVerifier,
    /// Clock used for freshness and replay bookkeeping.
    clock: Arc<dyn Clock>,
    /// Consumed challenges, when replay protection is on.
    replay: Option<ReplayGuard>,
    /// Configuration.
    config: LedgerConfig,
}

impl<S: LedgerStore> Ledger<S> {
    /// Create a ledger over `store` and seed its genesis record.
    ///
    /// Initialization completes before the ledger is returned, so no caller
    /// can observe a store without genesis.
    pub async fn new(store: S, config: LedgerConfig) -> Result<Self> {
        Self::with_clock(store, config, Arc::new(SystemClock)).await
    }

    /// Like [`Ledger::new`], with an explicit clock for challenge freshness.
    pub async fn with_clock(
        store: S,
        config: LedgerConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let verifier = OwnershipVerifier::new(
            Arc::clone(&clock),
            config.freshness_window,
            config.domain_tag.clone(),
        );
        let replay = config
            .replay_protection
            .then(|| ReplayGuard::new(verifier.window()));

        let ledger = Self {
            store,
            verifier,
            clock,
            replay,
            config,
        };
        ledger.initialize().await?;
        Ok(ledger)
    }

    /// Seed genesis if missing. Calling this again is a no-op.
    pub async fn initialize(&self) -> Result<Record> {
        Ok(self.store.initialize(&self.config.genesis_payload).await?)
    }

    /// Get the store reference.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get the configuration.
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Ownership
    // ─────────────────────────────────────────────────────────────────────────

    /// Issue a challenge for `address` to sign.
    ///
    /// Takes a parsed [`Address`], so a malformed address is rejected by
    /// `Address::from_str` before any challenge exists. `submit_record` takes
    /// the address as text because the claimed address arrives with the
    /// signature and is checked against the challenge.
    pub fn issue_ownership_challenge(&self, address: &Address) -> String {
        let challenge = self.verifier.issue_challenge(address);
        debug!(
            %address,
            domain_tag = self.verifier.domain_tag(),
            "issued ownership challenge"
        );
        challenge
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Write Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Verify ownership of `address` and append `payload`.
    pub async fn submit_record(
        &self,
        address: &str,
        challenge: &str,
        signature: &Ed25519Signature,
        payload: impl Into<Bytes>,
    ) -> Result<Record> {
        let verified = match self.verifier.verify(challenge, address, signature) {
            Ok(verified) => verified,
            Err(e) => {
                warn!(address, error = %e, "rejected submission");
                return Err(e.into());
            }
        };

        if let Some(replay) = &self.replay {
            if let Err(e) = replay.reserve(challenge, &verified, self.clock.now_secs()) {
                warn!(address, error = %e, "rejected submission");
                return Err(e.into());
            }
        }

        match self.store.append(payload.into()).await {
            Ok(record) => {
                info!(
                    owner = %verified.address,
                    position = record.position,
                    digest = %record.digest,
                    "record submitted"
                );
                Ok(record)
            }
            Err(e) => {
                if let Some(replay) = &self.replay {
                    replay.release(challenge);
                }
                warn!(address, error = %e, "append failed");
                Err(e.into())
            }
        }
    }

    /// Register a star: encode a [`StarEntry`] and submit it.
    pub async fn submit_star(
        &self,
        address: &str,
        challenge: &str,
        signature: &Ed25519Signature,
        star: Star,
    ) -> Result<Record> {
        let entry = StarEntry::new(challenge, signature, star);
        let payload = entry.to_bytes()?;
        self.submit_record(address, challenge, signature, payload)
            .await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Query Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Number of records, genesis included.
    pub async fn height(&self) -> Result<u64> {
        Ok(self.store.height().await?)
    }

    /// The most recent record.
    pub async fn tail(&self) -> Result<Option<Record>> {
        Ok(self.store.tail().await?)
    }

    /// Get a record by digest.
    pub async fn get_by_digest(&self, digest: &Digest) -> Result<Option<Record>> {
        Ok(self.store.get_by_digest(digest).await?)
    }

    /// Get a record by zero-based position.
    pub async fn get_by_position(&self, position: u64) -> Result<Option<Record>> {
        Ok(self.store.get_by_position(position).await?)
    }

    /// All stars registered by `owner`, in append order.
    ///
    /// Payloads that fail to decode are logged and skipped.
    pub async fn get_by_owner(&self, owner: &Address) -> Result<Vec<OwnedStar>> {
        let snapshot = self.store.snapshot().await?;
        let scan = stars_by_owner(&snapshot, owner);

        if !scan.skipped.is_empty() {
            for (position, reason) in &scan.skipped {
                warn!(position, reason = %reason, "skipped undecodable payload");
            }
            warn!(
                skipped = scan.skipped.len(),
                "owner query skipped undecodable records"
            );
        }

        Ok(scan.matches)
    }

    /// A point-in-time copy of the whole chain.
    pub async fn snapshot(&self) -> Result<Vec<Record>> {
        Ok(self.store.snapshot().await?)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Audit
    // ─────────────────────────────────────────────────────────────────────────

    /// Audit the chain. An empty result means the chain is intact.
    pub async fn validate(&self) -> Result<Vec<ValidationError>> {
        let snapshot = self.store.snapshot().await?;
        let findings = validate_chain(&snapshot);

        if findings.is_empty() {
            debug!(height = snapshot.len(), "chain validated");
        } else {
            warn!(
                height = snapshot.len(),
                findings = findings.len(),
                "chain validation found problems"
            );
        }

        Ok(findings)
    }
}
