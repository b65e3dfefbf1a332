//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::sync::{Arc, Once};

use bytes::Bytes;
use tracing_subscriber::EnvFilter;

use starledger::{Ledger, LedgerConfig, Result};
use starledger_core::{Address, Ed25519Signature, Keypair, ManualClock, Record, Star};
use starledger_store::MemoryLedger;

/// Fixed starting time for fixture clocks: 2025-01-14T16:00:00Z.
pub const FIXTURE_EPOCH: i64 = 1736870400;

/// A test fixture with a keypair and a controllable clock.
pub struct TestFixture {
    pub keypair: Keypair,
    pub clock: ManualClock,
}

impl TestFixture {
    /// Create a new test fixture with a random keypair.
    pub fn new() -> Self {
        Self {
            keypair: Keypair::generate(),
            clock: ManualClock::new(FIXTURE_EPOCH),
        }
    }

    /// Create with a deterministic keypair from seed.
    pub fn with_seed(seed: [u8; 32]) -> Self {
        Self {
            keypair: Keypair::from_seed(&seed),
            clock: ManualClock::new(FIXTURE_EPOCH),
        }
    }

    /// The address this fixture signs for.
    pub fn address(&self) -> Address {
        self.keypair.address()
    }

    /// The address in the string form `submit_record` takes.
    pub fn address_hex(&self) -> String {
        self.keypair.address().to_hex()
    }

    /// Sign a challenge string.
    pub fn sign_challenge(&self, challenge: &str) -> Ed25519Signature {
        self.keypair.sign(challenge.as_bytes())
    }

    /// A ledger over a fresh in-memory store, driven by this fixture's clock.
    pub async fn ledger(&self) -> Result<Ledger<MemoryLedger>> {
        self.ledger_with(LedgerConfig::default()).await
    }

    /// Like [`TestFixture::ledger`] with a custom configuration.
    pub async fn ledger_with(&self, config: LedgerConfig) -> Result<Ledger<MemoryLedger>> {
        let store = MemoryLedger::with_clock(Arc::new(self.clock.clone()));
        Ledger::with_clock(store, config, Arc::new(self.clock.clone())).await
    }

    /// Run the full handshake on `ledger` and append `payload`.
    pub async fn submit(&self, ledger: &Ledger<MemoryLedger>, payload: &[u8]) -> Result<Record> {
        let challenge = ledger.issue_ownership_challenge(&self.address());
        let signature = self.sign_challenge(&challenge);
        ledger
            .submit_record(
                &self.address_hex(),
                &challenge,
                &signature,
                Bytes::copy_from_slice(payload),
            )
            .await
    }

    /// Run the full handshake on `ledger` and register `star`.
    pub async fn register_star(&self, ledger: &Ledger<MemoryLedger>, star: Star) -> Result<Record> {
        let challenge = ledger.issue_ownership_challenge(&self.address());
        let signature = self.sign_challenge(&challenge);
        ledger
            .submit_star(&self.address_hex(), &challenge, &signature, star)
            .await
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Create multiple test fixtures for multi-party tests.
///
/// Seeds are distinct and start at 1, so no fixture collides with an
/// all-zero seed used elsewhere.
pub fn multi_party_fixtures(count: usize) -> Vec<TestFixture> {
    (0..count)
        .map(|i| {
            let mut seed = [0u8; 32];
            seed[..8].copy_from_slice(&(i as u64 + 1).to_le_bytes());
            TestFixture::with_seed(seed)
        })
        .collect()
}

/// A star with recognizable, index-dependent fields.
pub fn sample_star(n: usize) -> Star {
    Star::new(
        format!("{}h {}m 0.0s", n % 24, n % 60),
        format!("{}° 0' 0.0", n % 90),
        format!("star number {}", n),
    )
}

static TRACING: Once = Once::new();

/// Install a test subscriber once per process.
///
/// Honors `RUST_LOG`; defaults to `warn`. Output goes through the test
/// writer so it is captured per test.
pub fn init_test_tracing() {
    TRACING.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}
