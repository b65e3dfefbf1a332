//! # Star Ledger
//!
//! The unified API for the star ledger: an append-only, hash-linked record
//! chain where every entry is gated by a signed ownership challenge.
//!
//! ## Overview
//!
//! - **Records**: Immutable entries, each linked to its predecessor's digest
//! - **Ownership**: A proposer proves control of an address by signing a
//!   short-lived challenge before anything is appended
//! - **Queries**: Lookup by digest, by position, and by the owner of a star
//! - **Audit**: A full chain walk that reports every broken record
//!
//! ## Key Concepts
//!
//! - **Genesis**: Position 0, linked to the all-zero sentinel digest.
//! - **Height**: The number of records, genesis included.
//! - **Challenge**: `"<address>:<issued_at>:<domain tag>"`, valid for a
//!   freshness window (five minutes by default).
//!
//! ## Usage
//!
//! ```rust,no_run
//! use starledger::{Ledger, LedgerConfig};
//! use starledger::core::{Keypair, Star};
//! use starledger::store::MemoryLedger;
//!
//! async fn example() {
//!     let ledger = Ledger::new(MemoryLedger::new(), LedgerConfig::default())
//!         .await
//!         .unwrap();
//!
//!     // The proposer asks for a challenge and signs it
//!     let keypair = Keypair::generate();
//!     let challenge = ledger.issue_ownership_challenge(&keypair.address());
//!     let signature = keypair.sign(challenge.as_bytes());
//!
//!     // Register a star
//!     let star = Star::new("16h 29m 1.0s", "-26° 29' 24.9", "First star I saw");
//!     let record = ledger
//!         .submit_star(&keypair.address().to_hex(), &challenge, &signature, star)
//!         .await
//!         .unwrap();
//!     assert_eq!(record.position, 1);
//!
//!     // Audit the chain
//!     assert!(ledger.validate().await.unwrap().is_empty());
//! }
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - `starledger::core` - Core primitives (Record, Digest, OwnershipVerifier, etc.)
//! - `starledger::store` - Storage abstraction and the in-memory store

pub mod error;
pub mod ledger;
pub mod replay;

// Re-export component crates
pub use starledger_core as core;
pub use starledger_store as store;

// Re-export main types for convenience
pub use error::{LedgerError, Result};
pub use ledger::{Ledger, LedgerConfig};
pub use replay::ReplayGuard;

// Re-export commonly used core types
pub use starledger_core::{
    Address, Digest, Ed25519Signature, Keypair, OwnedStar, OwnershipError, Record, Star,
    StarEntry, ValidationError,
};
