//! # Star Ledger Core
//!
//! Pure primitives for the star ledger: records, digests, ownership
//! challenges, and chain validation.
//!
//! This crate contains no I/O, no storage, no locking. It is pure computation
//! over hash-linked records.
//!
//! ## Key Types
//!
//! - [`Record`] - One immutable ledger entry, linked to its predecessor
//! - [`Digest`] - Blake3 digest over a record's canonical encoding
//! - [`Address`] - An Ed25519 public key, the identity that owns entries
//! - [`OwnershipVerifier`] - Issues and checks time-boxed signed challenges
//! - [`StarEntry`] - The structured payload of a star registration
//!
//! ## Canonicalization
//!
//! Record digests are computed over deterministic CBOR. See [`canonical`].

pub mod canonical;
pub mod challenge;
pub mod clock;
pub mod crypto;
pub mod error;
pub mod payload;
pub mod query;
pub mod record;
pub mod types;
pub mod validation;

pub use canonical::{canonical_record_bytes, decode_record, encode_record};
pub use challenge::{Challenge, OwnershipVerifier, DEFAULT_DOMAIN_TAG, DEFAULT_FRESHNESS_WINDOW};
pub use clock::{Clock, ManualClock, SystemClock};
pub use crypto::{Address, Ed25519Signature, Keypair};
pub use error::{CoreError, OwnershipError, ValidationError};
pub use payload::{OwnedStar, Star, StarEntry};
pub use query::{find_by_digest, find_by_position, stars_by_owner, OwnerScan};
pub use record::{Record, GENESIS_PAYLOAD};
pub use types::Digest;
pub use validation::{is_valid_chain, validate_chain};
