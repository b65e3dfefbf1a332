//! # Star Ledger Testkit
//!
//! Testing utilities for the star ledger.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Pinned canonical encodings for cross-platform verification
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Helper structs for setting up ledger scenarios
//!
//! ## Golden Vectors
//!
//! ```rust
//! use starledger_testkit::vectors::verify_all_vectors;
//!
//! for report in verify_all_vectors() {
//!     assert!(report.matches, "{}", report.name);
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use starledger_core::validate_chain;
//! use starledger_testkit::generators::{chain_from_params, ChainParams};
//!
//! proptest! {
//!     #[test]
//!     fn built_chains_validate(params: ChainParams) {
//!         prop_assert!(validate_chain(&chain_from_params(&params)).is_empty());
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust,no_run
//! use starledger_testkit::fixtures::{sample_star, TestFixture};
//!
//! async fn example() {
//!     let fixture = TestFixture::new();
//!     let ledger = fixture.ledger().await.unwrap();
//!     fixture.register_star(&ledger, sample_star(1)).await.unwrap();
//! }
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{
    init_test_tracing, multi_party_fixtures, sample_star, TestFixture, FIXTURE_EPOCH,
};
pub use generators::{chain_from_params, ChainParams};
pub use vectors::{
    all_vectors, record_from_vector, verify_all_vectors, GoldenVector, VectorReport,
};
