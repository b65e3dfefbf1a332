//! # Star Ledger Store
//!
//! Storage abstraction for the star ledger. Provides a trait-based interface
//! over the ordered record sequence, with an in-memory implementation.
//!
//! ## Key Types
//!
//! - [`LedgerStore`] - The async trait for append and lookup
//! - [`MemoryLedger`] - Volatile in-memory storage
//!
//! ## Usage
//!
//! ```rust,no_run
//! use bytes::Bytes;
//! use starledger_core::GENESIS_PAYLOAD;
//! use starledger_store::{LedgerStore, MemoryLedger};
//!
//! async fn example() {
//!     let store = MemoryLedger::new();
//!     store.initialize(GENESIS_PAYLOAD).await.unwrap();
//!
//!     let record = store.append(Bytes::from_static(b"entry")).await.unwrap();
//!     assert_eq!(record.position, 1);
//! }
//! ```
//!
//! ## Design Notes
//!
//! - **Idempotent initialize**: a second call returns the existing genesis
//! - **All-or-nothing append**: validation happens before the push, which is
//!   the only mutation
//! - **Height**: the number of records, so `height == tail.position + 1`

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::MemoryLedger;
pub use traits::LedgerStore;
