//! Golden test vectors for canonical record encoding.
//!
//! These vectors pin the exact bytes a record's digest is computed over.
//! Any implementation that hashes the same bytes with the same domain
//! prefix will agree on every digest in the chain.

use serde::Serialize;

use starledger_core::{canonical_record_bytes, Digest, Record};

/// A golden test vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    pub position: u64,
    pub timestamp: i64,
    pub previous_digest: [u8; 32],
    pub payload: &'static [u8],
    /// Expected canonical bytes (hex).
    pub expected_canonical: &'static str,
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "genesis with default payload",
            position: 0,
            timestamp: 1736870400, // 2025-01-14T16:00:00Z
            previous_digest: [0x00; 32],
            payload: b"Genesis Block",
            expected_canonical: "a40000011a67868a0002582000000000000000000000000000000000\
                                 00000000000000000000000000000000034d47656e6573697320426c\
                                 6f636b",
        },
        GoldenVector {
            name: "second record with hello payload",
            position: 1,
            timestamp: 1736870401,
            previous_digest: [0xAA; 32],
            payload: b"hello",
            expected_canonical: "a40001011a67868a01025820aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa\
                                 aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa034568656c6c6f",
        },
        GoldenVector {
            name: "negative timestamp, empty payload",
            position: 0,
            timestamp: -1,
            previous_digest: [0x00; 32],
            payload: b"",
            expected_canonical: "a4000001200258200000000000000000000000000000000000000000\
                                 0000000000000000000000000340",
        },
        GoldenVector {
            name: "two-byte position, single zero byte payload",
            position: 300,
            timestamp: 0,
            previous_digest: [0x11; 32],
            payload: &[0x00],
            expected_canonical: "a40019012c010002582011111111111111111111111111111111111111\
                                 11111111111111111111111111034100",
        },
    ]
}

/// Build the record described by a golden vector.
pub fn record_from_vector(vector: &GoldenVector) -> Record {
    Record::new(
        vector.position,
        vector.timestamp,
        Digest::from_bytes(vector.previous_digest),
        vector.payload,
    )
}

/// Outcome of checking one vector.
#[derive(Debug, Clone, Serialize)]
pub struct VectorReport {
    pub name: String,
    pub matches: bool,
    pub canonical: String,
    pub digest: String,
}

/// Check every vector's canonical bytes against the expected hex.
pub fn verify_all_vectors() -> Vec<VectorReport> {
    all_vectors()
        .iter()
        .map(|v| {
            let previous = Digest::from_bytes(v.previous_digest);
            let canonical =
                hex::encode(canonical_record_bytes(v.position, v.timestamp, &previous, v.payload));
            let record = record_from_vector(v);

            VectorReport {
                name: v.name.to_string(),
                matches: canonical == v.expected_canonical,
                canonical,
                digest: record.digest.to_hex(),
            }
        })
        .collect()
}

/// The vector reports as pretty JSON, for sharing with other implementations.
pub fn vectors_json() -> serde_json::Result<String> {
    serde_json::to_string_pretty(&verify_all_vectors())
}
