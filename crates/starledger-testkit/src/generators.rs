//! Proptest generators for property-based testing.

use bytes::Bytes;
use proptest::prelude::*;

use starledger_core::{Digest, Keypair, Record, Star};

/// Generate a random keypair.
pub fn keypair() -> impl Strategy<Value = Keypair> {
    any::<[u8; 32]>().prop_map(|seed| Keypair::from_seed(&seed))
}

/// Generate a random Digest.
pub fn digest() -> impl Strategy<Value = Digest> {
    any::<[u8; 32]>().prop_map(Digest::from_bytes)
}

/// Generate a timestamp in seconds, negative values included.
pub fn timestamp() -> impl Strategy<Value = i64> {
    -1_000_000_000i64..=4_000_000_000i64
}

/// Generate payload bytes of specified max length. Never empty.
pub fn payload(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 1..=max_len.max(1))
}

/// Generate a Star with optional fields sometimes present.
pub fn star() -> impl Strategy<Value = Star> {
    (
        "[0-9]{1,2}h [0-9]{1,2}m [0-9]{1,2}\\.[0-9]s",
        "-?[0-9]{1,2}° [0-9]{1,2}' [0-9]{1,2}\\.[0-9]",
        "[ -~]{0,64}",
        proptest::option::of("-?[0-9]\\.[0-9]{1,2}"),
        proptest::option::of("[A-Z][a-z]{2,12}"),
    )
        .prop_map(|(ra, dec, story, magnitude, constellation)| {
            let mut star = Star::new(ra, dec, story);
            if let Some(m) = magnitude {
                star = star.magnitude(m);
            }
            if let Some(c) = constellation {
                star = star.constellation(c);
            }
            star
        })
}

/// Parameters for building a linked chain of records.
#[derive(Debug, Clone)]
pub struct ChainParams {
    pub genesis_timestamp: i64,
    /// Seconds between consecutive records.
    pub steps: Vec<u8>,
    pub payloads: Vec<Vec<u8>>,
}

impl Arbitrary for ChainParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (0usize..16)
            .prop_flat_map(|len| {
                (
                    0i64..=1_800_000_000i64,
                    prop::collection::vec(any::<u8>(), len),
                    prop::collection::vec(payload(128), len),
                )
            })
            .prop_map(|(genesis_timestamp, steps, payloads)| ChainParams {
                genesis_timestamp,
                steps,
                payloads,
            })
            .boxed()
    }
}

/// Build a correctly linked chain from parameters, genesis included.
pub fn chain_from_params(params: &ChainParams) -> Vec<Record> {
    let mut records = vec![Record::genesis(
        params.genesis_timestamp,
        Bytes::from_static(starledger_core::GENESIS_PAYLOAD),
    )];
    let mut timestamp = params.genesis_timestamp;

    for (step, payload) in params.steps.iter().zip(&params.payloads) {
        timestamp += i64::from(*step);
        let prev = &records[records.len() - 1];
        let record = Record::new(prev.position + 1, timestamp, prev.digest, payload.clone());
        records.push(record);
    }

    records
}
