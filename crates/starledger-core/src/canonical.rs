//! Canonical CBOR encoding for deterministic record hashing.
//!
//! This module implements RFC 8949 Core Deterministic Encoding for the small
//! subset of CBOR a record needs:
//! - Map keys are small integers, sorted by encoded byte comparison
//! - Integers use smallest valid encoding
//! - Definite lengths only
//! - No floats
//!
//! The canonical encoding is what makes a digest reproducible: the same
//! record content yields identical bytes on every platform, independent of
//! struct layout or map iteration order.

use ciborium::value::Value;

use crate::error::CoreError;
use crate::record::Record;
use crate::types::Digest;

/// Domain separation prefix for record digests.
pub const DIGEST_DOMAIN: &[u8] = b"starledger-record-v0:";

/// Record field keys (integer keys for compact encoding).
///
/// Keys 0-23 encode as single bytes in CBOR.
mod keys {
    pub const POSITION: u64 = 0;
    pub const TIMESTAMP: u64 = 1;
    pub const PREVIOUS_DIGEST: u64 = 2;
    pub const PAYLOAD: u64 = 3;
    pub const DIGEST: u64 = 4;
}

/// A canonical value. Only the shapes a record uses are representable, so
/// encoding cannot fail.
enum Canon<'a> {
    Uint(u64),
    Int(i64),
    Bytes(&'a [u8]),
}

/// Encode the digest preimage of a record: every field except the digest.
pub fn canonical_record_bytes(
    position: u64,
    timestamp: i64,
    previous_digest: &Digest,
    payload: &[u8],
) -> Vec<u8> {
    let entries = [
        (keys::POSITION, Canon::Uint(position)),
        (keys::TIMESTAMP, Canon::Int(timestamp)),
        (keys::PREVIOUS_DIGEST, Canon::Bytes(previous_digest.as_bytes())),
        (keys::PAYLOAD, Canon::Bytes(payload)),
    ];
    let mut buf = Vec::with_capacity(48 + payload.len());
    encode_map_canonical(&mut buf, &entries);
    buf
}

/// Hash canonical record bytes into a digest.
pub fn digest_canonical(canonical: &[u8]) -> Digest {
    let mut hasher = blake3::Hasher::new();
    hasher.update(DIGEST_DOMAIN);
    hasher.update(canonical);
    Digest::from(hasher.finalize())
}

/// Encode a full record, digest included, for storage or transport.
///
/// The digest is carried so a reader can detect tampering, but it is never
/// trusted: [`crate::validate_chain`] recomputes it.
pub fn encode_record(record: &Record) -> Vec<u8> {
    let entries = [
        (keys::POSITION, Canon::Uint(record.position)),
        (keys::TIMESTAMP, Canon::Int(record.timestamp)),
        (
            keys::PREVIOUS_DIGEST,
            Canon::Bytes(record.previous_digest.as_bytes()),
        ),
        (keys::PAYLOAD, Canon::Bytes(&record.payload)),
        (keys::DIGEST, Canon::Bytes(record.digest.as_bytes())),
    ];
    let mut buf = Vec::with_capacity(84 + record.payload.len());
    encode_map_canonical(&mut buf, &entries);
    buf
}

/// Decode a record previously produced by [`encode_record`].
pub fn decode_record(bytes: &[u8]) -> Result<Record, CoreError> {
    let value: Value =
        ciborium::from_reader(bytes).map_err(|e| CoreError::DecodeFailed(e.to_string()))?;

    let map = match value {
        Value::Map(m) => m,
        _ => return Err(CoreError::DecodeFailed("expected map".into())),
    };

    let get = |key: u64| -> Option<&Value> {
        map.iter()
            .find(|(k, _)| match k {
                Value::Integer(i) => i128::from(*i) == i128::from(key),
                _ => false,
            })
            .map(|(_, v)| v)
    };

    let position = match get(keys::POSITION) {
        Some(Value::Integer(i)) => u64::try_from(*i)
            .map_err(|_| CoreError::DecodeFailed("position out of range".into()))?,
        _ => return Err(CoreError::DecodeFailed("missing position".into())),
    };

    let timestamp = match get(keys::TIMESTAMP) {
        Some(Value::Integer(i)) => i64::try_from(*i)
            .map_err(|_| CoreError::DecodeFailed("timestamp out of range".into()))?,
        _ => return Err(CoreError::DecodeFailed("missing timestamp".into())),
    };

    let previous_digest = match get(keys::PREVIOUS_DIGEST) {
        Some(Value::Bytes(b)) => Digest::try_from(b.as_slice())
            .map_err(|_| CoreError::DecodeFailed("invalid previous_digest".into()))?,
        _ => return Err(CoreError::DecodeFailed("missing previous_digest".into())),
    };

    let payload = match get(keys::PAYLOAD) {
        Some(Value::Bytes(b)) => b.clone(),
        _ => return Err(CoreError::DecodeFailed("missing payload".into())),
    };

    let digest = match get(keys::DIGEST) {
        Some(Value::Bytes(b)) => Digest::try_from(b.as_slice())
            .map_err(|_| CoreError::DecodeFailed("invalid digest".into()))?,
        _ => return Err(CoreError::DecodeFailed("missing digest".into())),
    };

    Ok(Record {
        position,
        timestamp,
        previous_digest,
        digest,
        payload: payload.into(),
    })
}

fn encode_value_to(buf: &mut Vec<u8>, value: &Canon<'_>) {
    match value {
        Canon::Uint(n) => encode_uint(buf, 0, *n),
        Canon::Int(i) => encode_int(buf, *i),
        Canon::Bytes(b) => encode_bytes(buf, b),
    }
}

/// Encode a signed integer (major types 0 and 1).
fn encode_int(buf: &mut Vec<u8>, i: i64) {
    if i >= 0 {
        encode_uint(buf, 0, i as u64);
    } else {
        // CBOR encodes -1 as 0, -2 as 1, etc.
        encode_uint(buf, 1, !(i as u64));
    }
}

/// Encode an unsigned integer with the given major type.
fn encode_uint(buf: &mut Vec<u8>, major: u8, n: u64) {
    let mt = major << 5;
    if n < 24 {
        buf.push(mt | (n as u8));
    } else if n <= 0xff {
        buf.push(mt | 24);
        buf.push(n as u8);
    } else if n <= 0xffff {
        buf.push(mt | 25);
        buf.extend_from_slice(&(n as u16).to_be_bytes());
    } else if n <= 0xffff_ffff {
        buf.push(mt | 26);
        buf.extend_from_slice(&(n as u32).to_be_bytes());
    } else {
        buf.push(mt | 27);
        buf.extend_from_slice(&n.to_be_bytes());
    }
}

/// Encode a byte string (major type 2).
fn encode_bytes(buf: &mut Vec<u8>, bytes: &[u8]) {
    encode_uint(buf, 2, bytes.len() as u64);
    buf.extend_from_slice(bytes);
}

/// Encode a map canonically (major type 5).
///
/// Keys are sorted by their encoded byte comparison.
fn encode_map_canonical(buf: &mut Vec<u8>, entries: &[(u64, Canon<'_>)]) {
    let mut pairs: Vec<(Vec<u8>, &Canon<'_>)> = entries
        .iter()
        .map(|(k, v)| {
            let mut key_buf = Vec::with_capacity(1);
            encode_uint(&mut key_buf, 0, *k);
            (key_buf, v)
        })
        .collect();

    pairs.sort_by(|a, b| a.0.cmp(&b.0));

    encode_uint(buf, 5, pairs.len() as u64);
    for (key_bytes, value) in pairs {
        buf.extend_from_slice(&key_bytes);
        encode_value_to(buf, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_canonical_bytes_known_vector() {
        let bytes = canonical_record_bytes(0, 0, &Digest::ZERO, b"");

        let mut expected = vec![0xa4, 0x00, 0x00, 0x01, 0x00, 0x02, 0x58, 0x20];
        expected.extend_from_slice(&[0u8; 32]);
        expected.extend_from_slice(&[0x03, 0x40]);

        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_canonical_bytes_deterministic() {
        let prev = Digest::from_bytes([0x11; 32]);
        let b1 = canonical_record_bytes(7, 1736870400, &prev, b"hello");
        let b2 = canonical_record_bytes(7, 1736870400, &prev, b"hello");
        assert_eq!(b1, b2);
    }

    #[test]
    fn test_integer_encoding() {
        let mut buf = Vec::new();

        // 0-23: single byte
        encode_uint(&mut buf, 0, 0);
        assert_eq!(buf, vec![0x00]);

        buf.clear();
        encode_uint(&mut buf, 0, 23);
        assert_eq!(buf, vec![0x17]);

        // 24-255: two bytes
        buf.clear();
        encode_uint(&mut buf, 0, 24);
        assert_eq!(buf, vec![0x18, 24]);

        // 256-65535: three bytes
        buf.clear();
        encode_uint(&mut buf, 0, 256);
        assert_eq!(buf, vec![0x19, 0x01, 0x00]);

        buf.clear();
        encode_uint(&mut buf, 0, 1736870400);
        assert_eq!(buf, vec![0x1a, 0x67, 0x86, 0x8a, 0x00]);
    }

    #[test]
    fn test_negative_integer_encoding() {
        let mut buf = Vec::new();
        encode_int(&mut buf, -1);
        assert_eq!(buf, vec![0x20]);

        buf.clear();
        encode_int(&mut buf, -25);
        assert_eq!(buf, vec![0x38, 24]);
    }

    #[test]
    fn test_map_key_ordering() {
        let mut buf = Vec::new();
        let entries = [
            (3, Canon::Uint(80)),
            (0, Canon::Uint(0)),
            (2, Canon::Uint(50)),
        ];
        encode_map_canonical(&mut buf, &entries);

        assert_eq!(buf, vec![0xa3, 0x00, 0x00, 0x02, 0x18, 50, 0x03, 0x18, 80]);
    }

    #[test]
    fn test_canonical_bytes_parse_as_standard_cbor() {
        let bytes = canonical_record_bytes(3, -5, &Digest::from_bytes([9; 32]), b"abc");
        let value: Value = ciborium::from_reader(bytes.as_slice()).unwrap();
        assert!(matches!(value, Value::Map(ref m) if m.len() == 4));
    }

    #[test]
    fn test_record_encode_decode() {
        let previous = Digest::from_bytes([0xaa; 32]);
        let record = Record::new(4, 1736870400, previous, b"payload".to_vec());
        let decoded = decode_record(&encode_record(&record)).unwrap();
        assert_eq!(decoded, record);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(
            decode_record(&[0x01, 0x02]),
            Err(CoreError::DecodeFailed(_))
        ));
        // A valid CBOR value that is not a map.
        assert!(matches!(
            decode_record(&[0x40]),
            Err(CoreError::DecodeFailed(_))
        ));
    }

    proptest! {
        #[test]
        fn test_canonical_bytes_agree_with_ciborium(
            position in any::<u64>(),
            timestamp in any::<i64>(),
            previous in any::<[u8; 32]>(),
            payload in prop::collection::vec(any::<u8>(), 0..256),
        ) {
            let digest = Digest::from_bytes(previous);
            let bytes = canonical_record_bytes(position, timestamp, &digest, &payload);
            let value: Value = ciborium::from_reader(bytes.as_slice()).unwrap();

            let expected = Value::Map(vec![
                (Value::from(0u64), Value::from(position)),
                (Value::from(1u64), Value::from(timestamp)),
                (Value::from(2u64), Value::Bytes(previous.to_vec())),
                (Value::from(3u64), Value::Bytes(payload)),
            ]);
            prop_assert_eq!(value, expected);
        }

        #[test]
        fn test_encoded_record_decodes_unchanged(
            position in any::<u64>(),
            timestamp in any::<i64>(),
            previous in any::<[u8; 32]>(),
            payload in prop::collection::vec(any::<u8>(), 1..256),
        ) {
            let record = Record::new(position, timestamp, Digest::from_bytes(previous), payload);
            let decoded = decode_record(&encode_record(&record)).unwrap();

            prop_assert!(decoded.verify_digest().is_ok());
            prop_assert_eq!(decoded, record);
        }
    }
}
