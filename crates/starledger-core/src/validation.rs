//! Chain validation: digest recomputation and linkage checks.
//!
//! Validation is an audit. It walks every record in order, runs every check
//! on every record, and returns the full list of findings. An empty list means
//! the chain is intact.

use crate::error::ValidationError;
use crate::record::Record;
use crate::types::Digest;

/// Validate a chain snapshot.
///
/// For each record, independently:
/// - the stored position must equal its index
/// - the recomputed digest must equal the stored digest
/// - `previous_digest` must equal the stored digest of the record before it,
///   or `Digest::ZERO` for the first record
///
/// Linkage is checked against the predecessor's *stored* digest, so a record
/// whose digest was overwritten shows up as `TamperedBody` on itself and
/// `BrokenLink` on its successor.
pub fn validate_chain(records: &[Record]) -> Vec<ValidationError> {
    if records.is_empty() {
        return vec![ValidationError::EmptyChain];
    }

    let mut findings = Vec::new();
    let mut expected_previous = Digest::ZERO;

    for (index, record) in records.iter().enumerate() {
        let index = index as u64;

        if record.position != index {
            findings.push(ValidationError::PositionMismatch {
                index,
                position: record.position,
            });
        }

        if let Err(finding) = record.verify_digest() {
            findings.push(finding);
        }

        if record.previous_digest != expected_previous {
            findings.push(ValidationError::BrokenLink {
                position: record.position,
                expected: expected_previous,
                actual: record.previous_digest,
            });
        }

        expected_previous = record.digest;
    }

    findings
}

/// Whether a chain snapshot has no findings.
pub fn is_valid_chain(records: &[Record]) -> bool {
    validate_chain(records).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn build_chain(len: u64) -> Vec<Record> {
        let mut records = vec![Record::genesis(1000, b"Genesis Block".to_vec())];
        for position in 1..len {
            let prev = records[position as usize - 1].digest;
            records.push(Record::new(
                position,
                1000 + position as i64,
                prev,
                format!("payload {}", position).into_bytes(),
            ));
        }
        records
    }

    #[test]
    fn test_valid_chain_has_no_findings() {
        let chain = build_chain(5);
        assert!(validate_chain(&chain).is_empty());
        assert!(is_valid_chain(&chain));
    }

    #[test]
    fn test_empty_chain() {
        assert_eq!(validate_chain(&[]), vec![ValidationError::EmptyChain]);
    }

    #[test]
    fn test_payload_tamper_reports_only_tampered_body() {
        let mut chain = build_chain(3);
        chain[1].payload = Bytes::from_static(b"rewritten");

        let findings = validate_chain(&chain);
        assert_eq!(findings.len(), 1);
        assert!(matches!(
            findings[0],
            ValidationError::TamperedBody { position: 1, .. }
        ));
    }

    #[test]
    fn test_digest_tamper_cascades_to_next_link() {
        let mut chain = build_chain(3);
        let original = chain[1].digest;
        chain[1].digest = Digest::from_bytes([0xee; 32]);

        let findings = validate_chain(&chain);
        assert_eq!(findings.len(), 2);
        assert_eq!(
            findings[0],
            ValidationError::TamperedBody {
                position: 1,
                recorded: Digest::from_bytes([0xee; 32]),
                expected: original,
            }
        );
        assert_eq!(
            findings[1],
            ValidationError::BrokenLink {
                position: 2,
                expected: Digest::from_bytes([0xee; 32]),
                actual: original,
            }
        );
    }

    #[test]
    fn test_record_can_produce_both_findings() {
        let mut chain = build_chain(3);
        chain[2].previous_digest = Digest::from_bytes([0x01; 32]);

        let findings = validate_chain(&chain);
        assert_eq!(findings.len(), 2);
        assert!(findings.iter().all(|f| f.position() == Some(2)));
    }

    #[test]
    fn test_genesis_with_non_sentinel_previous() {
        let mut chain = build_chain(1);
        chain[0] = Record::new(0, 1000, Digest::from_bytes([0x05; 32]), b"g".to_vec());

        let findings = validate_chain(&chain);
        assert_eq!(
            findings,
            vec![ValidationError::BrokenLink {
                position: 0,
                expected: Digest::ZERO,
                actual: Digest::from_bytes([0x05; 32]),
            }]
        );
    }

    #[test]
    fn test_position_mismatch_reported() {
        let chain = vec![
            Record::genesis(1000, b"g".to_vec()),
        ];
        let skipped = Record::new(2, 1001, chain[0].digest, b"x".to_vec());
        let chain = vec![chain[0].clone(), skipped];

        let findings = validate_chain(&chain);
        assert_eq!(
            findings,
            vec![ValidationError::PositionMismatch {
                index: 1,
                position: 2
            }]
        );
    }

    #[test]
    fn test_validation_does_not_short_circuit() {
        let mut chain = build_chain(6);
        chain[1].payload = Bytes::from_static(b"x");
        chain[4].payload = Bytes::from_static(b"y");

        let positions: Vec<_> = validate_chain(&chain)
            .iter()
            .filter_map(|f| f.position())
            .collect();
        assert_eq!(positions, vec![1, 4]);
    }
}
