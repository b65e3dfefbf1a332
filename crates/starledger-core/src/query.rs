//! Read-only scans over a chain snapshot.

use crate::crypto::Address;
use crate::error::CoreError;
use crate::payload::OwnedStar;
use crate::record::Record;
use crate::types::Digest;

/// Result of scanning a snapshot for one owner's stars.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OwnerScan {
    /// Matching stars, in append order.
    pub matches: Vec<OwnedStar>,

    /// Positions whose payload could not be decoded, with the reason.
    pub skipped: Vec<(u64, String)>,
}

/// First record with the given digest.
pub fn find_by_digest<'a>(records: &'a [Record], digest: &Digest) -> Option<&'a Record> {
    records.iter().find(|r| r.digest == *digest)
}

/// Record at the given position.
///
/// Indexes directly when the slot holds the expected position and falls back
/// to a scan otherwise.
pub fn find_by_position(records: &[Record], position: u64) -> Option<&Record> {
    let index = usize::try_from(position).ok()?;
    match records.get(index) {
        Some(r) if r.position == position => Some(r),
        _ => records.iter().find(|r| r.position == position),
    }
}

/// All stars owned by `owner`.
///
/// The genesis record is not decoded. Records whose payload does not decode,
/// or whose message carries no parseable owner, are reported in
/// [`OwnerScan::skipped`] rather than failing the scan.
pub fn stars_by_owner(records: &[Record], owner: &Address) -> OwnerScan {
    let mut scan = OwnerScan::default();

    for record in records.iter().filter(|r| !r.is_genesis()) {
        let decoded = record
            .decode_payload()
            .and_then(|entry| entry.owner().map(|addr| (addr, entry)));

        match decoded {
            Ok((addr, entry)) if addr == *owner => scan.matches.push(OwnedStar {
                owner: addr,
                star: entry.star,
            }),
            Ok(_) => {}
            Err(CoreError::DecodeFailed(reason)) | Err(CoreError::EncodingError(reason)) => {
                scan.skipped.push((record.position, reason))
            }
        }
    }

    scan
}
