//! Consumed-challenge tracking.
//!
//! Off by default. When enabled, a challenge that has been used for a
//! successful submission is refused for the rest of its freshness window.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use starledger_core::{Challenge, OwnershipError};

/// Set of challenges consumed within the freshness window.
#[derive(Debug)]
pub struct ReplayGuard {
    window: Duration,
    /// Challenge string -> issued_at.
    consumed: Mutex<HashMap<String, i64>>,
}

impl ReplayGuard {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            consumed: Mutex::new(HashMap::new()),
        }
    }

    /// Claim a verified challenge for one submission.
    ///
    /// Entries older than the window are pruned first; they can no longer
    /// pass freshness anyway.
    pub fn reserve(
        &self,
        raw: &str,
        challenge: &Challenge,
        now: i64,
    ) -> Result<(), OwnershipError> {
        let window = self.window.as_secs() as i64;
        let mut consumed = self
            .consumed
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        consumed.retain(|_, issued_at| now.saturating_sub(*issued_at) < window);

        if consumed.contains_key(raw) {
            return Err(OwnershipError::ChallengeReplayed);
        }
        consumed.insert(raw.to_string(), challenge.issued_at);
        Ok(())
    }

    /// Give back a reservation whose submission failed.
    pub fn release(&self, raw: &str) {
        let mut consumed = self
            .consumed
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        consumed.remove(raw);
    }

    /// Number of challenges currently held.
    pub fn len(&self) -> usize {
        self.consumed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use starledger_core::Keypair;

    fn challenge_at(issued_at: i64) -> (String, Challenge) {
        let challenge = Challenge {
            address: Keypair::from_seed(&[0x01; 32]).address(),
            issued_at,
            domain_tag: "starRegistry".into(),
        };
        (challenge.to_string(), challenge)
    }

    #[test]
    fn test_second_reserve_is_replay() {
        let guard = ReplayGuard::new(Duration::from_secs(300));
        let (raw, challenge) = challenge_at(1000);

        guard.reserve(&raw, &challenge, 1010).unwrap();
        assert_eq!(
            guard.reserve(&raw, &challenge, 1020),
            Err(OwnershipError::ChallengeReplayed)
        );
    }

    #[test]
    fn test_release_allows_retry() {
        let guard = ReplayGuard::new(Duration::from_secs(300));
        let (raw, challenge) = challenge_at(1000);

        guard.reserve(&raw, &challenge, 1010).unwrap();
        guard.release(&raw);
        assert!(guard.reserve(&raw, &challenge, 1011).is_ok());
    }

    #[test]
    fn test_expired_entries_are_pruned() {
        let guard = ReplayGuard::new(Duration::from_secs(300));
        let (old_raw, old) = challenge_at(1000);
        let (new_raw, new) = challenge_at(1200);

        guard.reserve(&old_raw, &old, 1010).unwrap();
        guard.reserve(&new_raw, &new, 1300).unwrap();
        assert_eq!(guard.len(), 1);
    }
}
