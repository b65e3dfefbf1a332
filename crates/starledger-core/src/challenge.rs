//! Ownership verification: time-boxed challenges signed by an address's key.
//!
//! A challenge is the string `"{address}:{issued_at}:{domain_tag}"`. The
//! caller signs it out of band and returns it with the signature. Issuance is
//! stateless; the verifier checks format, freshness and signature.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::clock::Clock;
use crate::crypto::{Address, Ed25519Signature};
use crate::error::OwnershipError;

/// Default domain tag embedded in every challenge.
pub const DEFAULT_DOMAIN_TAG: &str = "starRegistry";

/// Default freshness window.
pub const DEFAULT_FRESHNESS_WINDOW: Duration = Duration::from_secs(300);

/// A parsed ownership challenge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    pub address: Address,
    pub issued_at: i64,
    pub domain_tag: String,
}

impl Challenge {
    /// Parse the textual challenge form.
    ///
    /// Splits on the first two `:`; the domain tag may itself contain colons.
    /// The address and timestamp must be spelled exactly as they are issued.
    pub fn parse(s: &str) -> Result<Self, OwnershipError> {
        let mut parts = s.splitn(3, ':');
        let (address, issued_at, domain_tag) = match (parts.next(), parts.next(), parts.next()) {
            (Some(a), Some(t), Some(d)) if !d.is_empty() => (a, t, d),
            _ => {
                return Err(OwnershipError::MalformedChallenge(
                    "expected address:issued_at:domain_tag".into(),
                ))
            }
        };

        let parsed = Self {
            address: Address::from_hex(address)
                .map_err(|e| OwnershipError::MalformedChallenge(format!("address: {}", e)))?,
            issued_at: issued_at
                .parse::<i64>()
                .map_err(|e| OwnershipError::MalformedChallenge(format!("issued_at: {}", e)))?,
            domain_tag: domain_tag.to_string(),
        };

        // Only the exact form `issue_challenge` produces is accepted: no sign
        // prefix, no leading zeros, lowercase hex.
        if parsed.address.to_hex() != address {
            return Err(OwnershipError::MalformedChallenge(
                "address is not lowercase hex".into(),
            ));
        }
        if parsed.issued_at.to_string() != issued_at {
            return Err(OwnershipError::MalformedChallenge(format!(
                "issued_at {:?} is not in canonical decimal form",
                issued_at
            )));
        }

        Ok(parsed)
    }
}

impl fmt::Display for Challenge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.address, self.issued_at, self.domain_tag)
    }
}

/// Issues and verifies ownership challenges.
///
/// Holds no per-challenge state and is safe to share across threads.
#[derive(Clone)]
pub struct OwnershipVerifier {
    clock: Arc<dyn Clock>,
    window: Duration,
    domain_tag: String,
}

impl OwnershipVerifier {
    /// Create a verifier with explicit settings.
    pub fn new(clock: Arc<dyn Clock>, window: Duration, domain_tag: impl Into<String>) -> Self {
        Self {
            clock,
            window,
            domain_tag: domain_tag.into(),
        }
    }

    /// The freshness window.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// The domain tag this verifier issues and accepts.
    pub fn domain_tag(&self) -> &str {
        &self.domain_tag
    }

    /// Build a challenge for `address` stamped with the current time.
    pub fn issue_challenge(&self, address: &Address) -> String {
        Challenge {
            address: *address,
            issued_at: self.clock.now_secs(),
            domain_tag: self.domain_tag.clone(),
        }
        .to_string()
    }

    /// Verify a signed challenge for `claimed_address`.
    ///
    /// Checks run in order: format, freshness, then address match and
    /// signature. A challenge is stale once `elapsed >= window`, so a
    /// challenge exactly one window old is rejected.
    pub fn verify(
        &self,
        challenge: &str,
        claimed_address: &str,
        signature: &Ed25519Signature,
    ) -> Result<Challenge, OwnershipError> {
        let parsed = Challenge::parse(challenge)?;
        if parsed.domain_tag != self.domain_tag {
            return Err(OwnershipError::MalformedChallenge(format!(
                "unexpected domain tag {:?}",
                parsed.domain_tag
            )));
        }

        let elapsed = self.clock.now_secs().saturating_sub(parsed.issued_at);
        let window = self.window.as_secs();
        if elapsed < 0 || elapsed as u64 >= window {
            return Err(OwnershipError::ChallengeExpired { elapsed, window });
        }

        let claimed =
            Address::from_hex(claimed_address).map_err(|_| OwnershipError::InvalidSignature)?;
        if claimed != parsed.address {
            return Err(OwnershipError::InvalidSignature);
        }
        claimed.verify(challenge.as_bytes(), signature)?;

        Ok(parsed)
    }
}

impl fmt::Debug for OwnershipVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OwnershipVerifier")
            .field("window", &self.window)
            .field("domain_tag", &self.domain_tag)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::crypto::Keypair;

    const T0: i64 = 1736870400;

    fn verifier_at(clock: &ManualClock) -> OwnershipVerifier {
        OwnershipVerifier::new(
            Arc::new(clock.clone()),
            DEFAULT_FRESHNESS_WINDOW,
            DEFAULT_DOMAIN_TAG,
        )
    }

    #[test]
    fn test_issue_challenge_format() {
        let clock = ManualClock::new(T0);
        let verifier = verifier_at(&clock);
        let keypair = Keypair::from_seed(&[0x42; 32]);

        let challenge = verifier.issue_challenge(&keypair.address());
        assert_eq!(
            challenge,
            format!("{}:{}:starRegistry", keypair.address().to_hex(), T0)
        );
    }

    #[test]
    fn test_verify_valid_challenge() {
        let clock = ManualClock::new(T0);
        let verifier = verifier_at(&clock);
        let keypair = Keypair::generate();
        let address = keypair.address().to_hex();

        let challenge = verifier.issue_challenge(&keypair.address());
        let signature = keypair.sign(challenge.as_bytes());

        let parsed = verifier.verify(&challenge, &address, &signature).unwrap();
        assert_eq!(parsed.address, keypair.address());
        assert_eq!(parsed.issued_at, T0);
    }

    #[test]
    fn test_freshness_boundaries() {
        let clock = ManualClock::new(T0);
        let verifier = verifier_at(&clock);
        let keypair = Keypair::generate();
        let address = keypair.address().to_hex();
        let challenge = verifier.issue_challenge(&keypair.address());
        let signature = keypair.sign(challenge.as_bytes());

        clock.set(T0 + 299);
        assert!(verifier.verify(&challenge, &address, &signature).is_ok());

        clock.set(T0 + 300);
        assert_eq!(
            verifier.verify(&challenge, &address, &signature),
            Err(OwnershipError::ChallengeExpired {
                elapsed: 300,
                window: 300
            })
        );

        clock.set(T0 + 301);
        assert!(matches!(
            verifier.verify(&challenge, &address, &signature),
            Err(OwnershipError::ChallengeExpired { elapsed: 301, .. })
        ));
    }

    #[test]
    fn test_window_spans_minute_rollover() {
        // 12:04:50 -> 12:05:10 is 20 seconds, not "one minute".
        let issued = T0 + 4 * 60 + 50;
        let clock = ManualClock::new(issued);
        let verifier = verifier_at(&clock);
        let keypair = Keypair::generate();
        let challenge = verifier.issue_challenge(&keypair.address());
        let signature = keypair.sign(challenge.as_bytes());

        clock.set(issued + 20);
        assert!(verifier
            .verify(&challenge, &keypair.address().to_hex(), &signature)
            .is_ok());
    }

    #[test]
    fn test_future_challenge_is_expired() {
        let clock = ManualClock::new(T0);
        let verifier = verifier_at(&clock);
        let keypair = Keypair::generate();
        let challenge = verifier.issue_challenge(&keypair.address());
        let signature = keypair.sign(challenge.as_bytes());

        clock.set(T0 - 1);
        assert!(matches!(
            verifier.verify(&challenge, &keypair.address().to_hex(), &signature),
            Err(OwnershipError::ChallengeExpired { elapsed: -1, .. })
        ));
    }

    #[test]
    fn test_malformed_challenges() {
        let clock = ManualClock::new(T0);
        let verifier = verifier_at(&clock);
        let keypair = Keypair::generate();
        let address = keypair.address().to_hex();

        let cases = [
            String::new(),
            "no-colons".to_string(),
            format!("{}:{}", address, T0),
            format!("{}:{}:", address, T0),
            format!("{}:notanumber:starRegistry", address),
            format!("zz:{}:starRegistry", T0),
            format!("{}:{}:otherRegistry", address, T0),
        ];

        for challenge in cases {
            let signature = keypair.sign(challenge.as_bytes());
            assert!(
                matches!(
                    verifier.verify(&challenge, &address, &signature),
                    Err(OwnershipError::MalformedChallenge(_))
                ),
                "expected malformed for {:?}",
                challenge
            );
        }
    }

    #[test]
    fn test_address_mismatch_is_invalid_signature() {
        let clock = ManualClock::new(T0);
        let verifier = verifier_at(&clock);
        let owner = Keypair::generate();
        let intruder = Keypair::generate();

        let challenge = verifier.issue_challenge(&owner.address());
        let signature = intruder.sign(challenge.as_bytes());

        assert_eq!(
            verifier.verify(&challenge, &intruder.address().to_hex(), &signature),
            Err(OwnershipError::InvalidSignature)
        );
    }

    #[test]
    fn test_wrong_key_is_invalid_signature() {
        let clock = ManualClock::new(T0);
        let verifier = verifier_at(&clock);
        let owner = Keypair::generate();
        let intruder = Keypair::generate();

        let challenge = verifier.issue_challenge(&owner.address());
        let signature = intruder.sign(challenge.as_bytes());

        assert_eq!(
            verifier.verify(&challenge, &owner.address().to_hex(), &signature),
            Err(OwnershipError::InvalidSignature)
        );
    }

    #[test]
    fn test_unparseable_claimed_address() {
        let clock = ManualClock::new(T0);
        let verifier = verifier_at(&clock);
        let owner = Keypair::generate();
        let challenge = verifier.issue_challenge(&owner.address());
        let signature = owner.sign(challenge.as_bytes());

        assert_eq!(
            verifier.verify(&challenge, "not-hex", &signature),
            Err(OwnershipError::InvalidSignature)
        );
    }

    #[test]
    fn test_only_issued_spelling_is_accepted() {
        let clock = ManualClock::new(T0);
        let verifier = verifier_at(&clock);
        let keypair = Keypair::generate();
        let address = keypair.address().to_hex();

        let cases = [
            format!("{}:+{}:starRegistry", address, T0),
            format!("{}:000{}:starRegistry", address, T0),
            format!("{}:{}:starRegistry", address.to_uppercase(), T0),
        ];

        for challenge in cases {
            let signature = keypair.sign(challenge.as_bytes());
            assert!(
                matches!(
                    verifier.verify(&challenge, &address, &signature),
                    Err(OwnershipError::MalformedChallenge(_))
                ),
                "expected malformed for {:?}",
                challenge
            );
        }

        assert!(Challenge::parse(&format!("{}:-0:tag", address)).is_err());
        let zero = format!("{}:0:tag", address);
        assert_eq!(Challenge::parse(&zero).unwrap().issued_at, 0);
        let negative = format!("{}:-5:tag", address);
        assert_eq!(Challenge::parse(&negative).unwrap().issued_at, -5);
    }

    #[test]
    fn test_verifier_reports_settings() {
        let clock = ManualClock::new(T0);
        let verifier = OwnershipVerifier::new(
            Arc::new(clock),
            Duration::from_secs(42),
            "testRegistry",
        );

        assert_eq!(verifier.window(), Duration::from_secs(42));
        assert_eq!(verifier.domain_tag(), "testRegistry");
    }

    #[test]
    fn test_domain_tag_may_contain_colons() {
        let keypair = Keypair::generate();
        let raw = format!("{}:{}:app:v2", keypair.address(), T0);
        let parsed = Challenge::parse(&raw).unwrap();
        assert_eq!(parsed.domain_tag, "app:v2");
        assert_eq!(parsed.to_string(), raw);
    }
}
