//! Star entries: the structured payload carried by non-genesis records.
//!
//! The ledger itself treats payloads as opaque bytes. This codec is what the
//! owner query uses to interpret them.

use serde::{Deserialize, Serialize};

use crate::challenge::Challenge;
use crate::crypto::{Address, Ed25519Signature};
use crate::error::CoreError;

/// Celestial coordinates and a story, registered by an owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Star {
    /// Right ascension, e.g. `"16h 29m 1.0s"`.
    pub ra: String,

    /// Declination, e.g. `"-26° 29' 24.9"`.
    pub dec: String,

    /// Free-form story supplied by the owner.
    pub story: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub magnitude: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constellation: Option<String>,
}

impl Star {
    /// Create a star with the required fields.
    pub fn new(ra: impl Into<String>, dec: impl Into<String>, story: impl Into<String>) -> Self {
        Self {
            ra: ra.into(),
            dec: dec.into(),
            story: story.into(),
            magnitude: None,
            constellation: None,
        }
    }

    /// Set the apparent magnitude.
    pub fn magnitude(mut self, magnitude: impl Into<String>) -> Self {
        self.magnitude = Some(magnitude.into());
        self
    }

    /// Set the constellation.
    pub fn constellation(mut self, constellation: impl Into<String>) -> Self {
        self.constellation = Some(constellation.into());
        self
    }
}

/// The decoded payload of a star registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarEntry {
    /// The ownership challenge that was signed.
    pub message: String,

    /// Signature over `message`, hex encoded.
    pub signature: String,

    /// The registered star.
    pub star: Star,
}

impl StarEntry {
    /// Create a new entry.
    pub fn new(message: impl Into<String>, signature: &Ed25519Signature, star: Star) -> Self {
        Self {
            message: message.into(),
            signature: signature.to_hex(),
            star,
        }
    }

    /// The owner address embedded in the signed message.
    pub fn owner(&self) -> Result<Address, CoreError> {
        Challenge::parse(&self.message)
            .map(|c| c.address)
            .map_err(|e| CoreError::DecodeFailed(format!("entry message: {}", e)))
    }

    /// Serialize to CBOR bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CoreError> {
        let mut buf = Vec::new();
        ciborium::into_writer(self, &mut buf).map_err(|e| CoreError::EncodingError(e.to_string()))?;
        Ok(buf)
    }

    /// Deserialize from CBOR bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CoreError> {
        ciborium::from_reader(bytes).map_err(|e| CoreError::DecodeFailed(e.to_string()))
    }
}

/// A star together with the address that owns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnedStar {
    pub owner: Address,
    pub star: Star,
}
