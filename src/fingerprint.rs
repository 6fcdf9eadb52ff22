//! Archive fingerprints
//!
//! A fingerprint is the SHA-1 of the canonical encoding of a metainfo blob's
//! `info` entry, rendered as lowercase hex. For torrents this is the info hash.

use crate::bencode::{DecodeError, MetainfoCodec};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha1::{Digest, Sha1};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Length of a fingerprint in hex characters
pub const FINGERPRINT_HEX_LEN: usize = 40;

/// Lowercase hex SHA-1 digest identifying an archive's content
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(String);

/// Error returned when a string is not a valid fingerprint
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid fingerprint {0:?}: expected 40 hex characters")]
pub struct InvalidFingerprint(pub String);

impl Fingerprint {
    /// Hashes already-canonical bytes
    pub fn of_canonical(bytes: &[u8]) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(bytes);
        Self(hex::encode(hasher.finalize()))
    }

    /// Decodes a blob, extracts its `info` entry and hashes its canonical form
    ///
    /// # Arguments
    ///
    /// * `codec` - The metainfo codec
    /// * `blob` - Raw archive bytes as fetched
    ///
    /// # Returns
    ///
    /// * `Ok(Fingerprint)` - Fingerprint of the `info` entry
    /// * `Err(DecodeError)` - The blob is malformed or has no `info` entry
    pub fn compute<C: MetainfoCodec>(codec: &C, blob: &[u8]) -> Result<Self, DecodeError> {
        let decoded = codec.decode(blob)?;
        let info = codec.info(&decoded)?;
        Ok(Self::of_canonical(&codec.encode_canonical(info)?))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// BitTorrent magnet link for this fingerprint
    pub fn magnet_link(&self) -> String {
        format!("magnet:?xt=urn:btih:{}", self.0)
    }
}

impl FromStr for Fingerprint {
    type Err = InvalidFingerprint;

    /// Accepts upper or lower case hex, stores lower case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != FINGERPRINT_HEX_LEN || !s.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(InvalidFingerprint(s.to_string()));
        }
        Ok(Self(s.to_ascii_lowercase()))
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Fingerprint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Fingerprint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
