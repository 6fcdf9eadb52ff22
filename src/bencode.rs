//! Bencode codec for torrent metainfo files
//!
//! Decoding and encoding are done by `serde_bencode`. This module wraps it in
//! the `MetainfoCodec` trait used by the fingerprinting step.

pub use serde_bencode::value::Value;

use thiserror::Error;

/// Errors that can occur while decoding a metainfo blob
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("malformed bencode: {0}")]
    Malformed(String),

    #[error("top-level value is a {0}, expected a dictionary")]
    NotADictionary(&'static str),

    #[error("metainfo has no \"info\" entry")]
    MissingInfo,

    #[error("failed to re-encode info dictionary: {0}")]
    Encode(String),
}

/// Decoding interface for archive metainfo
///
/// A codec turns a fetched blob into a structured value, exposes its `info`
/// substructure, and re-encodes that substructure canonically so that the
/// fingerprint does not depend on container metadata.
pub trait MetainfoCodec {
    type Value;

    /// Decodes a complete blob
    fn decode(&self, blob: &[u8]) -> Result<Self::Value, DecodeError>;

    /// Returns the `info` substructure of a decoded blob
    fn info<'a>(&self, value: &'a Self::Value) -> Result<&'a Self::Value, DecodeError>;

    /// Canonical byte encoding of a value
    fn encode_canonical(&self, value: &Self::Value) -> Result<Vec<u8>, DecodeError>;
}

/// `MetainfoCodec` for bencoded `.torrent` files
///
/// Re-encoding writes dictionary keys in raw byte order, so two blobs whose
/// `info` dictionaries differ only in key order get the same encoding.
#[derive(Debug, Clone, Copy, Default)]
pub struct BencodeCodec;

impl MetainfoCodec for BencodeCodec {
    type Value = Value;

    fn decode(&self, blob: &[u8]) -> Result<Value, DecodeError> {
        serde_bencode::from_bytes(blob).map_err(|e| DecodeError::Malformed(e.to_string()))
    }

    fn info<'a>(&self, value: &'a Value) -> Result<&'a Value, DecodeError> {
        match value {
            Value::Dict(entries) => entries.get(b"info".as_slice()).ok_or(DecodeError::MissingInfo),
            other => Err(DecodeError::NotADictionary(kind(other))),
        }
    }

    fn encode_canonical(&self, value: &Value) -> Result<Vec<u8>, DecodeError> {
        serde_bencode::to_bytes(value).map_err(|e| DecodeError::Encode(e.to_string()))
    }
}

/// Short type name used in error messages
fn kind(value: &Value) -> &'static str {
    match value {
        Value::Int(_) => "integer",
        Value::Bytes(_) => "byte string",
        Value::List(_) => "list",
        Value::Dict(_) => "dictionary",
    }
}
