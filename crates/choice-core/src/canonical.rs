//! # Canonical Serialization — JCS Byte Production
//!
//! Defines [`CanonicalBytes`], the sole construction path for bytes that
//! feed a content digest: IPFS-style content identifiers for credentials
//! and the commitments inside threshold proofs.
//!
//! ## Invariant
//!
//! The inner `Vec<u8>` is private. The only constructor serializes through
//! `serde_jcs` (RFC 8785): sorted object keys, compact separators, and the
//! ECMAScript number rendering. Two structurally equal values always
//! produce identical bytes regardless of field order in the source
//! document, so a credential pinned from one producer and re-fetched
//! through another hashes to the same identifier.
//!
//! Credential subjects legitimately carry fractional numbers (verification
//! confidence, ETH volumes), so floats are rendered per RFC 8785 rather
//! than rejected.

use serde::Serialize;
use serde_json::Value;

use crate::error::CanonicalizationError;

/// Bytes produced exclusively by RFC 8785 canonicalization.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Construct canonical bytes from any serializable value.
    ///
    /// # Errors
    ///
    /// Returns `CanonicalizationError::SerializationFailed` if the value
    /// cannot be represented as JSON (e.g. a map with non-string keys).
    pub fn new(obj: &impl Serialize) -> Result<Self, CanonicalizationError> {
        let value = serde_json::to_value(obj)?;
        Self::from_value(value)
    }

    /// Construct canonical bytes from an already-built JSON value.
    pub fn from_value(value: Value) -> Result<Self, CanonicalizationError> {
        let s = serde_jcs::to_string(&value)?;
        Ok(Self(s.into_bytes()))
    }

    /// Access the canonical bytes for digest computation.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the length of the canonical byte sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the canonical byte sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
