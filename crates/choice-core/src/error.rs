//! # Error Types — Structured Error Hierarchy
//!
//! Error types shared across the CHOICE iD crates. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Validation errors carry the rejected input so callers can report it.
//! - Cryptographic errors fail loudly. A decryption failure is never turned
//!   into an empty result by this crate or its dependents.

use thiserror::Error;

/// Error during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// JSON serialization failed.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

/// Validation failure for a domain primitive.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Wallet address is empty or contains whitespace.
    #[error("invalid wallet address: {0:?}")]
    InvalidAddress(String),

    /// DID does not match `did:<method>:<identifier>`.
    #[error("invalid DID: {0:?}")]
    InvalidDid(String),

    /// Timestamp is not a recognizable ISO-8601 instant or date.
    #[error("invalid timestamp {value:?}: {reason}")]
    InvalidTimestamp {
        /// The rejected input.
        value: String,
        /// Why parsing failed.
        reason: String,
    },
}

/// Error in cryptographic operations.
#[derive(Error, Debug)]
pub enum CryptoError {
    /// Encryption failed.
    #[error("encryption failed: {0}")]
    Encryption(String),

    /// Decryption failed, typically because the key does not match.
    #[error("decryption failed: {0}")]
    Decryption(String),

    /// Ciphertext is not well-formed (bad hex, truncated nonce).
    #[error("malformed ciphertext: {0}")]
    MalformedCiphertext(String),

    /// Digest computation failed.
    #[error("digest error: {0}")]
    DigestError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_error_names_value() {
        let err = ValidationError::InvalidTimestamp {
            value: "yesterday".to_string(),
            reason: "no digits".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("yesterday"));
        assert!(msg.contains("no digits"));
    }
}
