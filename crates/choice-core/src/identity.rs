//! # Identity Newtypes
//!
//! Domain-primitive newtypes for the identifiers that own a credential
//! ledger. You cannot pass a [`Did`] where an [`Address`] is expected.
//!
//! ## Validation
//!
//! Both types validate at construction and on deserialization. The
//! validating `Deserialize` impl routes through `new()`, so an invalid
//! value in a stored identity is rejected when it is loaded rather than
//! silently accepted.
//!
//! ## DID derivation
//!
//! [`generate_did()`] is the only place a DID is derived from an address:
//! lower-case the address and prefix it with [`DID_METHOD_PREFIX`]. The
//! transform is pure; no collision handling is needed because addresses
//! are already unique.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// The DID method prefix used for wallet-derived identities.
pub const DID_METHOD_PREFIX: &str = "did:ethr:";

/// Helper macro to implement `Deserialize` for string newtypes that must
/// validate their contents.
macro_rules! impl_validating_deserialize {
    ($ty:ident) => {
        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                Self::new(raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

/// A blockchain account identifier. Owner key of an identity's ledger.
///
/// The original spelling is preserved (EVM addresses are often written in
/// mixed-case checksum form). Use [`Address::storage_key()`] wherever two
/// spellings of the same account must collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Address(String);

impl_validating_deserialize!(Address);

impl Address {
    /// Create an address, rejecting empty input and embedded whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if s.is_empty() || s.chars().any(char::is_whitespace) {
            return Err(ValidationError::InvalidAddress(s));
        }
        Ok(Self(s))
    }

    /// The address as originally written.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lower-cased form, used for DID derivation, hashing, and store keys.
    pub fn storage_key(&self) -> String {
        self.0.to_lowercase()
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Address {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// W3C Decentralized Identifier (DID).
///
/// Format: `did:<method>:<method-specific-id>` where the method is
/// lowercase alphanumeric and the method-specific id is non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Did(String);

impl_validating_deserialize!(Did);

impl Did {
    /// Create a DID from a string, validating format.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidDid`] if the string does not
    /// match the `did:method:identifier` format.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        Self::validate(&s)?;
        Ok(Self(s))
    }

    fn validate(s: &str) -> Result<(), ValidationError> {
        let Some(rest) = s.strip_prefix("did:") else {
            return Err(ValidationError::InvalidDid(s.to_string()));
        };
        let Some((method, identifier)) = rest.split_once(':') else {
            return Err(ValidationError::InvalidDid(s.to_string()));
        };
        if method.is_empty()
            || !method
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
            || identifier.is_empty()
        {
            return Err(ValidationError::InvalidDid(s.to_string()));
        }
        Ok(())
    }

    /// Access the DID string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Return the DID method (the part between the first and second colons).
    pub fn method(&self) -> &str {
        self.0[4..].split(':').next().unwrap_or_default()
    }

    /// Return the method-specific identifier (everything after `did:method:`).
    pub fn method_specific_id(&self) -> &str {
        self.0[4..]
            .split_once(':')
            .map(|(_, id)| id)
            .unwrap_or_default()
    }
}

impl std::fmt::Display for Did {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Derive the DID for a wallet address.
///
/// Deterministic: the same address (in any letter case) always yields the
/// same lower-case DID.
pub fn generate_did(address: &Address) -> Did {
    // A validated address is non-empty and whitespace-free, so the result
    // always satisfies the DID grammar.
    Did(format!("{DID_METHOD_PREFIX}{}", address.storage_key()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_rejects_empty_and_whitespace() {
        assert!(Address::new("").is_err());
        assert!(Address::new("0xabc def").is_err());
        assert!(Address::new(" 0xabc").is_err());
    }

    #[test]
    fn address_preserves_spelling() {
        let addr = Address::new("0xAbC123").unwrap();
        assert_eq!(addr.as_str(), "0xAbC123");
        assert_eq!(addr.storage_key(), "0xabc123");
    }

    #[test]
    fn generate_did_is_lowercase_and_deterministic() {
        let addr = Address::new("0xABCDEF0123456789").unwrap();
        let a = generate_did(&addr);
        let b = generate_did(&addr);
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "did:ethr:0xabcdef0123456789");
        assert_eq!(a.as_str(), a.as_str().to_lowercase());
    }

    #[test]
    fn generate_did_ignores_address_case() {
        let upper = Address::new("0xABC").unwrap();
        let lower = Address::new("0xabc").unwrap();
        assert_eq!(generate_did(&upper), generate_did(&lower));
    }

    #[test]
    fn generated_did_is_valid() {
        let did = generate_did(&Address::new("0x1").unwrap());
        assert!(Did::new(did.as_str()).is_ok());
        assert_eq!(did.method(), "ethr");
        assert_eq!(did.method_specific_id(), "0x1");
    }

    #[test]
    fn did_validation() {
        assert!(Did::new("did:web:choice.love").is_ok());
        assert!(Did::new("did:ethr:0xabc").is_ok());
        assert!(Did::new("did:web").is_err());
        assert!(Did::new("did::abc").is_err());
        assert!(Did::new("did:Web:abc").is_err());
        assert!(Did::new("did:web:").is_err());
        assert!(Did::new("web:abc").is_err());
    }

    #[test]
    fn did_method_specific_id_keeps_inner_colons() {
        let did = Did::new("did:web:choice.love:education").unwrap();
        assert_eq!(did.method(), "web");
        assert_eq!(did.method_specific_id(), "choice.love:education");
    }

    #[test]
    fn deserialize_rejects_invalid() {
        assert!(serde_json::from_str::<Did>("\"not-a-did\"").is_err());
        assert!(serde_json::from_str::<Address>("\"\"").is_err());
        let addr: Address = serde_json::from_str("\"0xAB\"").unwrap();
        assert_eq!(addr.as_str(), "0xAB");
    }
}
