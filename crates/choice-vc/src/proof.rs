//! # Credential Proof Block
//!
//! The proof object a credential producer may attach. CHOICE iD carries it
//! through storage and pinning untouched; nothing in the scoring path reads
//! or verifies it.

use serde::{Deserialize, Serialize};

use choice_core::Timestamp;

/// A JWS-style proof attached to a credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proof {
    /// Proof suite name (e.g. `"EcdsaSecp256k1Signature2019"`).
    #[serde(rename = "type")]
    pub proof_type: String,

    /// When the proof was created.
    pub created: Timestamp,

    /// The proof purpose, usually `"assertionMethod"`.
    #[serde(rename = "proofPurpose")]
    pub proof_purpose: String,

    /// DID URL of the key that produced the proof.
    #[serde(rename = "verificationMethod")]
    pub verification_method: String,

    /// Detached JWS.
    pub jws: String,
}
