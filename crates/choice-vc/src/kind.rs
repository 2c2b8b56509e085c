//! # Credential Tag Vocabulary
//!
//! The fixed set of `type` tags the reputation engine recognizes. A
//! credential's `type` may also carry tags outside this set (the W3C
//! `VerifiableCredential` marker is the common one); those are legal and
//! simply map to no [`CredentialKind`].

use serde::{Deserialize, Serialize};

/// A recognized credential tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CredentialKind {
    /// Government-issued identity document.
    #[serde(rename = "government_id")]
    GovernmentId,
    /// Professional attestation.
    #[serde(rename = "professional")]
    Professional,
    /// Formal education attestation.
    #[serde(rename = "education")]
    Education,
    /// Generic social attestation.
    #[serde(rename = "social")]
    Social,
    /// Claim made by the holder about themself.
    #[serde(rename = "self_attested")]
    SelfAttested,
    /// Verified physical document (passport, diploma, license).
    PhysicalCredential,
    /// Verified social media account.
    SocialCredential,
    /// Course completion badge.
    EducationCredential,
    /// On-chain wallet activity analysis.
    WalletHistoryCredential,
}

impl CredentialKind {
    /// Every recognized kind, in vocabulary order.
    pub const ALL: [CredentialKind; 9] = [
        Self::GovernmentId,
        Self::Professional,
        Self::Education,
        Self::Social,
        Self::SelfAttested,
        Self::PhysicalCredential,
        Self::SocialCredential,
        Self::EducationCredential,
        Self::WalletHistoryCredential,
    ];

    /// The tag string as it appears in a credential's `type`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GovernmentId => "government_id",
            Self::Professional => "professional",
            Self::Education => "education",
            Self::Social => "social",
            Self::SelfAttested => "self_attested",
            Self::PhysicalCredential => "PhysicalCredential",
            Self::SocialCredential => "SocialCredential",
            Self::EducationCredential => "EducationCredential",
            Self::WalletHistoryCredential => "WalletHistoryCredential",
        }
    }

    /// Resolve a tag string. Matching is exact and case-sensitive.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == tag)
    }
}

impl std::fmt::Display for CredentialKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
