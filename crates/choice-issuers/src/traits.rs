//! # Issuer Capabilities
//!
//! One trait per external service a credential producer depends on. The
//! live integrations (OAuth providers, OCR, block explorers) sit outside
//! this workspace; callers inject an implementation and tests use the
//! deterministic mocks in [`crate::mock`].

use serde::{Deserialize, Serialize};

use choice_core::{Address, Timestamp};

use crate::error::IssuerError;

// ---------------------------------------------------------------------------
// Social
// ---------------------------------------------------------------------------

/// Analytics for a connected social account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialProfile {
    /// Platform display name (e.g. `"GitHub"`, `"X (Twitter)"`).
    pub platform: String,
    /// Account handle on the platform.
    pub handle: String,
    /// Whether the platform confirmed ownership.
    pub verified: bool,
    /// Follower count.
    pub followers: u64,
    /// Post count.
    pub posts: u64,
    /// Comment count.
    pub comments: u64,
    /// Dominant content sector.
    pub sector: String,
    /// Self-described mission.
    pub mission: String,
    /// Engagement rate, formatted as a percentage (e.g. `"12.34%"`).
    pub engagement_rate: String,
    /// Estimated bot probability, formatted as a percentage.
    pub bot_probability: String,
    /// Behavioural classification.
    pub behavior_score: String,
}

/// Verifies ownership of a social account and reports its analytics.
pub trait SocialConnector: Send + Sync {
    /// Connect `handle` on `platform`.
    fn connect(&self, platform: &str, handle: &str) -> Result<SocialProfile, IssuerError>;
}

// ---------------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------------

/// Category of an uploaded physical document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    /// Academic diploma.
    Diploma,
    /// Professional certification.
    Certification,
    /// Award or honour.
    Award,
    /// Government-issued identity document.
    #[serde(rename = "ID")]
    Id,
}

impl DocumentType {
    /// The label stored in the credential subject.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Diploma => "Diploma",
            Self::Certification => "Certification",
            Self::Award => "Award",
            Self::Id => "ID",
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DocumentType {
    type Err = IssuerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "diploma" => Ok(Self::Diploma),
            "certification" => Ok(Self::Certification),
            "award" => Ok(Self::Award),
            "id" => Ok(Self::Id),
            other => Err(IssuerError::InvalidInput(format!(
                "unknown document type {other:?}"
            ))),
        }
    }
}

/// Outcome of a document check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentVerification {
    /// Whether the document was accepted.
    pub verified: bool,
    /// Name of the verifying service.
    pub issuer: String,
    /// Verifier confidence in `0.0..=1.0`.
    pub confidence: f64,
}

/// Checks an uploaded document.
pub trait DocumentVerifier: Send + Sync {
    /// Verify `contents`, uploaded as `file_name`, as a `document_type`.
    fn verify(
        &self,
        document_type: DocumentType,
        file_name: &str,
        contents: &[u8],
    ) -> Result<DocumentVerification, IssuerError>;
}

// ---------------------------------------------------------------------------
// Wallet history
// ---------------------------------------------------------------------------

/// On-chain history summary for a wallet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletAnalysis {
    /// Earliest observed transaction.
    pub first_tx_date: Timestamp,
    /// Total transactions.
    pub tx_count: u64,
    /// Lifetime volume in ETH.
    pub total_volume_eth: f64,
    /// Lifetime gas spend in ETH.
    pub gas_spent_eth: f64,
    /// Protocols the wallet has interacted with.
    pub protocols: Vec<String>,
    /// Behavioural labels (e.g. `"OG Holder"`).
    pub expertises: Vec<String>,
    /// Current holdings in USD.
    pub assets_value_usd: f64,
    /// Number of distinct assets held.
    pub asset_count: u64,
}

/// Analyses a wallet's on-chain history.
pub trait WalletHistoryAnalyzer: Send + Sync {
    /// Analyse `address` as of `now`.
    fn analyze(&self, address: &Address, now: &Timestamp) -> Result<WalletAnalysis, IssuerError>;
}

/// A transaction as listed by a block explorer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction hash.
    #[serde(default)]
    pub hash: String,
    /// Block time in epoch seconds, as a decimal string.
    #[serde(rename = "timeStamp")]
    pub time_stamp: String,
}

impl Transaction {
    /// Build a transaction from a hash and an epoch-seconds block time.
    pub fn new(hash: impl Into<String>, epoch_secs: i64) -> Self {
        Self {
            hash: hash.into(),
            time_stamp: epoch_secs.to_string(),
        }
    }

    /// Parse the block time.
    pub fn timestamp(&self) -> Result<Timestamp, IssuerError> {
        let secs: i64 = self.time_stamp.trim().parse().map_err(|_| {
            IssuerError::Unavailable(format!(
                "transaction {} has non-numeric timeStamp {:?}",
                self.hash, self.time_stamp
            ))
        })?;
        Timestamp::from_epoch_secs(secs)
            .map_err(|e| IssuerError::Unavailable(format!("transaction {}: {e}", self.hash)))
    }
}

/// Lists a wallet's transactions.
pub trait TransactionSource: Send + Sync {
    /// Every transaction for `address`, in any order.
    fn transactions(&self, address: &Address) -> Result<Vec<Transaction>, IssuerError>;
}
