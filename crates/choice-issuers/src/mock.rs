//! # Mock Issuer Capabilities
//!
//! Deterministic stand-ins for the external services in [`crate::traits`].
//! Every figure is derived from a SHA-256 of the request, so repeated calls
//! agree and tests can assert exact payloads.
//!
//! These are demonstration data sources. Nothing they report has been
//! observed anywhere.

use std::collections::HashMap;

use chrono::Months;
use sha2::{Digest, Sha256};

use choice_core::{Address, Timestamp};

use crate::error::IssuerError;
use crate::traits::{
    DocumentType, DocumentVerification, DocumentVerifier, SocialConnector, SocialProfile,
    Transaction, TransactionSource, WalletAnalysis, WalletHistoryAnalyzer,
};

const SECTORS: [&str; 6] = [
    "Web3 Development",
    "Digital Art & NFT",
    "DeFi Finance",
    "Blockchain Marketing",
    "AI Research",
    "Community Management",
];

const MISSIONS: [&str; 5] = [
    "Building the decentralized future of finance",
    "Scaling Ethereum for the next billion users",
    "Advocating for digital privacy and sovereignty",
    "Creating digital art that transcends boundaries",
    "Connecting global communities on-chain",
];

const PROTOCOLS: [&str; 5] = ["Uniswap", "Aave", "OpenSea", "Curve", "GMX"];

/// Verifier name reported by [`MockDocumentVerifier`].
pub const MOCK_VERIFIER_NAME: &str = "Choice AI Verifier";

/// Four pseudo-random words from a SHA-256 over the parts.
fn seed_words(parts: &[&[u8]]) -> [u64; 4] {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update((part.len() as u64).to_be_bytes());
        hasher.update(part);
    }
    let digest = hasher.finalize();
    let mut words = [0u64; 4];
    for (word, chunk) in words.iter_mut().zip(digest.chunks_exact(8)) {
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(chunk);
        *word = u64::from_be_bytes(bytes);
    }
    words
}

fn pick<'a>(options: &[&'a str], word: u64) -> &'a str {
    options[(word % options.len() as u64) as usize]
}

// ---------------------------------------------------------------------------
// Social
// ---------------------------------------------------------------------------

/// Reports stable synthetic analytics for any handle.
#[derive(Debug, Default, Clone, Copy)]
pub struct MockSocialConnector;

impl SocialConnector for MockSocialConnector {
    fn connect(&self, platform: &str, handle: &str) -> Result<SocialProfile, IssuerError> {
        let platform = platform.trim();
        let handle = handle.trim();
        if platform.is_empty() || handle.is_empty() {
            return Err(IssuerError::InvalidInput(
                "platform and handle must be non-empty".to_string(),
            ));
        }
        let [w0, w1, w2, w3] = seed_words(&[platform.as_bytes(), handle.as_bytes()]);

        let followers = w0 % 8000 + 500;
        let posts = w1 % 1200 + 50;
        // Between one and six comments per post.
        let comments = posts * (100 + w2 % 500) / 100;
        let engagement_hundredths = (comments + posts * 2) * 10_000 / followers;
        let bot_tenths = w3 % 50;

        tracing::debug!(platform, handle, followers, "mock social connection");
        Ok(SocialProfile {
            platform: platform.to_string(),
            handle: handle.to_string(),
            verified: true,
            followers,
            posts,
            comments,
            sector: pick(&SECTORS, w2 >> 32).to_string(),
            mission: pick(&MISSIONS, w3 >> 32).to_string(),
            engagement_rate: format!(
                "{}.{:02}%",
                engagement_hundredths / 100,
                engagement_hundredths % 100
            ),
            bot_probability: format!("{}.{}%", bot_tenths / 10, bot_tenths % 10),
            behavior_score: "Organic / High Authority".to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------------

/// Accepts any non-empty upload with fixed confidence.
#[derive(Debug, Default, Clone, Copy)]
pub struct MockDocumentVerifier;

impl DocumentVerifier for MockDocumentVerifier {
    fn verify(
        &self,
        document_type: DocumentType,
        file_name: &str,
        contents: &[u8],
    ) -> Result<DocumentVerification, IssuerError> {
        if file_name.trim().is_empty() {
            return Err(IssuerError::InvalidInput("file name is empty".to_string()));
        }
        let verified = !contents.is_empty();
        tracing::debug!(%document_type, file_name, verified, "mock document check");
        Ok(DocumentVerification {
            verified,
            issuer: MOCK_VERIFIER_NAME.to_string(),
            confidence: if verified { 0.98 } else { 0.0 },
        })
    }
}

// ---------------------------------------------------------------------------
// Wallet history
// ---------------------------------------------------------------------------

/// Synthesizes a wallet history from the address characters.
///
/// The seed is the sum of the third and last character codes, so checksum
/// casing changes the result.
#[derive(Debug, Default, Clone, Copy)]
pub struct MockWalletAnalyzer;

impl WalletHistoryAnalyzer for MockWalletAnalyzer {
    fn analyze(&self, address: &Address, now: &Timestamp) -> Result<WalletAnalysis, IssuerError> {
        let bytes = address.as_str().as_bytes();
        let (Some(third), Some(last)) = (bytes.get(2), bytes.last()) else {
            return Err(IssuerError::InvalidInput(format!(
                "address {address} is too short to analyse"
            )));
        };
        let seed = u64::from(*third) + u64::from(*last);
        let years_old = seed % 6 + 1;
        let tx_count = seed * 25 + 100;

        // seed is at most 510, so the month count fits comfortably.
        let back = Months::new((years_old * 12 + seed % 12) as u32);
        let first_tx_date = now
            .as_datetime()
            .checked_sub_months(back)
            .map(Timestamp::from_utc)
            .ok_or_else(|| {
                IssuerError::InvalidInput(format!("cannot date history {back:?} before {now}"))
            })?;

        let mut expertises = Vec::new();
        if tx_count > 500 {
            expertises.push("DeFi Power User".to_string());
        }
        if years_old > 3 {
            expertises.push("OG Holder".to_string());
        }
        if address.as_str().contains('b') {
            expertises.push("NFT Collector".to_string());
        }
        if expertises.is_empty() {
            expertises.push("DeFi Novice".to_string());
        }

        let [w0, ..] = seed_words(&[address.storage_key().as_bytes()]);
        let jitter_cents = w0 % 500_000;

        tracing::debug!(address = %address, tx_count, years_old, "mock wallet analysis");
        Ok(WalletAnalysis {
            first_tx_date,
            tx_count,
            total_volume_eth: (seed * 80) as f64 / 100.0,
            gas_spent_eth: (seed * 50) as f64 / 1000.0,
            protocols: PROTOCOLS.iter().map(|p| p.to_string()).collect(),
            expertises,
            assets_value_usd: (seed * 15_000 + jitter_cents) as f64 / 100.0,
            asset_count: seed % 20 + 5,
        })
    }
}

/// Serves fixed transaction lists keyed by address.
#[derive(Debug, Default, Clone)]
pub struct StaticTransactionSource {
    by_address: HashMap<String, Vec<Transaction>>,
}

impl StaticTransactionSource {
    /// An empty source; every address has no history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `transactions` for `address`.
    pub fn with_transactions(mut self, address: &Address, transactions: Vec<Transaction>) -> Self {
        self.by_address.insert(address.storage_key(), transactions);
        self
    }
}

impl TransactionSource for StaticTransactionSource {
    fn transactions(&self, address: &Address) -> Result<Vec<Transaction>, IssuerError> {
        Ok(self
            .by_address
            .get(&address.storage_key())
            .cloned()
            .unwrap_or_default())
    }
}
