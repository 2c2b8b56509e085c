//! # Reputation Anchoring
//!
//! Anchoring publishes a [`ReputationProof`]: a commitment to an address's
//! score at an instant, suitable for posting on-chain. The identity records
//! the hash and time of its most recent anchor.
//!
//! The score is recomputed as of the anchoring instant, so a proof never
//! commits to a value that decay has already overtaken.

use serde::{Deserialize, Serialize};

use choice_core::{Address, Timestamp};
use choice_crypto::generate_reputation_hash;

use crate::ledger::Identity;

/// A publishable commitment to a reputation score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReputationProof {
    /// The identity's address.
    pub address: Address,
    /// The committed score.
    pub score: u8,
    /// Anchoring time, epoch milliseconds.
    pub timestamp: i64,
    /// `generate_reputation_hash(address, score)`.
    pub hash: String,
}

impl ReputationProof {
    /// Recompute the hash from `address` and `score` and compare.
    pub fn verify(&self) -> bool {
        generate_reputation_hash(&self.address, self.score) == self.hash
    }
}

/// Anchor `identity`'s reputation as of `at`.
///
/// Returns the updated snapshot (rescored, with anchor metadata set) and
/// the proof to publish.
pub fn anchor(identity: &Identity, at: &Timestamp) -> (Identity, ReputationProof) {
    let mut next = identity.clone().rescored(at);
    let score = next.reputation_score();
    let hash = generate_reputation_hash(next.address(), score);
    let timestamp = at.epoch_millis();

    next.last_anchor_hash = Some(hash.clone());
    next.last_anchor_timestamp = Some(timestamp);

    tracing::info!(address = %next.address(), score, hash = %hash, "anchored reputation");

    let proof = ReputationProof {
        address: next.address().clone(),
        score,
        timestamp,
        hash,
    };
    (next, proof)
}
