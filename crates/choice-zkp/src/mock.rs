//! # Mock Proof System
//!
//! A deterministic, transparent threshold prover.
//!
//! ## How It Works
//!
//! - `prove()` checks `score >= threshold`, then commits to the public
//!   signals: `0x || SHA256(JCS({"publicSignals": [..], "system": ..}))`.
//! - `verify()` checks the signals against the statement and recomputes the
//!   commitment.
//!
//! ## Security Warning
//!
//! **NOT PRIVATE AND NOT SOUND.** The commitment depends only on public
//! data, so anyone can produce a verifying proof for any threshold without
//! knowing a score. The only guarantee is that this prover itself refuses
//! false statements. A circuit-backed [`ProofSystem`] replaces it without
//! changes to callers.

use serde::{Deserialize, Serialize};

use choice_core::{sha256_hex, CanonicalBytes, Timestamp};

use crate::traits::{ProofError, ProofSystem, ScoreWitness, ThresholdStatement, VerifyError};

/// Domain separator mixed into every mock commitment.
const SYSTEM_ID: &str = "choice-mock-threshold-v1";

/// Public signal asserting the score is at or above the threshold.
const ABOVE: &str = "1";

/// A threshold proof as shared with a verifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdProof {
    /// `0x`-prefixed hex commitment.
    pub proof: String,
    /// `[threshold, "1"]`.
    pub public_signals: Vec<String>,
    /// Generation time, epoch milliseconds. Not covered by the commitment.
    pub timestamp: i64,
}

/// Transparent mock prover.
#[derive(Debug, Default, Clone, Copy)]
pub struct MockProofSystem;

impl MockProofSystem {
    /// Create a mock prover.
    pub fn new() -> Self {
        Self
    }

    /// Prove as of `at`. The timestamp only fills [`ThresholdProof::timestamp`].
    pub fn prove_at(
        &self,
        statement: &ThresholdStatement,
        witness: &ScoreWitness,
        at: &Timestamp,
    ) -> Result<ThresholdProof, ProofError> {
        if witness.score < statement.threshold {
            tracing::warn!(
                threshold = statement.threshold,
                "refused threshold proof: score below threshold"
            );
            return Err(ProofError::BelowThreshold {
                score: witness.score,
                threshold: statement.threshold,
            });
        }
        let public_signals = public_signals_for(statement);
        let proof = commitment(&public_signals)?;
        tracing::debug!(threshold = statement.threshold, "generated threshold proof");
        Ok(ThresholdProof {
            proof,
            public_signals,
            timestamp: at.epoch_millis(),
        })
    }
}

impl ProofSystem for MockProofSystem {
    type Proof = ThresholdProof;

    fn prove(
        &self,
        statement: &ThresholdStatement,
        witness: &ScoreWitness,
    ) -> Result<Self::Proof, ProofError> {
        self.prove_at(statement, witness, &Timestamp::now())
    }

    fn verify(
        &self,
        proof: &Self::Proof,
        statement: &ThresholdStatement,
    ) -> Result<bool, VerifyError> {
        let [threshold, above] = proof.public_signals.as_slice() else {
            return Err(VerifyError::InvalidProof(format!(
                "expected 2 public signals, got {}",
                proof.public_signals.len()
            )));
        };
        let threshold: u8 = threshold.parse().map_err(|_| {
            VerifyError::InvalidProof(format!("threshold signal {threshold:?} is not a score"))
        })?;
        if threshold != statement.threshold || above != ABOVE {
            return Ok(false);
        }
        let expected = commitment(&proof.public_signals)
            .map_err(|e| VerifyError::InvalidProof(e.to_string()))?;
        let ok = expected == proof.proof;
        if !ok {
            tracing::warn!(threshold, "threshold proof commitment mismatch");
        }
        Ok(ok)
    }
}

fn public_signals_for(statement: &ThresholdStatement) -> Vec<String> {
    vec![statement.threshold.to_string(), ABOVE.to_string()]
}

fn commitment(public_signals: &[String]) -> Result<String, ProofError> {
    let canonical = CanonicalBytes::new(&serde_json::json!({
        "publicSignals": public_signals,
        "system": SYSTEM_ID,
    }))
    .map_err(|e| ProofError::ProverError(e.to_string()))?;
    Ok(format!("0x{}", sha256_hex(&canonical)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at() -> Timestamp {
        Timestamp::parse("2026-10-19T12:00:00Z").unwrap()
    }

    fn prove(score: u8, threshold: u8) -> Result<ThresholdProof, ProofError> {
        MockProofSystem::new().prove_at(
            &ThresholdStatement { threshold },
            &ScoreWitness { score },
            &at(),
        )
    }

    #[test]
    fn proves_and_verifies_when_score_meets_threshold() {
        let proof = prove(60, 50).unwrap();
        assert_eq!(proof.public_signals, vec!["50".to_string(), "1".to_string()]);
        assert_eq!(proof.timestamp, at().epoch_millis());
        assert!(proof.proof.starts_with("0x"));
        assert!(MockProofSystem
            .verify(&proof, &ThresholdStatement { threshold: 50 })
            .unwrap());
    }

    #[test]
    fn equal_score_is_enough() {
        assert!(prove(50, 50).is_ok());
    }

    #[test]
    fn refuses_below_threshold() {
        assert_eq!(
            prove(49, 50).unwrap_err(),
            ProofError::BelowThreshold {
                score: 49,
                threshold: 50
            }
        );
    }

    #[test]
    fn proof_does_not_depend_on_score() {
        assert_eq!(prove(60, 50).unwrap().proof, prove(100, 50).unwrap().proof);
    }

    #[test]
    fn proof_for_other_threshold_does_not_verify() {
        let proof = prove(80, 50).unwrap();
        assert!(!MockProofSystem
            .verify(&proof, &ThresholdStatement { threshold: 70 })
            .unwrap());
    }

    #[test]
    fn tampered_commitment_does_not_verify() {
        let mut proof = prove(80, 50).unwrap();
        proof.proof = format!("0x{}", "0".repeat(64));
        assert!(!MockProofSystem
            .verify(&proof, &ThresholdStatement { threshold: 50 })
            .unwrap());
    }

    #[test]
    fn malformed_signals_are_errors() {
        let mut proof = prove(80, 50).unwrap();
        proof.public_signals.push("extra".to_string());
        assert!(MockProofSystem
            .verify(&proof, &ThresholdStatement { threshold: 50 })
            .is_err());

        let mut proof = prove(80, 50).unwrap();
        proof.public_signals[0] = "fifty".to_string();
        assert!(MockProofSystem
            .verify(&proof, &ThresholdStatement { threshold: 50 })
            .is_err());
    }

    #[test]
    fn serializes_with_public_signals_name() {
        let v = serde_json::to_value(prove(60, 50).unwrap()).unwrap();
        assert_eq!(v["publicSignals"], serde_json::json!(["50", "1"]));
    }

    #[test]
    fn usable_through_generic_bound() {
        fn check<P: ProofSystem>(p: &P) -> bool {
            let stmt = ThresholdStatement { threshold: 10 };
            match p.prove(&stmt, &ScoreWitness { score: 20 }) {
                Ok(proof) => p.verify(&proof, &stmt).unwrap_or(false),
                Err(_) => false,
            }
        }
        assert!(check(&MockProofSystem));
    }
}
