//! # Proof System Trait
//!
//! A threshold proof has one public input, the threshold, and one private
//! input, the score. The public signals of an accepted proof are
//! `[threshold, "1"]`, the trailing `"1"` asserting `score >= threshold`.
//!
//! ## Security Invariant
//!
//! `prove` must fail when the witness does not satisfy the statement. A
//! prover that returns a proof for `score < threshold` is broken.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error during proof generation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProofError {
    /// The witness does not satisfy the statement.
    #[error("score {score} does not meet the threshold {threshold}")]
    BelowThreshold {
        /// The private score.
        score: u8,
        /// The public threshold.
        threshold: u8,
    },
    /// Internal prover error.
    #[error("prover error: {0}")]
    ProverError(String),
}

/// Error during proof verification.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerifyError {
    /// The proof is structurally invalid.
    #[error("invalid proof: {0}")]
    InvalidProof(String),
}

/// Public statement: "my score is at least `threshold`".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdStatement {
    /// Minimum score, `0..=100`.
    pub threshold: u8,
}

/// Private witness for a [`ThresholdStatement`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreWitness {
    /// The holder's reputation score.
    pub score: u8,
}

/// Abstract interface for a reputation threshold proof system.
pub trait ProofSystem: Send + Sync {
    /// The proof type produced by this system.
    type Proof: Send + Sync;

    /// Prove `statement` using `witness`.
    fn prove(
        &self,
        statement: &ThresholdStatement,
        witness: &ScoreWitness,
    ) -> Result<Self::Proof, ProofError>;

    /// Verify `proof` against `statement`.
    ///
    /// `Ok(false)` means a well-formed proof that does not attest this
    /// statement. `Err` means the proof could not be interpreted.
    fn verify(
        &self,
        proof: &Self::Proof,
        statement: &ThresholdStatement,
    ) -> Result<bool, VerifyError>;
}
