//! # choice-zkp — Reputation Threshold Proofs
//!
//! Lets a holder show that their reputation score meets a threshold without
//! publishing the score.
//!
//! ## Architecture
//!
//! - **Traits** (`traits.rs`): [`ProofSystem`] is the contract every prover
//!   satisfies, so a mock and a real circuit-backed prover are
//!   interchangeable at compile time.
//! - **Mock** (`mock.rs`): [`MockProofSystem`] emits transparent SHA-256
//!   commitments over the public signals. It refuses to prove a false
//!   statement but offers no zero-knowledge guarantee.
//!
//! ## Crate Policy
//!
//! - Depends only on `choice-core` internally.
//! - No `unsafe`.

pub mod mock;
pub mod traits;

pub use mock::{MockProofSystem, ThresholdProof};
pub use traits::{ProofError, ProofSystem, ScoreWitness, ThresholdStatement, VerifyError};
