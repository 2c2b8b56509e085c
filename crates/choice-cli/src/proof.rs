//! # Threshold Proof Subcommands
//!
//! `choice prove` emits a proof that an identity's live score meets a
//! threshold; `choice verify` checks one. Both use the mock proof system,
//! which is transparent: see [`choice_zkp::mock`].

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use choice_core::Timestamp;
use choice_zkp::{
    MockProofSystem, ProofError, ProofSystem, ScoreWitness, ThresholdProof, ThresholdStatement,
};

use crate::config::Settings;
use crate::{load_existing, parse_address, print_json, read_json, EXIT_NEGATIVE};

/// Arguments for `choice prove`.
#[derive(Args, Debug)]
pub struct ProveArgs {
    /// Wallet address of the prover.
    pub address: String,

    /// Score threshold to prove. Defaults to the configured threshold.
    #[arg(long)]
    pub threshold: Option<u8>,
}

/// Arguments for `choice verify`.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// JSON file holding a threshold proof.
    pub proof: PathBuf,

    /// Threshold the proof must attest to.
    #[arg(long)]
    pub threshold: u8,
}

/// Execute `choice prove`.
pub fn run_prove(args: &ProveArgs, settings: &Settings) -> Result<u8> {
    let address = parse_address(&args.address)?;
    let threshold = args.threshold.unwrap_or(settings.default_threshold);
    let store = settings.open_store();
    let identity = load_existing(store.as_ref(), &address)?;

    let now = Timestamp::now();
    let score = identity.reputation_at(&now).score;
    match MockProofSystem::new().prove_at(
        &ThresholdStatement { threshold },
        &ScoreWitness { score },
        &now,
    ) {
        Ok(proof) => {
            print_json(&proof)?;
            Ok(0)
        }
        Err(ProofError::BelowThreshold { .. }) => {
            eprintln!("reputation does not meet threshold {threshold}");
            Ok(EXIT_NEGATIVE)
        }
        Err(e) => Err(e.into()),
    }
}

/// Execute `choice verify`.
pub fn run_verify(args: &VerifyArgs) -> Result<u8> {
    let proof: ThresholdProof = read_json(&args.proof)?;
    let valid = MockProofSystem::new().verify(
        &proof,
        &ThresholdStatement {
            threshold: args.threshold,
        },
    )?;
    if valid {
        println!("valid");
        Ok(0)
    } else {
        println!("invalid");
        Ok(EXIT_NEGATIVE)
    }
}
