//! # Job Matching Subcommand

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use choice_core::Timestamp;
use choice_reputation::{rank_jobs, sample_jobs, Job};

use crate::config::Settings;
use crate::{load_existing, parse_address, print_json, read_json};

/// Arguments for `choice match`.
#[derive(Args, Debug)]
pub struct MatchArgs {
    /// Wallet address of the candidate.
    pub address: String,

    /// JSON file holding an array of job listings. Defaults to the
    /// built-in board.
    #[arg(long)]
    pub jobs: Option<PathBuf>,

    /// Emit JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

/// Execute `choice match`.
pub fn run_match(args: &MatchArgs, settings: &Settings) -> Result<u8> {
    let address = parse_address(&args.address)?;
    let jobs: Vec<Job> = match &args.jobs {
        Some(path) => read_json(path)?,
        None => sample_jobs(),
    };
    let store = settings.open_store();
    let identity = load_existing(store.as_ref(), &address)?;

    let now = Timestamp::now();
    let score = identity.reputation_at(&now).score;
    let ranked = rank_jobs(&jobs, score, identity.credentials(), &now);

    if args.json {
        let rows: Vec<serde_json::Value> = ranked
            .iter()
            .map(|(job, m)| {
                serde_json::json!({
                    "job": job,
                    "match": m.score,
                    "reason": m.reason(),
                })
            })
            .collect();
        print_json(&rows)?;
    } else {
        for (job, m) in &ranked {
            println!("{:>3}%  {:<32} {}", m.score, job.title, job.company);
            println!("      {}", m.reason());
        }
    }
    Ok(0)
}
