//! # choice CLI entry point
//!
//! Parses command-line arguments, resolves settings, and dispatches to
//! subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use choice_cli::config::Settings;
use choice_cli::identity::{
    run_add, run_anchor, run_did, run_score, run_show, AddArgs, AnchorArgs, DidArgs, ScoreArgs,
    ShowArgs,
};
use choice_cli::issue::{run_issue, IssueArgs};
use choice_cli::jobs::{run_match, MatchArgs};
use choice_cli::proof::{run_prove, run_verify, ProveArgs, VerifyArgs};

/// CHOICE iD CLI
///
/// Manages wallet-owned credential ledgers: derives DIDs, scores and
/// anchors reputation, issues credentials, proves score thresholds, and
/// matches identities to jobs.
#[derive(Parser, Debug)]
#[command(name = "choice", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory for identity records and pinned content.
    #[arg(long, global = true)]
    store_dir: Option<PathBuf>,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Derive the DID for a wallet address.
    Did(DidArgs),

    /// Score a list of credentials without storing anything.
    Score(ScoreArgs),

    /// Append a credential to an identity's ledger.
    Add(AddArgs),

    /// Print an identity record.
    Show(ShowArgs),

    /// Anchor an identity's reputation hash.
    Anchor(AnchorArgs),

    /// Prove that an identity's score meets a threshold.
    Prove(ProveArgs),

    /// Verify a threshold proof.
    Verify(VerifyArgs),

    /// Issue a credential from a producer and append it.
    Issue(IssueArgs),

    /// Rank job listings for an identity.
    #[command(name = "match")]
    Match(MatchArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if cli.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    let settings = match Settings::from_env(cli.config.as_deref(), cli.store_dir.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(1);
        }
    };
    tracing::debug!(store_dir = %settings.store_dir.display(), "resolved settings");

    let result = match &cli.command {
        Commands::Did(args) => run_did(args),
        Commands::Score(args) => run_score(args),
        Commands::Add(args) => run_add(args, &settings),
        Commands::Show(args) => run_show(args, &settings),
        Commands::Anchor(args) => run_anchor(args, &settings),
        Commands::Prove(args) => run_prove(args, &settings),
        Commands::Verify(args) => run_verify(args),
        Commands::Issue(args) => run_issue(args, &settings),
        Commands::Match(args) => run_match(args, &settings),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
