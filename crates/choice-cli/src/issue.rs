//! # Issue Subcommand
//!
//! Runs a credential producer and appends its credential to the holder's
//! ledger. Producers are the deterministic mocks; live connectors plug in
//! through the same traits.
//!
//! ```bash
//! choice issue 0xAbC... social --platform GitHub --handle octocat
//! choice issue 0xAbC... document --kind diploma ./degree.pdf
//! choice issue 0xAbC... wallet --transactions ./txlist.json
//! choice issue 0xAbC... course collab-301
//! ```

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};

use choice_core::Timestamp;
use choice_crypto::ContentPinner;
use choice_issuers::{
    education_credential, find_course, has_badge, physical_credential, social_credential,
    summarize_transactions, wallet_history_credential, DocumentType, DocumentVerifier,
    MockDocumentVerifier, MockSocialConnector, MockWalletAnalyzer, SocialConnector, Transaction,
    WalletHistoryAnalyzer,
};
use choice_ledger::Identity;
use choice_vc::VerifiableCredential;

use crate::config::Settings;
use crate::{append_credential, load_or_create, parse_address, read_json, save};

/// Arguments for `choice issue`.
#[derive(Args, Debug)]
pub struct IssueArgs {
    /// Wallet address of the holder.
    pub address: String,

    /// Pin the credential to the local content store.
    #[arg(long, global = true)]
    pub pin: bool,

    #[command(subcommand)]
    pub producer: Producer,
}

/// Credential producers.
#[derive(Subcommand, Debug)]
pub enum Producer {
    /// Verify a social account.
    Social {
        /// Platform name (e.g. GitHub, Farcaster).
        #[arg(long)]
        platform: String,
        /// Account handle.
        #[arg(long)]
        handle: String,
    },

    /// Verify a physical document.
    Document {
        /// Diploma, certification, award, or id.
        #[arg(long)]
        kind: DocumentType,
        /// The scanned document.
        file: PathBuf,
    },

    /// Attest wallet history.
    Wallet {
        /// Block-explorer transaction list (JSON array). Without it the
        /// mock analyzer synthesizes a history.
        #[arg(long)]
        transactions: Option<PathBuf>,
    },

    /// Complete a course from the catalog.
    Course {
        /// Course id (e.g. web3-101).
        id: String,
    },
}

/// Execute `choice issue`.
pub fn run_issue(args: &IssueArgs, settings: &Settings) -> Result<u8> {
    let address = parse_address(&args.address)?;
    let store = settings.open_store();
    let identity = load_or_create(store.as_ref(), &address)?;
    let now = Timestamp::now();

    let credential = produce(&args.producer, &identity, &now)?;
    let credential_id = credential.id.clone();
    let pinner = settings.open_pinner();
    let pinner = args.pin.then_some(&pinner as &dyn ContentPinner);
    let next = append_credential(&identity, credential, pinner, &now)?;
    save(store.as_ref(), &next)?;

    println!(
        "issued {credential_id}: {} credentials, score {}",
        next.credentials().len(),
        next.reputation_score()
    );
    Ok(0)
}

fn produce(
    producer: &Producer,
    identity: &Identity,
    now: &Timestamp,
) -> Result<VerifiableCredential> {
    let holder = identity.did();
    let credential = match producer {
        Producer::Social { platform, handle } => {
            let profile = MockSocialConnector.connect(platform, handle)?;
            social_credential(holder, &profile, *now)?
        }
        Producer::Document { kind, file } => {
            let contents = std::fs::read(file)
                .with_context(|| format!("failed to read document: {}", file.display()))?;
            let file_name = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let check = MockDocumentVerifier.verify(*kind, &file_name, &contents)?;
            physical_credential(holder, *kind, &file_name, &check, *now)?
        }
        Producer::Wallet { transactions } => match transactions {
            Some(path) => {
                let txs: Vec<Transaction> = read_json(path)?;
                let stats = summarize_transactions(&txs, now)?;
                wallet_history_credential(holder, &stats, *now)?
            }
            None => {
                let analysis = MockWalletAnalyzer.analyze(identity.address(), now)?;
                wallet_history_credential(holder, &analysis, *now)?
            }
        },
        Producer::Course { id } => {
            let course = find_course(id).with_context(|| format!("unknown course: {id}"))?;
            if has_badge(identity.credentials(), &course.title) {
                bail!("{} already completed", course.title);
            }
            education_credential(holder, &course, *now)?
        }
    };
    Ok(credential)
}
