//! # Identity Subcommands
//!
//! `did`, `score`, `add`, `show`, and `anchor`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;

use choice_core::{generate_did, Timestamp};
use choice_crypto::ContentPinner;
use choice_ledger::anchor;
use choice_reputation::calculate_reputation_at;
use choice_vc::VerifiableCredential;

use crate::config::Settings;
use crate::{
    append_credential, load_existing, load_or_create, parse_address, print_json, read_json, save,
};

/// Arguments for `choice did`.
#[derive(Args, Debug)]
pub struct DidArgs {
    /// Wallet address.
    pub address: String,
}

/// Arguments for `choice score`.
#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// JSON file holding an array of credentials.
    pub credentials: PathBuf,

    /// Score as of this instant (ISO-8601) instead of now.
    #[arg(long)]
    pub at: Option<String>,
}

/// Arguments for `choice add`.
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Wallet address of the holder.
    pub address: String,

    /// JSON file holding one credential.
    pub credential: PathBuf,

    /// Pin the credential to the local content store first.
    #[arg(long)]
    pub pin: bool,
}

/// Arguments for `choice show`.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Wallet address.
    pub address: String,

    /// Print the live reputation breakdown instead of the stored record.
    #[arg(long)]
    pub breakdown: bool,
}

/// Arguments for `choice anchor`.
#[derive(Args, Debug)]
pub struct AnchorArgs {
    /// Wallet address.
    pub address: String,
}

/// Execute `choice did`.
pub fn run_did(args: &DidArgs) -> Result<u8> {
    let address = parse_address(&args.address)?;
    println!("{}", generate_did(&address));
    Ok(0)
}

/// Execute `choice score`.
pub fn run_score(args: &ScoreArgs) -> Result<u8> {
    let now = parse_at(args.at.as_deref())?;
    let raw: Vec<Value> = read_json(&args.credentials)?;
    let credentials = raw
        .into_iter()
        .enumerate()
        .map(|(i, v)| {
            VerifiableCredential::from_value(v)
                .with_context(|| format!("credential #{i} in {}", args.credentials.display()))
        })
        .collect::<Result<Vec<_>>>()?;
    print_json(&calculate_reputation_at(&credentials, &now))?;
    Ok(0)
}

/// Execute `choice add`.
pub fn run_add(args: &AddArgs, settings: &Settings) -> Result<u8> {
    let address = parse_address(&args.address)?;
    let raw: Value = read_json(&args.credential)?;
    let credential = VerifiableCredential::from_value(raw)
        .with_context(|| format!("invalid credential in {}", args.credential.display()))?;

    let store = settings.open_store();
    let identity = load_or_create(store.as_ref(), &address)?;
    let credential_id = credential.id.clone();
    let pinner = settings.open_pinner();
    let pinner = args.pin.then_some(&pinner as &dyn ContentPinner);
    let next = append_credential(&identity, credential, pinner, &Timestamp::now())?;
    save(store.as_ref(), &next)?;

    println!(
        "added {credential_id}: {} credentials, score {}",
        next.credentials().len(),
        next.reputation_score()
    );
    Ok(0)
}

/// Execute `choice show`.
pub fn run_show(args: &ShowArgs, settings: &Settings) -> Result<u8> {
    let address = parse_address(&args.address)?;
    let store = settings.open_store();
    let identity = load_existing(store.as_ref(), &address)?;
    if args.breakdown {
        print_json(&identity.reputation_at(&Timestamp::now()))?;
    } else {
        print_json(&identity)?;
    }
    Ok(0)
}

/// Execute `choice anchor`.
pub fn run_anchor(args: &AnchorArgs, settings: &Settings) -> Result<u8> {
    let address = parse_address(&args.address)?;
    let store = settings.open_store();
    let identity = load_existing(store.as_ref(), &address)?;
    let (anchored, proof) = anchor(&identity, &Timestamp::now());
    save(store.as_ref(), &anchored)?;
    print_json(&proof)?;
    Ok(0)
}

pub(crate) fn parse_at(at: Option<&str>) -> Result<Timestamp> {
    match at {
        Some(raw) => {
            Timestamp::parse_lenient(raw).with_context(|| format!("invalid --at: {raw:?}"))
        }
        None => Ok(Timestamp::now()),
    }
}
