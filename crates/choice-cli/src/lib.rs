//! # choice-cli — CLI for CHOICE iD
//!
//! Provides the `choice` command-line interface over the identity ledger.
//!
//! ## Subcommands
//!
//! - `choice did` — Derive the DID for an address.
//! - `choice score` — Score a credential list file.
//! - `choice add` — Append a credential file to an identity.
//! - `choice show` — Print an identity record.
//! - `choice anchor` — Anchor an identity's reputation hash.
//! - `choice prove` / `choice verify` — Threshold proofs.
//! - `choice issue` — Issue a credential from a (mock) producer.
//! - `choice match` — Rank jobs for an identity.
//!
//! Handlers return a process exit code: `0` success, `2` a negative answer
//! (proof refused or invalid). Errors exit `1`.
//!
//! ```bash
//! choice add 0xAbC... credential.json --pin
//! choice prove 0xAbC... --threshold 60 > proof.json
//! choice verify proof.json --threshold 60
//! ```

pub mod config;
pub mod identity;
pub mod issue;
pub mod jobs;
pub mod proof;

use std::path::Path;

use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Serialize};

use choice_core::{Address, Timestamp};
use choice_crypto::ContentPinner;
use choice_issuers::pin_credential;
use choice_ledger::{append_at, Identity, IdentityStore};
use choice_vc::VerifiableCredential;

/// Exit code for a well-formed negative answer.
pub const EXIT_NEGATIVE: u8 = 2;

/// Parse an address argument.
pub fn parse_address(raw: &str) -> Result<Address> {
    Address::new(raw).with_context(|| format!("invalid address: {raw:?}"))
}

/// Load the identity for `address`, creating an empty one on first sight.
pub fn load_or_create(store: &dyn IdentityStore, address: &Address) -> Result<Identity> {
    let loaded = store
        .load(address)
        .with_context(|| format!("failed to load identity for {address}"))?;
    Ok(loaded.unwrap_or_else(|| Identity::new(address.clone())))
}

/// Load the identity for `address`, failing if none is stored.
pub fn load_existing(store: &dyn IdentityStore, address: &Address) -> Result<Identity> {
    store
        .load(address)
        .with_context(|| format!("failed to load identity for {address}"))?
        .with_context(|| format!("no identity stored for {address}"))
}

/// Persist `identity`.
pub fn save(store: &dyn IdentityStore, identity: &Identity) -> Result<()> {
    store
        .save(identity)
        .with_context(|| format!("failed to save identity for {}", identity.address()))
}

/// Append `credential` to `identity`, pinning it first when a pinner is
/// given.
///
/// The credential must be accepted by the ledger before anything is pinned,
/// so a rejected credential leaves no content behind.
pub fn append_credential(
    identity: &Identity,
    credential: VerifiableCredential,
    pinner: Option<&dyn ContentPinner>,
    now: &Timestamp,
) -> Result<Identity> {
    let credential_id = credential.id.clone();
    let Some(pinner) = pinner else {
        return append_at(identity, credential, now)
            .with_context(|| format!("cannot add credential {credential_id}"));
    };
    append_at(identity, credential.clone(), now)
        .with_context(|| format!("cannot add credential {credential_id}"))?;
    let pinned = pin_credential(pinner, credential)
        .with_context(|| format!("failed to pin credential {credential_id}"))?;
    append_at(identity, pinned, now)
        .with_context(|| format!("cannot add credential {credential_id}"))
}

/// Read a JSON file into `T`.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid JSON in {}", path.display()))
}

/// Print `value` as pretty JSON on stdout.
pub fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
