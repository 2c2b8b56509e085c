//! # Credential Builders
//!
//! Each producer's output becomes a credential with:
//!
//! - id `urn:uuid:<v4>`;
//! - tags `["VerifiableCredential", "<Kind>Credential"]`;
//! - the producer's issuer DID;
//! - a subject holding the producer's fields plus `id` set to the holder
//!   DID. A producer field named `id` never overrides the holder.
//!
//! Builders validate before returning.

use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use choice_core::{Did, Timestamp};
use choice_crypto::ContentPinner;
use choice_vc::{CredentialKind, VerifiableCredential, VERIFIABLE_CREDENTIAL_TAG};

use crate::error::IssuerError;
use crate::traits::{DocumentType, DocumentVerification, SocialProfile};

/// Issuer of physical document credentials.
pub const DOCUMENT_VERIFIER_DID: &str = "did:web:choice.love/verifier";

/// Issuer of wallet-history credentials.
pub const ANALYTICS_ORACLE_DID: &str = "did:ethr:0xAnalyticsOracle";

/// A fresh random credential id.
pub fn new_credential_id() -> String {
    format!("urn:uuid:{}", Uuid::new_v4())
}

/// Build a credential of `kind` for `holder` with `fields` as the subject.
pub(crate) fn build(
    kind: CredentialKind,
    holder: &Did,
    issuer: impl Into<String>,
    fields: &impl Serialize,
    issued: Timestamp,
) -> Result<VerifiableCredential, IssuerError> {
    let mut subject = match serde_json::to_value(fields).map_err(choice_vc::VcError::from)? {
        Value::Object(map) => map,
        other => {
            return Err(IssuerError::InvalidInput(format!(
                "credential fields must be an object, got {other}"
            )))
        }
    };
    subject.insert("id".to_string(), Value::String(holder.to_string()));

    let vc = VerifiableCredential::new(
        new_credential_id(),
        vec![
            VERIFIABLE_CREDENTIAL_TAG.to_string(),
            kind.as_str().to_string(),
        ],
        issuer,
        issued,
        subject,
    );
    vc.validate()?;
    tracing::info!(
        credential_id = %vc.id,
        kind = %kind,
        holder = %holder,
        "issued credential"
    );
    Ok(vc)
}

/// Issue a `SocialCredential` from a connected account.
///
/// The issuer is `did:web:<platform>.com` with the platform lowercased and
/// whitespace removed.
pub fn social_credential(
    holder: &Did,
    profile: &SocialProfile,
    issued: Timestamp,
) -> Result<VerifiableCredential, IssuerError> {
    if !profile.verified {
        return Err(IssuerError::Rejected(format!(
            "{} did not confirm ownership of {}",
            profile.platform, profile.handle
        )));
    }
    let domain: String = profile
        .platform
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();
    build(
        CredentialKind::SocialCredential,
        holder,
        format!("did:web:{domain}.com"),
        profile,
        issued,
    )
}

/// Issue a `PhysicalCredential` for a verified document.
pub fn physical_credential(
    holder: &Did,
    document_type: DocumentType,
    file_name: &str,
    verification: &DocumentVerification,
    issued: Timestamp,
) -> Result<VerifiableCredential, IssuerError> {
    if !verification.verified {
        return Err(IssuerError::Rejected(format!(
            "{} could not verify {file_name}",
            verification.issuer
        )));
    }
    let mut fields = Map::new();
    fields.insert("documentType".into(), document_type.as_str().into());
    fields.insert("fileName".into(), file_name.into());
    fields.insert("verificationStatus".into(), "Verified".into());
    fields.insert("issuer".into(), verification.issuer.as_str().into());
    build(
        CredentialKind::PhysicalCredential,
        holder,
        DOCUMENT_VERIFIER_DID,
        &fields,
        issued,
    )
}

/// Issue a `WalletHistoryCredential` carrying `stats`.
///
/// `stats` is either a [`WalletAnalysis`](crate::WalletAnalysis) or a
/// [`BlockchainStats`](crate::BlockchainStats); both carry `firstTxDate`,
/// which job matching reads.
pub fn wallet_history_credential(
    holder: &Did,
    stats: &impl Serialize,
    issued: Timestamp,
) -> Result<VerifiableCredential, IssuerError> {
    build(
        CredentialKind::WalletHistoryCredential,
        holder,
        ANALYTICS_ORACLE_DID,
        stats,
        issued,
    )
}

/// Pin `credential` and return it with its `ipfsCid` set.
///
/// The pinned document is the credential without `ipfsCid`, so the CID
/// addresses exactly the content a holder would re-pin.
pub fn pin_credential(
    pinner: &dyn ContentPinner,
    credential: VerifiableCredential,
) -> Result<VerifiableCredential, IssuerError> {
    let value = credential.pinnable_value()?;
    let cid = pinner.pin(&value)?;
    tracing::debug!(credential_id = %credential.id, cid = %cid, "pinned credential");
    Ok(credential.with_ipfs_cid(cid.to_string()))
}
