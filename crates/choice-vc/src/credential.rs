//! # Verifiable Credential Structure
//!
//! Defines [`VerifiableCredential`], the envelope for one attested fact about
//! an identity, shaped after the W3C VC Data Model.
//!
//! ## Structural Invariants
//!
//! A credential is accepted by [`VerifiableCredential::validate()`] only if:
//!
//! - `id` is non-empty;
//! - `type` carries at least one non-empty tag;
//! - `credentialSubject.id` is a non-empty string.
//!
//! `issuanceDate` is an [`IsoTimestamp`], so it is already known to parse.
//! `issuer` is free text and is not checked.
//!
//! ## Immutability
//!
//! There is no setter for any field once a credential has been built. An
//! update to an attested fact is modeled as a new credential with a new id.
//! Dates keep the issuer's text, so serializing an ingested credential
//! reproduces what was signed and pinned.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use choice_core::{IsoTimestamp, Timestamp};

use crate::kind::CredentialKind;
use crate::proof::Proof;

/// The W3C marker tag that producers place first in `type`.
pub const VERIFIABLE_CREDENTIAL_TAG: &str = "VerifiableCredential";

/// The open subject payload of a credential.
pub type CredentialSubject = Map<String, Value>;

/// Errors from credential ingestion.
#[derive(Error, Debug)]
pub enum VcError {
    /// The credential fails structural validation or cannot be parsed.
    #[error("malformed credential: {0}")]
    MalformedCredential(String),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Credential `type` value: a single string or an array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CredentialTypeValue {
    /// Single type string.
    Single(String),
    /// Array of type strings.
    Array(Vec<String>),
}

impl CredentialTypeValue {
    /// All tags as a slice, regardless of JSON shape.
    pub fn as_slice(&self) -> &[String] {
        match self {
            CredentialTypeValue::Single(s) => std::slice::from_ref(s),
            CredentialTypeValue::Array(arr) => arr,
        }
    }

    /// Check whether `tag` is present.
    pub fn contains(&self, tag: &str) -> bool {
        self.as_slice().iter().any(|t| t == tag)
    }
}

impl From<Vec<String>> for CredentialTypeValue {
    fn from(tags: Vec<String>) -> Self {
        Self::Array(tags)
    }
}

/// A verifiable credential held in an identity's ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifiableCredential {
    /// Credential identifier, unique within one ledger (usually `urn:uuid:...`).
    #[serde(default)]
    pub id: String,

    /// Credential tags.
    #[serde(rename = "type")]
    pub credential_type: CredentialTypeValue,

    /// Attesting party. Not validated.
    pub issuer: String,

    /// When the credential was issued. Drives time decay.
    #[serde(rename = "issuanceDate")]
    pub issuance_date: IsoTimestamp,

    /// Optional expiration. Carried, not enforced by scoring.
    #[serde(
        rename = "expirationDate",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub expiration_date: Option<IsoTimestamp>,

    /// Subject payload. Always contains `id`; other keys vary by producer.
    #[serde(rename = "credentialSubject")]
    pub credential_subject: CredentialSubject,

    /// Optional proof block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proof: Option<Proof>,

    /// Content identifier of the pinned copy, if any.
    #[serde(rename = "ipfsCid", default, skip_serializing_if = "Option::is_none")]
    pub ipfs_cid: Option<String>,
}

impl VerifiableCredential {
    /// Build an unsigned, unpinned credential.
    pub fn new(
        id: impl Into<String>,
        tags: Vec<String>,
        issuer: impl Into<String>,
        issuance_date: Timestamp,
        credential_subject: CredentialSubject,
    ) -> Self {
        Self {
            id: id.into(),
            credential_type: CredentialTypeValue::Array(tags),
            issuer: issuer.into(),
            issuance_date: issuance_date.into(),
            expiration_date: None,
            credential_subject,
            proof: None,
            ipfs_cid: None,
        }
    }

    /// Parse and validate a credential from JSON text.
    ///
    /// Any failure, including an unparseable `issuanceDate`, is reported as
    /// [`VcError::MalformedCredential`].
    pub fn from_json(json: &str) -> Result<Self, VcError> {
        let vc: Self = serde_json::from_str(json)
            .map_err(|e| VcError::MalformedCredential(e.to_string()))?;
        vc.validate()?;
        Ok(vc)
    }

    /// Parse and validate a credential from a JSON value.
    pub fn from_value(value: Value) -> Result<Self, VcError> {
        let vc: Self = serde_json::from_value(value)
            .map_err(|e| VcError::MalformedCredential(e.to_string()))?;
        vc.validate()?;
        Ok(vc)
    }

    /// Check the structural invariants listed in the module docs.
    pub fn validate(&self) -> Result<(), VcError> {
        if self.id.trim().is_empty() {
            return Err(VcError::MalformedCredential(
                "credential id must not be empty".to_string(),
            ));
        }
        let tags = self.tags();
        if tags.is_empty() {
            return Err(VcError::MalformedCredential(format!(
                "credential {} has no type tag",
                self.id
            )));
        }
        if tags.iter().any(|t| t.trim().is_empty()) {
            return Err(VcError::MalformedCredential(format!(
                "credential {} has an empty type tag",
                self.id
            )));
        }
        match self.subject_id() {
            Some(id) if !id.trim().is_empty() => Ok(()),
            _ => Err(VcError::MalformedCredential(format!(
                "credential {} has no credentialSubject.id",
                self.id
            ))),
        }
    }

    /// All tags in `type`, in declared order.
    pub fn tags(&self) -> &[String] {
        self.credential_type.as_slice()
    }

    /// Check whether the credential carries `tag`.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.credential_type.contains(tag)
    }

    /// Check whether the credential carries the tag for `kind`.
    pub fn has_kind(&self, kind: CredentialKind) -> bool {
        self.has_tag(kind.as_str())
    }

    /// Recognized kinds among this credential's tags, in declared order.
    pub fn kinds(&self) -> impl Iterator<Item = CredentialKind> + '_ {
        self.tags().iter().filter_map(|t| CredentialKind::from_tag(t))
    }

    /// True when `type` is exactly `self_attested` and nothing else.
    ///
    /// Both `"self_attested"` and `["self_attested"]` qualify. A credential
    /// that pairs `self_attested` with any other tag does not.
    pub fn is_self_attested(&self) -> bool {
        matches!(self.tags(), [only] if only == CredentialKind::SelfAttested.as_str())
    }

    /// The subject identifier, if present and a string.
    pub fn subject_id(&self) -> Option<&str> {
        self.subject_str("id")
    }

    /// A string-valued subject field.
    pub fn subject_str(&self, key: &str) -> Option<&str> {
        self.credential_subject.get(key).and_then(Value::as_str)
    }

    /// Return this credential with its pinned content identifier recorded.
    pub fn with_ipfs_cid(mut self, cid: impl Into<String>) -> Self {
        self.ipfs_cid = Some(cid.into());
        self
    }

    /// The JSON document that gets pinned: the credential without `ipfsCid`.
    pub fn pinnable_value(&self) -> Result<Value, VcError> {
        let mut val = serde_json::to_value(self)?;
        if let Some(obj) = val.as_object_mut() {
            obj.remove("ipfsCid");
        }
        Ok(val)
    }
}
