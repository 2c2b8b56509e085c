//! # Identity and Append
//!
//! ```text
//! candidate credential
//!        │  validate (structure, unique id)
//!        ▼
//! identity.credentials ++ [credential]
//!        │  calculate_reputation over the full list
//!        ▼
//! new Identity snapshot
//! ```
//!
//! A rejected append returns an error and produces no snapshot, so the
//! caller's identity and score stay at their last valid state.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use choice_core::{generate_did, Address, Did, Timestamp};
use choice_reputation::{calculate_reputation, calculate_reputation_at, ReputationResult};
use choice_vc::{VcError, VerifiableCredential};

/// Errors from ledger operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The credential failed structural validation.
    #[error("malformed credential: {0}")]
    MalformedCredential(String),

    /// A credential with the same id is already in the ledger.
    #[error("duplicate credential id: {id}")]
    DuplicateCredential {
        /// The repeated id.
        id: String,
    },
}

impl From<VcError> for LedgerError {
    fn from(err: VcError) -> Self {
        match err {
            VcError::MalformedCredential(msg) => Self::MalformedCredential(msg),
            other => Self::MalformedCredential(other.to_string()),
        }
    }
}

/// A wallet-owned identity and its credential ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    address: Address,
    did: Did,

    /// Display name chosen by the holder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Avatar URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,

    /// Free-text biography.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,

    #[serde(default)]
    credentials: Vec<VerifiableCredential>,

    reputation_score: u8,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) last_anchor_hash: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) last_anchor_timestamp: Option<i64>,
}

impl Identity {
    /// Create the identity for an address seen for the first time.
    ///
    /// The ledger is empty and the score is the engine's empty-list score.
    pub fn new(address: Address) -> Self {
        let did = generate_did(&address);
        let score = calculate_reputation(&[]).score;
        tracing::info!(address = %address, did = %did, "created identity");
        Self {
            address,
            did,
            display_name: None,
            avatar: None,
            bio: None,
            credentials: Vec::new(),
            reputation_score: score,
            last_anchor_hash: None,
            last_anchor_timestamp: None,
        }
    }

    /// The owner address.
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// The DID derived from the address.
    pub fn did(&self) -> &Did {
        &self.did
    }

    /// Credentials in insertion order.
    pub fn credentials(&self) -> &[VerifiableCredential] {
        &self.credentials
    }

    /// The score as of the last append or anchor.
    pub fn reputation_score(&self) -> u8 {
        self.reputation_score
    }

    /// Hash published by the last anchor, if any.
    pub fn last_anchor_hash(&self) -> Option<&str> {
        self.last_anchor_hash.as_deref()
    }

    /// Epoch milliseconds of the last anchor, if any.
    pub fn last_anchor_timestamp(&self) -> Option<i64> {
        self.last_anchor_timestamp
    }

    /// Find a credential by id.
    pub fn credential(&self, id: &str) -> Option<&VerifiableCredential> {
        self.credentials.iter().find(|vc| vc.id == id)
    }

    /// Recompute the full reputation result as of `now` without changing
    /// the snapshot.
    pub fn reputation_at(&self, now: &Timestamp) -> ReputationResult {
        calculate_reputation_at(&self.credentials, now)
    }

    /// Return this snapshot with new profile fields. Credentials and score
    /// are untouched.
    pub fn with_profile(
        mut self,
        display_name: Option<String>,
        avatar: Option<String>,
        bio: Option<String>,
    ) -> Self {
        self.display_name = display_name;
        self.avatar = avatar;
        self.bio = bio;
        self
    }

    /// Check that a loaded snapshot is internally consistent: the DID
    /// matches the address and credential ids are unique.
    pub fn check_consistency(&self) -> Result<(), LedgerError> {
        if self.did != generate_did(&self.address) {
            return Err(LedgerError::MalformedCredential(format!(
                "identity DID {} does not derive from address {}",
                self.did, self.address
            )));
        }
        let mut seen = std::collections::HashSet::new();
        for vc in &self.credentials {
            if !seen.insert(vc.id.as_str()) {
                return Err(LedgerError::DuplicateCredential { id: vc.id.clone() });
            }
        }
        Ok(())
    }

    pub(crate) fn rescored(mut self, now: &Timestamp) -> Self {
        self.reputation_score = calculate_reputation_at(&self.credentials, now).score;
        self
    }
}

/// Append `credential` to `identity`'s ledger as of the current instant.
pub fn append(
    identity: &Identity,
    credential: VerifiableCredential,
) -> Result<Identity, LedgerError> {
    append_at(identity, credential, &Timestamp::now())
}

/// Append `credential` to `identity`'s ledger, scoring as of `now`.
///
/// # Errors
///
/// - [`LedgerError::MalformedCredential`] if the credential fails
///   [`VerifiableCredential::validate()`].
/// - [`LedgerError::DuplicateCredential`] if its id is already present.
pub fn append_at(
    identity: &Identity,
    credential: VerifiableCredential,
    now: &Timestamp,
) -> Result<Identity, LedgerError> {
    if let Err(err) = credential.validate() {
        tracing::warn!(
            address = %identity.address,
            credential_id = %credential.id,
            error = %err,
            "rejected malformed credential"
        );
        return Err(err.into());
    }
    if identity.credential(&credential.id).is_some() {
        tracing::warn!(
            address = %identity.address,
            credential_id = %credential.id,
            "rejected duplicate credential"
        );
        return Err(LedgerError::DuplicateCredential { id: credential.id });
    }

    let credential_id = credential.id.clone();
    let mut next = identity.clone();
    next.credentials.push(credential);
    let next = next.rescored(now);

    tracing::info!(
        address = %next.address,
        credential_id = %credential_id,
        credentials = next.credentials.len(),
        score = next.reputation_score,
        "appended credential"
    );
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use choice_vc::CredentialTypeValue;
    use serde_json::{json, Map};

    fn now() -> Timestamp {
        Timestamp::parse("2026-10-19T12:00:00Z").unwrap()
    }

    fn identity() -> Identity {
        Identity::new(Address::new("0xABCdef0123").unwrap())
    }

    fn vc(id: &str, tag: &str) -> VerifiableCredential {
        let mut subject = Map::new();
        subject.insert("id".to_string(), json!("did:ethr:0xabcdef0123"));
        VerifiableCredential::new(id, vec![tag.to_string()], "issuer", now(), subject)
    }

    #[test]
    fn new_identity_is_empty_with_base_score() {
        let id = identity();
        assert!(id.credentials().is_empty());
        assert_eq!(id.reputation_score(), 10);
        assert_eq!(id.did().as_str(), "did:ethr:0xabcdef0123");
        assert_eq!(id.address().as_str(), "0xABCdef0123");
        assert!(id.last_anchor_hash().is_none());
    }

    #[test]
    fn append_adds_one_and_rescores() {
        let before = identity();
        let after = append_at(&before, vc("1", "government_id"), &now()).unwrap();
        assert_eq!(after.credentials().len(), before.credentials().len() + 1);
        assert_eq!(after.reputation_score(), 60);
        assert_eq!(before.reputation_score(), 10);
        assert!(before.credentials().is_empty());
    }

    #[test]
    fn append_preserves_prior_order() {
        let mut id = identity();
        for (i, tag) in ["social", "professional", "education"].iter().enumerate() {
            id = append_at(&id, vc(&format!("c{i}"), tag), &now()).unwrap();
        }
        let ids: Vec<&str> = id.credentials().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c0", "c1", "c2"]);
        assert_eq!(id.reputation_score(), 80);
    }

    #[test]
    fn duplicate_id_is_rejected_and_ledger_unchanged() {
        let id = append_at(&identity(), vc("1", "social"), &now()).unwrap();
        let snapshot = id.clone();
        let err = append_at(&id, vc("1", "government_id"), &now()).unwrap_err();
        assert_eq!(err, LedgerError::DuplicateCredential { id: "1".to_string() });
        assert_eq!(id, snapshot);
    }

    #[test]
    fn malformed_credential_is_rejected() {
        let mut bad = vc("1", "social");
        bad.credential_type = CredentialTypeValue::Array(vec![]);
        assert!(matches!(
            append_at(&identity(), bad, &now()),
            Err(LedgerError::MalformedCredential(_))
        ));

        let mut bad = vc("2", "social");
        bad.credential_subject.remove("id");
        assert!(matches!(
            append_at(&identity(), bad, &now()),
            Err(LedgerError::MalformedCredential(_))
        ));
    }

    #[test]
    fn serializes_with_camel_case_names() {
        let id = append_at(&identity(), vc("1", "social"), &now()).unwrap();
        let v = serde_json::to_value(&id).unwrap();
        assert_eq!(v["reputationScore"], 25);
        assert_eq!(v["did"], "did:ethr:0xabcdef0123");
        assert!(v.get("lastAnchorHash").is_none());
        assert!(v.get("displayName").is_none());
        let back: Identity = serde_json::from_value(v).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn profile_update_keeps_ledger() {
        let id = append_at(&identity(), vc("1", "social"), &now()).unwrap();
        let updated = id
            .clone()
            .with_profile(Some("Ada".to_string()), None, Some("builder".to_string()));
        assert_eq!(updated.credentials(), id.credentials());
        assert_eq!(updated.reputation_score(), id.reputation_score());
        assert_eq!(updated.display_name.as_deref(), Some("Ada"));
    }

    #[test]
    fn consistency_check_catches_tampering() {
        let id = append_at(&identity(), vc("1", "social"), &now()).unwrap();
        assert!(id.check_consistency().is_ok());

        let mut v = serde_json::to_value(&id).unwrap();
        v["did"] = json!("did:ethr:0xother");
        let forged: Identity = serde_json::from_value(v).unwrap();
        assert!(forged.check_consistency().is_err());

        let mut v = serde_json::to_value(&id).unwrap();
        let dup = v["credentials"][0].clone();
        v["credentials"].as_array_mut().unwrap().push(dup);
        let doubled: Identity = serde_json::from_value(v).unwrap();
        assert!(matches!(
            doubled.check_consistency(),
            Err(LedgerError::DuplicateCredential { .. })
        ));
    }
}
