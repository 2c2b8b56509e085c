//! # Identity Persistence
//!
//! [`IdentityStore`] is the boundary between the pure ledger and storage.
//! Identities are keyed by [`Address::storage_key()`], so checksum and
//! lower-case spellings of one address share a record.
//!
//! ## Guarantees
//!
//! - **Last write wins.** A save replaces the whole record.
//! - **No partial writes.** File-backed stores write to a temporary file in
//!   the same directory and rename it over the target.
//! - **Loud decryption failure.** [`EncryptedFileStore`] returns
//!   [`StoreError::Decryption`] when the signature does not match. It never
//!   reports a record it cannot open as absent.

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use thiserror::Error;

use choice_core::{Address, CryptoError};
use choice_crypto::vault;

use crate::ledger::{Identity, LedgerError};

/// Errors from identity persistence.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Filesystem error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A record could not be serialized or parsed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The stored record could not be decrypted with the given signature.
    #[error("decryption failed for {address}: {reason}")]
    Decryption {
        /// Storage key of the record.
        address: String,
        /// Underlying cause.
        reason: String,
    },

    /// Encryption failed.
    #[error("encryption failed: {0}")]
    Encryption(String),

    /// The storage key cannot be used as a file name.
    #[error("address {0:?} cannot be used as a storage key")]
    InvalidKey(String),

    /// The record parsed but is not a consistent identity for its key.
    #[error("corrupt identity record for {address}: {reason}")]
    Corrupt {
        /// Storage key of the record.
        address: String,
        /// What was inconsistent.
        reason: String,
    },
}

/// Persistence for identity snapshots.
pub trait IdentityStore: Send + Sync {
    /// Load the identity for `address`, or `None` if none was saved.
    fn load(&self, address: &Address) -> Result<Option<Identity>, StoreError>;

    /// Save `identity`, replacing any previous record for its address.
    fn save(&self, identity: &Identity) -> Result<(), StoreError>;

    /// Remove the record for `address`. Returns whether one existed.
    fn remove(&self, address: &Address) -> Result<bool, StoreError>;
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

/// An [`IdentityStore`] held in process memory.
#[derive(Debug, Default)]
pub struct MemoryIdentityStore {
    records: RwLock<HashMap<String, Identity>>,
}

impl MemoryIdentityStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored identities.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// True if no identity is stored.
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl IdentityStore for MemoryIdentityStore {
    fn load(&self, address: &Address) -> Result<Option<Identity>, StoreError> {
        Ok(self.records.read().get(&address.storage_key()).cloned())
    }

    fn save(&self, identity: &Identity) -> Result<(), StoreError> {
        self.records
            .write()
            .insert(identity.address().storage_key(), identity.clone());
        Ok(())
    }

    fn remove(&self, address: &Address) -> Result<bool, StoreError> {
        Ok(self.records.write().remove(&address.storage_key()).is_some())
    }
}

// ---------------------------------------------------------------------------
// Plain files
// ---------------------------------------------------------------------------

/// An [`IdentityStore`] writing one JSON file per identity.
///
/// Layout: `{dir}/{storage_key}.json`.
#[derive(Debug, Clone)]
pub struct FileIdentityStore {
    dir: PathBuf,
}

impl FileIdentityStore {
    /// Create a store rooted at `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Root directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the record for `address`.
    pub fn record_path(&self, address: &Address) -> Result<PathBuf, StoreError> {
        Ok(self.dir.join(format!("{}.json", file_stem(address)?)))
    }
}

impl IdentityStore for FileIdentityStore {
    fn load(&self, address: &Address) -> Result<Option<Identity>, StoreError> {
        let path = self.record_path(address)?;
        let Some(bytes) = read_optional(&path)? else {
            return Ok(None);
        };
        let identity: Identity = serde_json::from_slice(&bytes)?;
        check_loaded(address, &identity)?;
        tracing::debug!(address = %address, path = %path.display(), "loaded identity");
        Ok(Some(identity))
    }

    fn save(&self, identity: &Identity) -> Result<(), StoreError> {
        let path = self.record_path(identity.address())?;
        let bytes = serde_json::to_vec_pretty(identity)?;
        write_atomic(&self.dir, &path, &bytes)?;
        tracing::info!(
            address = %identity.address(),
            credentials = identity.credentials().len(),
            "saved identity"
        );
        Ok(())
    }

    fn remove(&self, address: &Address) -> Result<bool, StoreError> {
        remove_optional(&self.record_path(address)?)
    }
}

// ---------------------------------------------------------------------------
// Vault-encrypted files
// ---------------------------------------------------------------------------

/// An [`IdentityStore`] that encrypts each record with a key derived from a
/// wallet signature.
///
/// Layout: `{dir}/{storage_key}.vault`, each file holding the hex output of
/// [`vault::encrypt`].
#[derive(Clone)]
pub struct EncryptedFileStore {
    dir: PathBuf,
    signature: String,
}

impl std::fmt::Debug for EncryptedFileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncryptedFileStore")
            .field("dir", &self.dir)
            .field("signature", &"<redacted>")
            .finish()
    }
}

impl EncryptedFileStore {
    /// Create a store rooted at `dir` that seals records with `signature`.
    pub fn new(dir: impl Into<PathBuf>, signature: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            signature: signature.into(),
        }
    }

    /// Root directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the record for `address`.
    pub fn record_path(&self, address: &Address) -> Result<PathBuf, StoreError> {
        Ok(self.dir.join(format!("{}.vault", file_stem(address)?)))
    }
}

impl IdentityStore for EncryptedFileStore {
    fn load(&self, address: &Address) -> Result<Option<Identity>, StoreError> {
        let path = self.record_path(address)?;
        let Some(bytes) = read_optional(&path)? else {
            return Ok(None);
        };
        let sealed = String::from_utf8_lossy(&bytes);
        let identity: Identity = vault::decrypt(&sealed, &self.signature).map_err(|e| {
            tracing::error!(address = %address, error = %e, "failed to open identity vault");
            match e {
                CryptoError::Decryption(reason) | CryptoError::MalformedCiphertext(reason) => {
                    StoreError::Decryption {
                        address: address.storage_key(),
                        reason,
                    }
                }
                other => StoreError::Decryption {
                    address: address.storage_key(),
                    reason: other.to_string(),
                },
            }
        })?;
        check_loaded(address, &identity)?;
        Ok(Some(identity))
    }

    fn save(&self, identity: &Identity) -> Result<(), StoreError> {
        let path = self.record_path(identity.address())?;
        let sealed = vault::encrypt(identity, &self.signature)
            .map_err(|e| StoreError::Encryption(e.to_string()))?;
        write_atomic(&self.dir, &path, sealed.as_bytes())?;
        tracing::info!(
            address = %identity.address(),
            credentials = identity.credentials().len(),
            "saved encrypted identity"
        );
        Ok(())
    }

    fn remove(&self, address: &Address) -> Result<bool, StoreError> {
        remove_optional(&self.record_path(address)?)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// File stem for an address. Only ASCII alphanumerics, `_` and `-` are
/// allowed so a key can never escape the store directory.
fn file_stem(address: &Address) -> Result<String, StoreError> {
    let key = address.storage_key();
    if key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        Ok(key)
    } else {
        Err(StoreError::InvalidKey(key))
    }
}

fn check_loaded(address: &Address, identity: &Identity) -> Result<(), StoreError> {
    if identity.address().storage_key() != address.storage_key() {
        return Err(StoreError::Corrupt {
            address: address.storage_key(),
            reason: format!("record belongs to {}", identity.address()),
        });
    }
    identity
        .check_consistency()
        .map_err(|e: LedgerError| StoreError::Corrupt {
            address: address.storage_key(),
            reason: e.to_string(),
        })
}

fn read_optional(path: &Path) -> Result<Option<Vec<u8>>, StoreError> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn remove_optional(path: &Path) -> Result<bool, StoreError> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

fn write_atomic(dir: &Path, path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    std::fs::create_dir_all(dir)?;
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| StoreError::Io(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use choice_core::Timestamp;
    use choice_vc::VerifiableCredential;
    use serde_json::{json, Map};

    fn identity(addr: &str) -> Identity {
        let mut subject = Map::new();
        subject.insert("id".to_string(), json!("did:ethr:x"));
        let vc = VerifiableCredential::new(
            "c1",
            vec!["social".to_string()],
            "issuer",
            Timestamp::parse("2026-01-01T00:00:00Z").unwrap(),
            subject,
        );
        let id = Identity::new(Address::new(addr).unwrap());
        crate::ledger::append_at(&id, vc, &Timestamp::parse("2026-01-02T00:00:00Z").unwrap())
            .unwrap()
    }

    #[test]
    fn memory_store_roundtrip_and_case_folding() {
        let store = MemoryIdentityStore::new();
        let id = identity("0xABC");
        store.save(&id).unwrap();
        assert_eq!(store.len(), 1);
        let loaded = store.load(&Address::new("0xabc").unwrap()).unwrap();
        assert_eq!(loaded, Some(id));
        assert!(store.remove(&Address::new("0xAbC").unwrap()).unwrap());
        assert!(store.is_empty());
    }

    #[test]
    fn memory_store_last_write_wins() {
        let store = MemoryIdentityStore::new();
        let first = identity("0x1");
        let second = first.clone().with_profile(Some("b".to_string()), None, None);
        store.save(&first).unwrap();
        store.save(&second).unwrap();
        let loaded = store.load(first.address()).unwrap().unwrap();
        assert_eq!(loaded.display_name.as_deref(), Some("b"));
    }

    #[test]
    fn file_stem_rejects_traversal() {
        assert!(file_stem(&Address::new("../../etc").unwrap()).is_err());
        assert!(file_stem(&Address::new("a/b").unwrap()).is_err());
        assert_eq!(file_stem(&Address::new("0xAB_c-1").unwrap()).unwrap(), "0xab_c-1");
    }

    #[test]
    fn missing_record_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileIdentityStore::new(dir.path());
        assert!(store.load(&Address::new("0x1").unwrap()).unwrap().is_none());
        assert!(!store.remove(&Address::new("0x1").unwrap()).unwrap());
    }

    #[test]
    fn encrypted_store_debug_redacts_signature() {
        let store = EncryptedFileStore::new("/tmp/x", "0xsecret");
        let dbg = format!("{store:?}");
        assert!(!dbg.contains("0xsecret"));
    }
}
