//! # Content-Addressed Pinning
//!
//! Credentials may be pinned to a content-addressed store and referenced by
//! an IPFS-style identifier. The identifier is derived from the value's
//! `CanonicalBytes`, so two producers that serialize the same credential
//! with different key order still agree on its [`Cid`].
//!
//! ## Security Invariant
//!
//! [`LocalCasPinner::fetch()`] recomputes the identifier of what it read and
//! refuses content whose identifier does not match the request. A corrupted
//! or substituted file is an error, never a silently different credential.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use choice_core::{sha256_hex, CanonicalBytes, CanonicalizationError};

/// Number of hex characters of the digest kept after the `Qm` prefix.
const CID_HEX_LEN: usize = 46;

/// Errors from pinning or fetching content.
#[derive(Error, Debug)]
pub enum CasError {
    /// The value could not be canonicalized.
    #[error("canonicalization failed: {0}")]
    Canonicalization(#[from] CanonicalizationError),

    /// The identifier is not a well-formed content identifier.
    #[error("invalid content identifier: {0:?}")]
    InvalidCid(String),

    /// No content is pinned under the identifier.
    #[error("content not found: {0}")]
    NotFound(Cid),

    /// Stored content does not hash to the requested identifier.
    #[error("integrity check failed for {expected}: content hashes to {actual}")]
    Integrity {
        /// The identifier that was requested.
        expected: Cid,
        /// The identifier the stored bytes actually hash to.
        actual: Cid,
    },

    /// Stored content is not valid JSON.
    #[error("stored content for {cid} is not JSON: {source}")]
    Corrupt {
        /// The identifier that was requested.
        cid: Cid,
        /// The parse failure.
        source: serde_json::Error,
    },

    /// Filesystem error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// An IPFS-style content identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cid(String);

impl Cid {
    /// Accept an identifier string.
    ///
    /// Identifiers are used as file names, so only ASCII alphanumerics are
    /// allowed.
    pub fn new(value: impl Into<String>) -> Result<Self, CasError> {
        let s = value.into();
        if s.is_empty() || !s.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(CasError::InvalidCid(s));
        }
        Ok(Self(s))
    }

    /// Access the identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Cid {
    type Error = CasError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Cid> for String {
    fn from(cid: Cid) -> Self {
        cid.0
    }
}

impl std::fmt::Display for Cid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Compute the content identifier of a serializable value.
///
/// `Qm` followed by the first 46 hex characters of the SHA-256 of the
/// value's canonical bytes.
pub fn content_cid(value: &impl Serialize) -> Result<Cid, CasError> {
    let canonical = CanonicalBytes::new(value)?;
    Ok(cid_of(&canonical))
}

fn cid_of(canonical: &CanonicalBytes) -> Cid {
    let hex = sha256_hex(canonical);
    Cid(format!("Qm{}", &hex[..CID_HEX_LEN]))
}

/// A content-addressed store that credentials can be pinned to.
///
/// Object-safe so a remote pinning service can be substituted behind
/// `Box<dyn ContentPinner>`.
pub trait ContentPinner: Send + Sync {
    /// Pin a JSON document and return its identifier.
    fn pin(&self, content: &Value) -> Result<Cid, CasError>;

    /// Fetch a previously pinned JSON document.
    fn fetch(&self, cid: &Cid) -> Result<Value, CasError>;
}

/// A [`ContentPinner`] backed by a local directory.
///
/// Each document is written as `{root}/{cid}.json` in canonical form.
#[derive(Debug, Clone)]
pub struct LocalCasPinner {
    root: PathBuf,
}

impl LocalCasPinner {
    /// Create a pinner rooted at `root`. The directory is created lazily.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the root directory of this pinner.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Filesystem path for a pinned document.
    pub fn content_path(&self, cid: &Cid) -> PathBuf {
        self.root.join(format!("{cid}.json"))
    }
}

impl ContentPinner for LocalCasPinner {
    fn pin(&self, content: &Value) -> Result<Cid, CasError> {
        let canonical = CanonicalBytes::new(content)?;
        let cid = cid_of(&canonical);
        std::fs::create_dir_all(&self.root)?;
        let path = self.content_path(&cid);
        if !path.exists() {
            std::fs::write(&path, canonical.as_bytes())?;
        }
        tracing::debug!(cid = %cid, path = %path.display(), "pinned content");
        Ok(cid)
    }

    fn fetch(&self, cid: &Cid) -> Result<Value, CasError> {
        let path = self.content_path(cid);
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(CasError::NotFound(cid.clone()))
            }
            Err(e) => return Err(e.into()),
        };
        let value: Value = serde_json::from_slice(&bytes).map_err(|source| CasError::Corrupt {
            cid: cid.clone(),
            source,
        })?;
        let actual = cid_of(&CanonicalBytes::from_value(value.clone())?);
        if &actual != cid {
            tracing::warn!(
                expected = %cid,
                actual = %actual,
                "pinned content failed integrity check"
            );
            return Err(CasError::Integrity {
                expected: cid.clone(),
                actual,
            });
        }
        Ok(value)
    }
}
