//! # CLI Configuration
//!
//! Settings resolve from four layers, highest first:
//!
//! 1. command-line flags (`--store-dir`);
//! 2. environment (`CHOICE_STORE_DIR`, `CHOICE_VAULT_SIGNATURE`);
//! 3. the YAML file named by `--config`;
//! 4. built-in defaults.
//!
//! ```yaml
//! store_dir: /var/lib/choice
//! encrypt_at_rest: true
//! default_threshold: 60
//! ```
//!
//! The vault signature is read from the environment only, never from a file
//! or the command line.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use choice_crypto::LocalCasPinner;
use choice_ledger::{EncryptedFileStore, FileIdentityStore, IdentityStore};

/// Environment variable overriding the store directory.
pub const ENV_STORE_DIR: &str = "CHOICE_STORE_DIR";

/// Environment variable carrying the wallet signature that keys the vault.
pub const ENV_VAULT_SIGNATURE: &str = "CHOICE_VAULT_SIGNATURE";

/// Store directory when nothing else names one.
pub const DEFAULT_STORE_DIR: &str = ".choice";

/// Threshold for `choice prove` when neither flag nor file sets one.
pub const DEFAULT_THRESHOLD: u8 = 50;

/// The YAML configuration file. Every field is optional.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Directory for identity records and pinned content.
    pub store_dir: Option<PathBuf>,
    /// Require vault encryption of identity records.
    pub encrypt_at_rest: Option<bool>,
    /// Default proof threshold.
    pub default_threshold: Option<u8>,
}

impl ConfigFile {
    /// Read and parse a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid config file: {}", path.display()))
    }

    /// Parse config YAML. An empty document is the empty config.
    pub fn parse(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }
}

/// Fully resolved settings.
#[derive(Clone, PartialEq, Eq)]
pub struct Settings {
    /// Directory for identity records and pinned content.
    pub store_dir: PathBuf,
    /// Vault signature when records are encrypted.
    pub vault_signature: Option<String>,
    /// Default proof threshold.
    pub default_threshold: u8,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("store_dir", &self.store_dir)
            .field(
                "vault_signature",
                &self.vault_signature.as_ref().map(|_| "<redacted>"),
            )
            .field("default_threshold", &self.default_threshold)
            .finish()
    }
}

impl Settings {
    /// Resolve settings from the flag, the environment lookup `env`, and
    /// the optional config file.
    ///
    /// Encryption is on when the file says so, or when the file is silent
    /// and a vault signature is present. Requesting encryption without a
    /// signature is an error.
    pub fn resolve(
        config_path: Option<&Path>,
        store_dir_flag: Option<&Path>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let file = match config_path {
            Some(path) => ConfigFile::load(path)?,
            None => ConfigFile::default(),
        };

        let store_dir = store_dir_flag
            .map(Path::to_path_buf)
            .or_else(|| env(ENV_STORE_DIR).filter(|s| !s.is_empty()).map(PathBuf::from))
            .or(file.store_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_DIR));

        let signature = env(ENV_VAULT_SIGNATURE).filter(|s| !s.is_empty());
        let encrypt = file.encrypt_at_rest.unwrap_or(signature.is_some());
        let vault_signature = match (encrypt, signature) {
            (true, Some(sig)) => Some(sig),
            (true, None) => bail!(
                "encrypt_at_rest is set but {ENV_VAULT_SIGNATURE} is not; \
                 export the wallet signature to open the vault"
            ),
            (false, Some(_)) => {
                tracing::debug!("vault signature present but encrypt_at_rest is false");
                None
            }
            (false, None) => None,
        };

        Ok(Self {
            store_dir,
            vault_signature,
            default_threshold: file.default_threshold.unwrap_or(DEFAULT_THRESHOLD),
        })
    }

    /// Resolve against the process environment.
    pub fn from_env(config_path: Option<&Path>, store_dir_flag: Option<&Path>) -> Result<Self> {
        Self::resolve(config_path, store_dir_flag, |key| std::env::var(key).ok())
    }

    /// Open the identity store these settings describe.
    pub fn open_store(&self) -> Box<dyn IdentityStore> {
        let dir = self.store_dir.join("identities");
        match &self.vault_signature {
            Some(sig) => Box::new(EncryptedFileStore::new(dir, sig.clone())),
            None => Box::new(FileIdentityStore::new(dir)),
        }
    }

    /// Open the local content pinner.
    pub fn open_pinner(&self) -> LocalCasPinner {
        LocalCasPinner::new(self.store_dir.join("cas"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    fn write_config(dir: &Path, yaml: &str) -> PathBuf {
        let path = dir.join("choice.yaml");
        std::fs::write(&path, yaml).unwrap();
        path
    }

    #[test]
    fn defaults() {
        let s = Settings::resolve(None, None, env_of(&[])).unwrap();
        assert_eq!(s.store_dir, PathBuf::from(DEFAULT_STORE_DIR));
        assert_eq!(s.vault_signature, None);
        assert_eq!(s.default_threshold, DEFAULT_THRESHOLD);
    }

    #[test]
    fn flag_beats_env_beats_file() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = write_config(dir.path(), "store_dir: /from/file\ndefault_threshold: 70\n");
        let env = env_of(&[(ENV_STORE_DIR, "/from/env")]);

        let s = Settings::resolve(Some(&cfg), Some(Path::new("/from/flag")), &env).unwrap();
        assert_eq!(s.store_dir, PathBuf::from("/from/flag"));

        let s = Settings::resolve(Some(&cfg), None, &env).unwrap();
        assert_eq!(s.store_dir, PathBuf::from("/from/env"));
        assert_eq!(s.default_threshold, 70);

        let s = Settings::resolve(Some(&cfg), None, env_of(&[])).unwrap();
        assert_eq!(s.store_dir, PathBuf::from("/from/file"));
    }

    #[test]
    fn signature_enables_encryption_unless_file_disables_it() {
        let env = env_of(&[(ENV_VAULT_SIGNATURE, "0xsig")]);
        let s = Settings::resolve(None, None, &env).unwrap();
        assert_eq!(s.vault_signature.as_deref(), Some("0xsig"));

        let dir = tempfile::tempdir().unwrap();
        let cfg = write_config(dir.path(), "encrypt_at_rest: false\n");
        let s = Settings::resolve(Some(&cfg), None, &env).unwrap();
        assert_eq!(s.vault_signature, None);
    }

    #[test]
    fn encryption_without_signature_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = write_config(dir.path(), "encrypt_at_rest: true\n");
        assert!(Settings::resolve(Some(&cfg), None, env_of(&[])).is_err());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(ConfigFile::parse("store_dri: /typo\n").is_err());
        assert_eq!(ConfigFile::parse("").unwrap(), ConfigFile::default());
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let absent = dir.path().join("absent.yaml");
        assert!(Settings::resolve(Some(&absent), None, env_of(&[])).is_err());
    }

    #[test]
    fn debug_redacts_signature() {
        let env = env_of(&[(ENV_VAULT_SIGNATURE, "0xsecret")]);
        let s = Settings::resolve(None, None, env).unwrap();
        assert!(!format!("{s:?}").contains("0xsecret"));
    }
}
