//! # choice-crypto — Cryptographic Primitives
//!
//! Provides the cryptographic building blocks for CHOICE iD:
//!
//! - **Reputation commitments**: the publishable `0x`-prefixed SHA-256 over
//!   a score and an address.
//! - **Vault encryption**: AES-256-GCM with a key derived from a wallet
//!   signature, used to keep identities encrypted at rest.
//! - **Content-addressed pinning**: IPFS-style identifiers computed from
//!   `CanonicalBytes`, plus a filesystem pinner that verifies content on
//!   retrieval.
//!
//! ## Crate Policy
//!
//! - Depends only on `choice-core` internally.
//! - Tests use real SHA-256 and real AES-GCM. Nothing cryptographic is mocked.

pub mod cas;
pub mod sha256;
pub mod vault;

pub use cas::{content_cid, CasError, Cid, ContentPinner, LocalCasPinner};
pub use sha256::generate_reputation_hash;
pub use vault::{decrypt, encrypt};
