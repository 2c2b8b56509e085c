//! # choice-core — Foundational Types for CHOICE iD
//!
//! The leaf crate of the workspace. It defines the primitives every other
//! crate builds on and depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for identifiers.** [`Address`] and [`Did`] are
//!    validated at construction. A DID is never assembled by string
//!    concatenation outside [`generate_did()`].
//!
//! 2. **Timestamps are parsed once, at ingestion.** [`Timestamp`] accepts
//!    the ISO-8601 shapes that credential producers emit and normalizes
//!    them to UTC. Anything downstream of deserialization holds a valid
//!    instant, so date arithmetic cannot fail.
//!
//! 3. **`CanonicalBytes` for content hashing.** Content identifiers and
//!    proof commitments are computed over RFC 8785 canonical JSON, never
//!    over ad-hoc `serde_json::to_vec()` output.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `choice-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod digest;
pub mod error;
pub mod identity;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use canonical::CanonicalBytes;
pub use digest::{sha256_digest, sha256_hex, ContentDigest, DigestAlgorithm};
pub use error::{CanonicalizationError, CryptoError, ValidationError};
pub use identity::{generate_did, Address, Did, DID_METHOD_PREFIX};
pub use temporal::{whole_years_between, IsoTimestamp, Timestamp};
