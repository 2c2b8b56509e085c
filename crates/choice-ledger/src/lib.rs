//! # choice-ledger — Credential Ledger
//!
//! Owns the [`Identity`] aggregate: an address, its derived DID, and the
//! append-only list of credentials it has accumulated.
//!
//! ## Value Semantics
//!
//! An `Identity` is an immutable snapshot. [`append()`] and [`anchor()`]
//! take a snapshot by reference and return a new one; the input is never
//! modified. Concurrent callers each work on their own snapshot, and
//! serializing the results back to a store is the caller's job
//! (last write wins).
//!
//! ## Invariants
//!
//! - Credential ids are unique within a ledger.
//! - Credentials are never removed or mutated once appended.
//! - `reputationScore` is written only by the reputation engine, and is
//!   recomputed over the full list on every append.
//!
//! ## Persistence
//!
//! [`IdentityStore`] is the persistence boundary. Three implementations are
//! provided: in-memory, plain JSON files, and vault-encrypted files.

pub mod anchor;
pub mod ledger;
pub mod store;

pub use anchor::{anchor, ReputationProof};
pub use ledger::{append, append_at, Identity, LedgerError};
pub use store::{
    EncryptedFileStore, FileIdentityStore, IdentityStore, MemoryIdentityStore, StoreError,
};
