//! # choice-vc — Verifiable Credentials for CHOICE iD
//!
//! Implements the credential envelope that identities accumulate:
//!
//! - **Credential structure** ([`VerifiableCredential`]) with a typed
//!   envelope and an open `credentialSubject` map.
//! - **Tag vocabulary** ([`CredentialKind`]) for the tags the reputation
//!   engine recognizes. Unknown tags remain legal.
//! - **Structural validation** ([`VerifiableCredential::validate()`]), the
//!   single gate a credential passes before the ledger accepts it.
//!
//! ## Invariants
//!
//! - `issuanceDate` is parsed when the credential is deserialized. A value
//!   that does not parse never produces a `VerifiableCredential`, so scoring
//!   never sees an unparseable date. The issuer's date text is kept and
//!   written back unchanged.
//! - The `proof` block and `ipfsCid` are carried but not interpreted.

pub mod credential;
pub mod kind;
pub mod proof;

pub use credential::{
    CredentialSubject, CredentialTypeValue, VcError, VerifiableCredential,
    VERIFIABLE_CREDENTIAL_TAG,
};
pub use kind::CredentialKind;
pub use proof::Proof;
