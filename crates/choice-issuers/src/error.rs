//! Errors from credential producers.

use thiserror::Error;

use choice_crypto::CasError;
use choice_vc::VcError;

/// Errors from issuing a credential.
#[derive(Error, Debug)]
pub enum IssuerError {
    /// The caller's input cannot be processed.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The upstream service declined to attest.
    #[error("verification rejected: {0}")]
    Rejected(String),

    /// The upstream service could not be reached or returned garbage.
    #[error("upstream unavailable: {0}")]
    Unavailable(String),

    /// The built credential failed validation.
    #[error(transparent)]
    Credential(#[from] VcError),

    /// Pinning the credential failed.
    #[error("pinning failed: {0}")]
    Pinning(#[from] CasError),
}
