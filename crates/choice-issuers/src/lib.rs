//! # choice-issuers — Credential Producers
//!
//! Everything that hands the ledger a new credential: social account
//! verification, physical document checks, wallet-history analysis, and
//! course completion.
//!
//! ## Capabilities
//!
//! Each external service is a trait in [`traits`] with a deterministic mock
//! in [`mock`]. Mocks derive their output from a hash of the input, so the
//! same request always yields the same credential payload and tests need no
//! fixtures.
//!
//! ## Builders
//!
//! [`credentials`] turns a capability's output into a structurally valid
//! [`VerifiableCredential`](choice_vc::VerifiableCredential) with the tag set
//! and issuer each producer uses. Builders validate before returning, so
//! anything they emit is accepted by the ledger unless its id collides.

pub mod credentials;
pub mod education;
pub mod error;
pub mod mock;
pub mod traits;
pub mod transactions;

pub use credentials::{
    new_credential_id, physical_credential, pin_credential, social_credential,
    wallet_history_credential, ANALYTICS_ORACLE_DID, DOCUMENT_VERIFIER_DID,
};
pub use education::{
    course_catalog, education_credential, find_course, has_badge, Course, CourseLevel,
    EDUCATION_ISSUER_DID,
};
pub use error::IssuerError;
pub use mock::{
    MockDocumentVerifier, MockSocialConnector, MockWalletAnalyzer, StaticTransactionSource,
    MOCK_VERIFIER_NAME,
};
pub use traits::{
    DocumentType, DocumentVerification, DocumentVerifier, SocialConnector, SocialProfile,
    Transaction, TransactionSource, WalletAnalysis, WalletHistoryAnalyzer,
};
pub use transactions::{summarize_transactions, BlockchainStats, MonthActivity, ACTIVITY_MONTHS};
