//! # choice-reputation — Reputation Engine
//!
//! A pure function from a credential list to a score, a categorized
//! breakdown, and a Sybil-risk level. The engine holds no state: every call
//! re-derives everything from the credentials it is given, so calling it
//! twice on the same input at the same instant yields identical output.
//!
//! ## Modules
//!
//! - [`weights`]: the weight table, category assignment, and decay factor.
//! - [`engine`]: [`calculate_reputation()`] and its result types.
//! - [`matching`]: job-fit heuristic built on top of a score.
//!
//! ## Totality
//!
//! Scoring never fails. Every input has already passed credential
//! validation at ingestion (dates included), so there is no error path here.

pub mod engine;
pub mod matching;
pub mod weights;

pub use engine::{
    calculate_reputation, calculate_reputation_at, CategoryScores, ReputationBreakdown,
    ReputationResult, SybilRisk,
};
pub use matching::{calculate_job_match, rank_jobs, sample_jobs, Job, JobMatch, JobType};
pub use weights::{
    categorize, credential_weight, decay_factor_tenths, kind_weight, Category, BASE_SCORE,
    DEFAULT_WEIGHT,
};
