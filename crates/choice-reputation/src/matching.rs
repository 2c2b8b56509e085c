//! # Job Matching
//!
//! Scores how well an identity fits a job listing, out of 100:
//!
//! | Component      | Points | Full marks when                                  |
//! |----------------|--------|--------------------------------------------------|
//! | Trust score    | 50     | score ≥ `minScore` (else proportional)           |
//! | Badges         | 30     | no badges required (else share of those held)    |
//! | Wallet history | 20     | any `WalletHistoryCredential` is present         |
//!
//! The total is floored. Arithmetic is done over a common denominator so the
//! floor is exact.

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use choice_core::Timestamp;
use choice_vc::{CredentialKind, VerifiableCredential};

const SCORE_POINTS: u64 = 50;
const BADGE_POINTS: u64 = 30;
const WALLET_POINTS: u64 = 20;

/// Reason reported when no component produced one.
pub const FALLBACK_REASON: &str = "Partial match based on profile.";

/// Engagement kind of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobType {
    /// Salaried position.
    #[serde(rename = "Full-time")]
    FullTime,
    /// Fixed-term contract.
    Contract,
    /// DAO contributor role.
    #[serde(rename = "DAO")]
    Dao,
    /// Unpaid or prize-share collaboration.
    Collaboration,
    /// One-off task.
    Gig,
}

/// A job listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    /// Listing identifier.
    pub id: String,
    /// Role title.
    pub title: String,
    /// Hiring organization.
    pub company: String,
    /// Engagement kind.
    #[serde(rename = "type")]
    pub job_type: JobType,
    /// Free-text compensation.
    pub salary: String,
    /// Minimum reputation score for full score credit.
    pub min_score: u8,
    /// Education badge names (e.g. `"Advanced Badge"`).
    #[serde(default)]
    pub required_badges: Vec<String>,
}

/// Fit of one identity to one job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobMatch {
    /// Match percentage, `0..=100`.
    pub score: u8,
    /// Human-readable reasons, in component order.
    pub reasons: Vec<String>,
}

impl JobMatch {
    /// Reasons joined into one sentence list, or [`FALLBACK_REASON`].
    pub fn reason(&self) -> String {
        if self.reasons.is_empty() {
            FALLBACK_REASON.to_string()
        } else {
            self.reasons.join(". ")
        }
    }
}

/// Compute how well `credentials` with reputation `score` fit `job`.
pub fn calculate_job_match(
    job: &Job,
    score: u8,
    credentials: &[VerifiableCredential],
    now: &Timestamp,
) -> JobMatch {
    let mut reasons = Vec::new();

    // Score component as a fraction over min_score.
    let min = u64::from(job.min_score.max(1));
    let score_num = if score >= job.min_score {
        reasons.push(format!("Trust Score ({score}) meets requirement"));
        SCORE_POINTS * min
    } else {
        SCORE_POINTS * u64::from(score)
    };

    // Badge component as a fraction over the number of required badges.
    let required = job.required_badges.len() as u64;
    let badge_den = required.max(1);
    let badge_num = if required == 0 {
        BADGE_POINTS
    } else {
        let held: Vec<&str> = credentials
            .iter()
            .filter(|vc| vc.has_kind(CredentialKind::EducationCredential))
            .filter_map(|vc| vc.subject_str("badge"))
            .collect();
        let found = job
            .required_badges
            .iter()
            .filter(|b| held.contains(&b.as_str()))
            .count() as u64;
        if found > 0 {
            reasons.push("Has required Education Badges".to_string());
        }
        BADGE_POINTS * found
    };

    let mut wallet_points = 0;
    if let Some(wallet) = credentials
        .iter()
        .find(|vc| vc.has_kind(CredentialKind::WalletHistoryCredential))
    {
        wallet_points = WALLET_POINTS;
        if let Some(years) = wallet
            .subject_str("firstTxDate")
            .and_then(|d| Timestamp::parse_lenient(d).ok())
            .map(|first| i64::from(now.as_datetime().year() - first.as_datetime().year()))
        {
            if years > 2 {
                reasons.push(format!("Verified {years} years on-chain activity"));
            }
        }
    }

    let den = min * badge_den;
    let total = (score_num * badge_den + badge_num * min) / den + wallet_points;
    JobMatch {
        score: u8::try_from(total.min(100)).unwrap_or(100),
        reasons,
    }
}

/// Match every job and sort best first. Ties keep listing order.
pub fn rank_jobs(
    jobs: &[Job],
    score: u8,
    credentials: &[VerifiableCredential],
    now: &Timestamp,
) -> Vec<(Job, JobMatch)> {
    let mut ranked: Vec<(Job, JobMatch)> = jobs
        .iter()
        .map(|job| (job.clone(), calculate_job_match(job, score, credentials, now)))
        .collect();
    ranked.sort_by(|a, b| b.1.score.cmp(&a.1.score));
    ranked
}

/// The demonstration job board.
pub fn sample_jobs() -> Vec<Job> {
    vec![
        listing(
            "1",
            "Senior DeFi Strategist",
            "Yield Protocol",
            JobType::FullTime,
            "$150k - $220k",
            70,
            &["Advanced Badge"],
        ),
        listing(
            "2",
            "Community Lead",
            "NFT Collection Y",
            JobType::Contract,
            "$4k / month",
            40,
            &["Beginner Badge"],
        ),
        listing(
            "4",
            "Hackathon Teammate: Frontend",
            "Team Alpha",
            JobType::Collaboration,
            "Prize Pool Share",
            30,
            &[],
        ),
        listing(
            "5",
            "Logo Designer",
            "Stealth Startup",
            JobType::Gig,
            "$500 Fixed",
            20,
            &[],
        ),
    ]
}

fn listing(
    id: &str,
    title: &str,
    company: &str,
    job_type: JobType,
    salary: &str,
    min_score: u8,
    badges: &[&str],
) -> Job {
    Job {
        id: id.to_string(),
        title: title.to_string(),
        company: company.to_string(),
        job_type,
        salary: salary.to_string(),
        min_score,
        required_badges: badges.iter().map(|b| b.to_string()).collect(),
    }
}
