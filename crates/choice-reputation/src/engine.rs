//! # Reputation Scoring
//!
//! ## Algorithm
//!
//! ```text
//! weight_i      = max tag weight of credential i (default 5)
//! factor_i      = decay factor for its whole-year age, in tenths
//! weightedScore = Σ weight_i
//! totalDecay    = Σ weight_i · (10 − factor_i) / 10
//! score         = clamp(round(10 + weightedScore − totalDecay), 0, 100)
//! ```
//!
//! `totalDecay` is accumulated in tenths of a point so the rounding step is
//! exact. Rounding is half-up, which for the non-negative quantities involved
//! matches rounding to nearest with ties toward positive infinity.
//!
//! ## Sybil risk
//!
//! Counts credentials whose `type` is anything other than exactly
//! `self_attested`: three or more is `low`, one or two `medium`, none `high`.
//! This checks neither issuer diversity nor tag diversity.

use serde::{Deserialize, Serialize};

use choice_core::Timestamp;
use choice_vc::VerifiableCredential;

use crate::weights::{categorize, credential_weight, decay_factor_tenths, Category, BASE_SCORE};

/// Maximum reputation score.
const MAX_SCORE: u64 = 100;

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Coarse likelihood that an identity is fabricated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SybilRisk {
    /// Three or more non-self-attested credentials.
    Low,
    /// One or two non-self-attested credentials.
    Medium,
    /// No non-self-attested credentials.
    High,
}

impl SybilRisk {
    /// Classify from the number of non-self-attested credentials.
    pub fn from_count(non_self_attested: usize) -> Self {
        match non_self_attested {
            0 => Self::High,
            1 | 2 => Self::Medium,
            _ => Self::Low,
        }
    }

    /// Lowercase label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for SybilRisk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Undecayed weight accumulated per category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScores {
    /// Physical documents.
    pub physical: u64,
    /// Social accounts.
    pub social: u64,
    /// Wallet history.
    pub finance: u64,
    /// Education badges.
    pub education: u64,
}

impl CategoryScores {
    fn add(&mut self, category: Category, weight: u64) {
        let slot = match category {
            Category::Physical => &mut self.physical,
            Category::Social => &mut self.social,
            Category::Finance => &mut self.finance,
            Category::Education => &mut self.education,
        };
        *slot += weight;
    }

    /// Sum across all four buckets.
    pub fn total(&self) -> u64 {
        self.physical + self.social + self.finance + self.education
    }
}

/// How a score was derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReputationBreakdown {
    /// Fixed floor, always 10.
    pub base_score: u64,
    /// Sum of resolved weights before decay.
    pub weighted_score: u64,
    /// Negated, rounded total decay. Zero or negative.
    pub time_decay_adjustment: i64,
    /// Same value as [`ReputationResult::score`].
    pub total_score: u8,
    /// Per-category undecayed weight.
    pub categories: CategoryScores,
}

/// Output of the reputation engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReputationResult {
    /// Final score in `0..=100`.
    pub score: u8,
    /// Derivation details.
    pub breakdown: ReputationBreakdown,
    /// Sybil-risk classification.
    pub sybil_risk: SybilRisk,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Score `credentials` as of the current instant.
pub fn calculate_reputation(credentials: &[VerifiableCredential]) -> ReputationResult {
    calculate_reputation_at(credentials, &Timestamp::now())
}

/// Score `credentials` as of `now`.
///
/// Pure: the result depends only on the arguments.
pub fn calculate_reputation_at(
    credentials: &[VerifiableCredential],
    now: &Timestamp,
) -> ReputationResult {
    let base = u64::from(BASE_SCORE);
    let mut weighted: u64 = 0;
    let mut decay_tenths: u64 = 0;
    let mut categories = CategoryScores::default();

    for vc in credentials {
        let weight = u64::from(credential_weight(vc));

        if let Some(category) = categorize(vc) {
            categories.add(category, weight);
        }

        let years_old = vc.issuance_date.instant().whole_years_until(now);
        let factor = u64::from(decay_factor_tenths(years_old));

        weighted += weight;
        decay_tenths += weight * (10 - factor);
    }

    // factor >= 1, so decay never exceeds weighted and this cannot underflow.
    let net_tenths = (base + weighted) * 10 - decay_tenths;
    let score = round_tenths(net_tenths).min(MAX_SCORE);
    let score = u8::try_from(score).unwrap_or(u8::MAX);

    let non_self_attested = credentials.iter().filter(|vc| !vc.is_self_attested()).count();
    tracing::debug!(
        credentials = credentials.len(),
        weighted,
        decay_tenths,
        score,
        "computed reputation"
    );

    ReputationResult {
        score,
        breakdown: ReputationBreakdown {
            base_score: base,
            weighted_score: weighted,
            time_decay_adjustment: -i64::try_from(round_tenths(decay_tenths)).unwrap_or(i64::MAX),
            total_score: score,
            categories,
        },
        sybil_risk: SybilRisk::from_count(non_self_attested),
    }
}

/// Round a non-negative quantity expressed in tenths to the nearest whole,
/// ties up.
fn round_tenths(tenths: u64) -> u64 {
    (tenths + 5) / 10
}


#[cfg(test)]
mod proptests {
    use super::*;
    use choice_vc::CredentialKind;
    use proptest::prelude::*;
    use serde_json::{json, Map};

    fn arb_tag() -> impl Strategy<Value = String> {
        prop_oneof![
            prop::sample::select(CredentialKind::ALL.to_vec()).prop_map(|k| k.as_str().to_string()),
            Just("VerifiableCredential".to_string()),
            "[a-z]{3,10}",
        ]
    }

    fn arb_credential() -> impl Strategy<Value = VerifiableCredential> {
        (
            "[a-z0-9]{1,12}",
            prop::collection::vec(arb_tag(), 1..4),
            0i64..2_000_000_000,
        )
            .prop_map(|(id, tags, secs)| {
                let mut subject = Map::new();
                subject.insert("id".to_string(), json!("did:ethr:0x1"));
                VerifiableCredential::new(
                    id,
                    tags,
                    "issuer",
                    Timestamp::from_epoch_secs(secs).unwrap(),
                    subject,
                )
            })
    }

    fn arb_now() -> impl Strategy<Value = Timestamp> {
        (0i64..2_500_000_000).prop_map(|s| Timestamp::from_epoch_secs(s).unwrap())
    }

    proptest! {
        #[test]
        fn score_is_bounded(
            creds in prop::collection::vec(arb_credential(), 0..40),
            now in arb_now(),
        ) {
            let r = calculate_reputation_at(&creds, &now);
            prop_assert!(r.score <= 100);
            prop_assert!(r.score >= 10);
            prop_assert_eq!(r.score, r.breakdown.total_score);
        }

        #[test]
        fn same_input_same_output(
            creds in prop::collection::vec(arb_credential(), 0..20),
            now in arb_now(),
        ) {
            prop_assert_eq!(
                calculate_reputation_at(&creds, &now),
                calculate_reputation_at(&creds, &now)
            );
        }

        /// Decay never removes more than 90% of the undecayed weight.
        #[test]
        fn decay_never_exceeds_ninety_percent(
            creds in prop::collection::vec(arb_credential(), 0..20),
            now in arb_now(),
        ) {
            let r = calculate_reputation_at(&creds, &now);
            let decay = r.breakdown.time_decay_adjustment.unsigned_abs();
            // decay is rounded half-up from at most 0.9 * weighted.
            prop_assert!(decay * 10 <= r.breakdown.weighted_score * 9 + 5);
        }

        #[test]
        fn categories_never_exceed_weighted(
            creds in prop::collection::vec(arb_credential(), 0..20),
            now in arb_now(),
        ) {
            let r = calculate_reputation_at(&creds, &now);
            prop_assert!(r.breakdown.categories.total() <= r.breakdown.weighted_score);
        }

        #[test]
        fn credential_order_is_irrelevant(
            creds in prop::collection::vec(arb_credential(), 0..12),
            now in arb_now(),
        ) {
            let mut reversed = creds.clone();
            reversed.reverse();
            prop_assert_eq!(
                calculate_reputation_at(&creds, &now),
                calculate_reputation_at(&reversed, &now)
            );
        }
    }
}
