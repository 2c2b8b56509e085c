//! # Weight Table, Categories, and Decay
//!
//! Every `match` on [`CredentialKind`] here is exhaustive, so adding a tag
//! to the vocabulary does not compile until it has a weight.
//!
//! ## Decay in tenths
//!
//! The decay factor is `max(0.1, 1 - 0.1 * yearsOld)` for credentials at
//! least a year old. It is a whole number of tenths for every integer age,
//! so [`decay_factor_tenths()`] returns it as an integer in `1..=10` and the
//! engine never touches floating point.

use choice_vc::{CredentialKind, VerifiableCredential};

/// Fixed floor awarded to every identity.
pub const BASE_SCORE: u32 = 10;

/// Weight of a credential none of whose tags is in the table.
pub const DEFAULT_WEIGHT: u32 = 5;

/// Weight of a single recognized tag.
pub fn kind_weight(kind: CredentialKind) -> u32 {
    match kind {
        CredentialKind::GovernmentId => 50,
        CredentialKind::Professional => 30,
        CredentialKind::Education => 25,
        CredentialKind::Social => 15,
        CredentialKind::SelfAttested => 5,
        CredentialKind::PhysicalCredential => 20,
        CredentialKind::SocialCredential => 10,
        CredentialKind::EducationCredential => 10,
        CredentialKind::WalletHistoryCredential => 10,
    }
}

/// Resolved weight of a credential: the maximum over its recognized tags,
/// or [`DEFAULT_WEIGHT`] when none is recognized.
pub fn credential_weight(vc: &VerifiableCredential) -> u32 {
    vc.kinds().map(kind_weight).max().unwrap_or(DEFAULT_WEIGHT)
}

/// Breakdown bucket a credential counts toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// `PhysicalCredential`.
    Physical,
    /// `SocialCredential`.
    Social,
    /// `WalletHistoryCredential`.
    Finance,
    /// `EducationCredential`.
    Education,
}

/// Assign a credential to at most one category. First match wins, in the
/// order physical, social, finance, education.
pub fn categorize(vc: &VerifiableCredential) -> Option<Category> {
    const ORDER: [(CredentialKind, Category); 4] = [
        (CredentialKind::PhysicalCredential, Category::Physical),
        (CredentialKind::SocialCredential, Category::Social),
        (CredentialKind::WalletHistoryCredential, Category::Finance),
        (CredentialKind::EducationCredential, Category::Education),
    ];
    ORDER
        .iter()
        .find(|(kind, _)| vc.has_kind(*kind))
        .map(|(_, category)| *category)
}

/// Decay factor for a credential `years_old` whole years old, in tenths.
///
/// 10 (no decay) below one year, then one tenth less per year, floored at 1.
/// Negative ages (issued in the future) do not decay.
pub fn decay_factor_tenths(years_old: i64) -> u32 {
    if years_old < 1 {
        return 10;
    }
    let remaining = 10_i64.saturating_sub(years_old).max(1);
    // remaining is in 1..=9 here.
    remaining as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use choice_core::Timestamp;
    use serde_json::{json, Map};

    fn vc(tags: &[&str]) -> VerifiableCredential {
        let mut subject = Map::new();
        subject.insert("id".to_string(), json!("did:ethr:0xabc"));
        VerifiableCredential::new(
            "urn:uuid:t",
            tags.iter().map(|t| t.to_string()).collect(),
            "issuer",
            Timestamp::parse("2026-01-01T00:00:00Z").unwrap(),
            subject,
        )
    }

    #[test]
    fn weight_table_values() {
        assert_eq!(kind_weight(CredentialKind::GovernmentId), 50);
        assert_eq!(kind_weight(CredentialKind::Professional), 30);
        assert_eq!(kind_weight(CredentialKind::Education), 25);
        assert_eq!(kind_weight(CredentialKind::Social), 15);
        assert_eq!(kind_weight(CredentialKind::SelfAttested), 5);
        assert_eq!(kind_weight(CredentialKind::PhysicalCredential), 20);
        assert_eq!(kind_weight(CredentialKind::SocialCredential), 10);
        assert_eq!(kind_weight(CredentialKind::EducationCredential), 10);
        assert_eq!(kind_weight(CredentialKind::WalletHistoryCredential), 10);
    }

    #[test]
    fn weight_takes_maximum_tag() {
        assert_eq!(credential_weight(&vc(&["social", "government_id"])), 50);
        assert_eq!(
            credential_weight(&vc(&["VerifiableCredential", "PhysicalCredential"])),
            20
        );
    }

    #[test]
    fn unknown_tags_get_default_weight() {
        assert_eq!(credential_weight(&vc(&["VerifiableCredential"])), DEFAULT_WEIGHT);
        assert_eq!(credential_weight(&vc(&["membership", "whatever"])), DEFAULT_WEIGHT);
    }

    #[test]
    fn category_first_match_wins() {
        assert_eq!(
            categorize(&vc(&["SocialCredential", "PhysicalCredential"])),
            Some(Category::Physical)
        );
        assert_eq!(
            categorize(&vc(&["EducationCredential", "WalletHistoryCredential"])),
            Some(Category::Finance)
        );
        assert_eq!(
            categorize(&vc(&["EducationCredential", "SocialCredential"])),
            Some(Category::Social)
        );
        assert_eq!(categorize(&vc(&["government_id"])), None);
    }

    #[test]
    fn decay_schedule() {
        assert_eq!(decay_factor_tenths(-3), 10);
        assert_eq!(decay_factor_tenths(0), 10);
        assert_eq!(decay_factor_tenths(1), 9);
        assert_eq!(decay_factor_tenths(2), 8);
        assert_eq!(decay_factor_tenths(8), 2);
        assert_eq!(decay_factor_tenths(9), 1);
        assert_eq!(decay_factor_tenths(10), 1);
        assert_eq!(decay_factor_tenths(i64::MAX), 1);
    }
}
