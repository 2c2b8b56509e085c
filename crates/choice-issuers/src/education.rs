//! # Education Badges
//!
//! A fixed course catalog. Completing a course issues an
//! `EducationCredential` whose `badge` field (`"<Level> Badge"`) is what job
//! listings require.

use serde::{Deserialize, Serialize};
use serde_json::Map;

use choice_core::{Did, Timestamp};
use choice_vc::{CredentialKind, VerifiableCredential};

use crate::credentials::build;
use crate::error::IssuerError;

/// Issuer of education credentials.
pub const EDUCATION_ISSUER_DID: &str = "did:web:choice.love/education";

/// Course difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CourseLevel {
    /// Entry level.
    Beginner,
    /// Some experience assumed.
    Intermediate,
    /// Practitioner level.
    Advanced,
}

impl CourseLevel {
    /// The level name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }

    /// Badge awarded for completing a course at this level.
    pub fn badge(&self) -> String {
        format!("{} Badge", self.as_str())
    }
}

impl std::fmt::Display for CourseLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A catalog course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Stable course id (e.g. `"web3-101"`).
    pub id: String,
    /// Title, recorded as `courseName` in the credential.
    pub title: String,
    /// Difficulty.
    pub level: CourseLevel,
    /// Expected time to complete.
    pub duration: String,
    /// Points shown to the learner.
    pub points: u32,
    /// One-paragraph summary.
    pub description: String,
}

/// The course catalog.
pub fn course_catalog() -> Vec<Course> {
    let course = |id: &str, title: &str, level, duration: &str, points, description: &str| Course {
        id: id.to_string(),
        title: title.to_string(),
        level,
        duration: duration.to_string(),
        points,
        description: description.to_string(),
    };
    vec![
        course(
            "web3-101",
            "Web3 & Identity Basics",
            CourseLevel::Beginner,
            "15 min",
            5,
            "Learn the fundamentals of Decentralized Identity (DID), Verifiable Credentials, and why privacy matters.",
        ),
        course(
            "sec-201",
            "Wallet Security Pro",
            CourseLevel::Intermediate,
            "30 min",
            10,
            "Master the art of self-custody. Learn about seed phrases, hardware wallets, and avoiding phishing attacks.",
        ),
        course(
            "collab-301",
            "DAO Collaboration",
            CourseLevel::Advanced,
            "45 min",
            15,
            "How to use your Reputation Score to get hired in DAOs and manage cryptographic agreements.",
        ),
    ]
}

/// Look up a course by id.
pub fn find_course(id: &str) -> Option<Course> {
    course_catalog().into_iter().find(|c| c.id == id)
}

/// Whether `credentials` include an education credential for `course_title`.
pub fn has_badge(credentials: &[VerifiableCredential], course_title: &str) -> bool {
    credentials.iter().any(|vc| {
        vc.has_kind(CredentialKind::EducationCredential)
            && vc.subject_str("courseName") == Some(course_title)
    })
}

/// Issue the `EducationCredential` for completing `course`.
pub fn education_credential(
    holder: &Did,
    course: &Course,
    issued: Timestamp,
) -> Result<VerifiableCredential, IssuerError> {
    let mut fields = Map::new();
    fields.insert("courseName".into(), course.title.as_str().into());
    fields.insert("level".into(), course.level.as_str().into());
    fields.insert("badge".into(), course.level.badge().into());
    fields.insert("points".into(), course.points.into());
    build(
        CredentialKind::EducationCredential,
        holder,
        EDUCATION_ISSUER_DID,
        &fields,
        issued,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use choice_core::{generate_did, Address};

    fn now() -> Timestamp {
        Timestamp::parse("2026-10-19T12:00:00Z").unwrap()
    }

    fn holder() -> Did {
        generate_did(&Address::new("0xabc").unwrap())
    }

    #[test]
    fn catalog_contents() {
        let catalog = course_catalog();
        let ids: Vec<&str> = catalog.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["web3-101", "sec-201", "collab-301"]);
        let points: Vec<u32> = catalog.iter().map(|c| c.points).collect();
        assert_eq!(points, vec![5, 10, 15]);
        assert_eq!(find_course("sec-201").unwrap().level, CourseLevel::Intermediate);
        assert!(find_course("nope").is_none());
    }

    #[test]
    fn credential_carries_badge() {
        let course = find_course("collab-301").unwrap();
        let vc = education_credential(&holder(), &course, now()).unwrap();
        assert!(vc.has_kind(CredentialKind::EducationCredential));
        assert_eq!(vc.issuer, EDUCATION_ISSUER_DID);
        assert_eq!(vc.subject_str("courseName"), Some("DAO Collaboration"));
        assert_eq!(vc.subject_str("level"), Some("Advanced"));
        assert_eq!(vc.subject_str("badge"), Some("Advanced Badge"));
        assert_eq!(vc.credential_subject["points"], 15);
    }

    #[test]
    fn has_badge_matches_course_title_on_education_credentials() {
        let course = find_course("web3-101").unwrap();
        let vc = education_credential(&holder(), &course, now()).unwrap();
        assert!(has_badge(&[vc.clone()], "Web3 & Identity Basics"));
        assert!(!has_badge(&[vc], "Wallet Security Pro"));
        assert!(!has_badge(&[], "Web3 & Identity Basics"));
    }

    #[test]
    fn has_badge_ignores_other_kinds() {
        let mut subject = Map::new();
        subject.insert("id".into(), "did:ethr:0xabc".into());
        subject.insert("courseName".into(), "DAO Collaboration".into());
        let vc = VerifiableCredential::new(
            "x",
            vec!["VerifiableCredential".into(), "SocialCredential".into()],
            "i",
            now(),
            subject,
        );
        assert!(!has_badge(&[vc], "DAO Collaboration"));
    }

    #[test]
    fn level_serde_names() {
        assert_eq!(serde_json::to_value(CourseLevel::Advanced).unwrap(), "Advanced");
        assert_eq!(CourseLevel::Beginner.badge(), "Beginner Badge");
    }
}
