use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Pipeline stage of a candidate. Closed set — the core never invents other
/// values; anything else coming back from the store is a data error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateStatus {
    Active,
    Contacted,
    Interviewed,
    Hired,
}

impl CandidateStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CandidateStatus::Active => "active",
            CandidateStatus::Contacted => "contacted",
            CandidateStatus::Interviewed => "interviewed",
            CandidateStatus::Hired => "hired",
        }
    }

    pub fn parse(s: &str) -> Option<CandidateStatus> {
        match s {
            "active" => Some(CandidateStatus::Active),
            "contacted" => Some(CandidateStatus::Contacted),
            "interviewed" => Some(CandidateStatus::Interviewed),
            "hired" => Some(CandidateStatus::Hired),
            _ => None,
        }
    }
}

/// A candidate profile as the search and listing surfaces see it.
///
/// `id` is an opaque string at every API boundary; the store adapter maps it
/// to its own key type. `match_score` is supplied by the ranking subsystem
/// after filtering — the filter engine itself never reads or writes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub name: String,
    pub email: String,
    pub location: String,
    pub current_role: String,
    /// Years of experience. Non-negative, no upper bound enforced.
    pub experience: u32,
    /// Canonical skill tokens, e.g. "React". Case-sensitive.
    pub skills: Vec<String>,
    pub status: Option<CandidateStatus>,
    pub education: Option<String>,
    /// 0–100 relevance percentage, display-only.
    pub match_score: Option<u32>,
    pub added_date: Option<NaiveDate>,
}

/// Payload for creating a candidate (manual entry or ingestion).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateInput {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub current_role: String,
    #[serde(default)]
    pub experience: u32,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default = "default_status")]
    pub status: CandidateStatus,
    #[serde(default)]
    pub education: Option<String>,
    #[serde(default)]
    pub cv_filename: Option<String>,
}

fn default_status() -> CandidateStatus {
    CandidateStatus::Active
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub location: Option<String>,
    pub current_role: Option<String>,
    pub experience: Option<u32>,
    pub skills: Option<Vec<String>>,
    pub status: Option<CandidateStatus>,
    pub education: Option<String>,
}

impl CandidateUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.location.is_none()
            && self.current_role.is_none()
            && self.experience.is_none()
            && self.skills.is_none()
            && self.status.is_none()
            && self.education.is_none()
    }
}

/// Raw candidates table row. The store adapter converts it to `Candidate`.
#[derive(Debug, Clone, FromRow)]
pub struct CandidateRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub location: String,
    pub current_role: String,
    pub experience_years: i32,
    pub skills: Vec<String>,
    pub status: String,
    pub education: Option<String>,
    pub cv_filename: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_through_str() {
        for status in [
            CandidateStatus::Active,
            CandidateStatus::Contacted,
            CandidateStatus::Interviewed,
            CandidateStatus::Hired,
        ] {
            assert_eq!(CandidateStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn test_status_rejects_unknown_value() {
        assert_eq!(CandidateStatus::parse("archived"), None);
        assert_eq!(CandidateStatus::parse("Active"), None);
    }

    #[test]
    fn test_update_is_empty() {
        assert!(CandidateUpdate::default().is_empty());
        let patch = CandidateUpdate {
            experience: Some(4),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}
