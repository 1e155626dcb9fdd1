use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::candidate::CandidateStatus;

/// Sort order for filtered results. Always ascending, always stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Name,
    Experience,
    AddedDate,
}

impl SortKey {
    /// Parses the string-typed `sort` query parameter. An unknown key is a
    /// criteria error, not a silently ignored option.
    pub fn parse(s: &str) -> Result<SortKey, AppError> {
        match s {
            "name" => Ok(SortKey::Name),
            "experience" => Ok(SortKey::Experience),
            "added_date" => Ok(SortKey::AddedDate),
            other => Err(AppError::InvalidCriteria(format!(
                "unknown sort key '{other}' (expected one of: name, experience, added_date)"
            ))),
        }
    }
}

/// Status facet. `all` (the default) matches every candidate, including
/// records that carry no status at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Contacted,
    Interviewed,
    Hired,
}

impl StatusFilter {
    fn wanted(&self) -> Option<CandidateStatus> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Active => Some(CandidateStatus::Active),
            StatusFilter::Contacted => Some(CandidateStatus::Contacted),
            StatusFilter::Interviewed => Some(CandidateStatus::Interviewed),
            StatusFilter::Hired => Some(CandidateStatus::Hired),
        }
    }

    pub fn matches(&self, status: Option<CandidateStatus>) -> bool {
        match self.wanted() {
            None => true,
            Some(wanted) => status == Some(wanted),
        }
    }
}

/// The named, optional constraints one search invocation may specify.
///
/// Built fresh from user-facing controls on every call; an immutable value,
/// never shared mutable view state. Every field is vacuous when absent or at
/// its default, so `SearchCriteria::default()` matches everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchCriteria {
    /// Case-insensitive substring over name, current role, skills and email.
    pub query: Option<String>,
    /// Keep candidates with at least this many years of experience.
    /// Negative values are rejected, not clamped.
    pub min_experience: i32,
    /// OR semantics: keep candidates whose skills intersect this set.
    /// Exact, case-sensitive token membership.
    pub skills: Vec<String>,
    /// Case-insensitive substring over location.
    pub location: Option<String>,
    pub status: StatusFilter,
    pub sort: Option<SortKey>,
}

impl SearchCriteria {
    /// Rejects malformed criteria up front. A failed validation never
    /// produces a partial result.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.min_experience < 0 {
            return Err(AppError::InvalidCriteria(format!(
                "min_experience must be non-negative, got {}",
                self.min_experience
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_criteria_validate() {
        assert!(SearchCriteria::default().validate().is_ok());
    }

    #[test]
    fn test_negative_min_experience_rejected() {
        let criteria = SearchCriteria {
            min_experience: -1,
            ..Default::default()
        };
        assert!(matches!(
            criteria.validate(),
            Err(AppError::InvalidCriteria(_))
        ));
    }

    #[test]
    fn test_sort_key_parse_known_values() {
        assert_eq!(SortKey::parse("name").unwrap(), SortKey::Name);
        assert_eq!(SortKey::parse("experience").unwrap(), SortKey::Experience);
        assert_eq!(SortKey::parse("added_date").unwrap(), SortKey::AddedDate);
    }

    #[test]
    fn test_sort_key_parse_unknown_value() {
        assert!(matches!(
            SortKey::parse("match_score"),
            Err(AppError::InvalidCriteria(_))
        ));
    }

    #[test]
    fn test_status_filter_all_matches_missing_status() {
        assert!(StatusFilter::All.matches(None));
        assert!(StatusFilter::All.matches(Some(CandidateStatus::Hired)));
    }

    #[test]
    fn test_status_filter_concrete_excludes_missing_status() {
        assert!(!StatusFilter::Active.matches(None));
        assert!(StatusFilter::Active.matches(Some(CandidateStatus::Active)));
        assert!(!StatusFilter::Active.matches(Some(CandidateStatus::Hired)));
    }

    #[test]
    fn test_criteria_wire_form() {
        let criteria: SearchCriteria = serde_json::from_str(
            r#"{"query":"react","min_experience":3,"skills":["React"],"status":"contacted","sort":"added_date"}"#,
        )
        .unwrap();
        assert_eq!(criteria.query.as_deref(), Some("react"));
        assert_eq!(criteria.min_experience, 3);
        assert_eq!(criteria.status, StatusFilter::Contacted);
        assert_eq!(criteria.sort, Some(SortKey::AddedDate));
    }
}
