//! Match scoring — pluggable, trait-based ranking of search results.
//!
//! Default: `KeywordMatchScorer` (pure-Rust, fast, deterministic, fully
//! testable). A semantic backend can be swapped in behind the same trait.
//!
//! Scores are display data. They are attached to results AFTER the filter
//! engine has run and are never used to filter or reorder them.

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::candidate::Candidate;
use crate::search::criteria::SearchCriteria;

/// The ranking seam. `AppState` carries an `Arc<dyn MatchScorer>`, swapped
/// at startup without touching handler or engine code.
#[async_trait]
pub trait MatchScorer: Send + Sync {
    /// Returns one 0–100 score per candidate, in input order.
    async fn score(
        &self,
        candidates: &[Candidate],
        criteria: &SearchCriteria,
    ) -> Result<Vec<u32>, AppError>;
}

/// Keyword-overlap scorer.
///
/// Terms are the requested skills plus the free-text query tokens. Per term:
/// exact skill-token hit → strength 1.0; substring hit anywhere in the
/// candidate's text fields → 0.6; otherwise 0.0. The score is the mean
/// strength scaled to 0–100. No terms at all is a vacuous full match.
pub struct KeywordMatchScorer;

#[async_trait]
impl MatchScorer for KeywordMatchScorer {
    async fn score(
        &self,
        candidates: &[Candidate],
        criteria: &SearchCriteria,
    ) -> Result<Vec<u32>, AppError> {
        let terms = score_terms(criteria);
        Ok(candidates
            .iter()
            .map(|c| compute_keyword_score(c, &terms))
            .collect())
    }
}

fn score_terms(criteria: &SearchCriteria) -> Vec<String> {
    let mut terms: Vec<String> = criteria.skills.iter().map(|s| s.to_lowercase()).collect();
    if let Some(query) = &criteria.query {
        terms.extend(
            query
                .split_whitespace()
                .filter(|t| t.len() >= 2)
                .map(str::to_lowercase),
        );
    }
    terms.sort();
    terms.dedup();
    terms
}

fn compute_keyword_score(candidate: &Candidate, terms: &[String]) -> u32 {
    if terms.is_empty() {
        return 100;
    }

    let haystack = format!(
        "{} {} {} {}",
        candidate.name,
        candidate.current_role,
        candidate.location,
        candidate.education.as_deref().unwrap_or_default()
    )
    .to_lowercase();

    let mut total = 0.0_f32;
    for term in terms {
        let skill_hit = candidate
            .skills
            .iter()
            .any(|skill| skill.to_lowercase() == *term);
        let text_hit = haystack.contains(term.as_str())
            || candidate
                .skills
                .iter()
                .any(|skill| skill.to_lowercase().contains(term.as_str()));

        total += if skill_hit {
            1.0
        } else if text_hit {
            0.6
        } else {
            0.0
        };
    }

    ((total / terms.len() as f32) * 100.0).round() as u32
}
