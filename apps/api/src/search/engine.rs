//! The candidate filter core.
//!
//! A pure, synchronous transformation: one immutable snapshot of candidates
//! in, the matching subset out. Each candidate is judged independently by a
//! conjunction of facet predicates, every one of which is vacuously true
//! when its criterion is absent. No side effects, no suspension points —
//! concurrent invocations over the same snapshot are trivially safe, and
//! snapshot staleness is the caller's problem, not the engine's.

use crate::errors::AppError;
use crate::models::candidate::Candidate;
use crate::search::criteria::{SearchCriteria, SortKey};

/// Filters `candidates` down to those matching `criteria`.
///
/// Input order is preserved unless a sort key is given; sorting is ascending
/// and stable, so ties keep their input order. Fails with `InvalidCriteria`
/// on malformed criteria before looking at a single candidate. An empty
/// input or criteria matching nothing are valid results, not errors.
pub fn filter_candidates(
    candidates: Vec<Candidate>,
    criteria: &SearchCriteria,
) -> Result<Vec<Candidate>, AppError> {
    criteria.validate()?;

    let mut kept: Vec<Candidate> = candidates
        .into_iter()
        .filter(|c| keep(c, criteria))
        .collect();

    if let Some(key) = criteria.sort {
        sort_candidates(&mut kept, key);
    }

    Ok(kept)
}

/// The per-candidate predicate. Evaluated independently for every candidate;
/// never short-circuited across candidates.
fn keep(candidate: &Candidate, criteria: &SearchCriteria) -> bool {
    text_match(candidate, criteria.query.as_deref())
        && candidate.experience >= criteria.min_experience as u32
        && skill_match(&candidate.skills, &criteria.skills)
        && location_match(&candidate.location, criteria.location.as_deref())
        && criteria.status.matches(candidate.status)
}

/// Case-insensitive substring over name, current role, any skill, or email.
/// An empty or absent query matches everything.
fn text_match(candidate: &Candidate, query: Option<&str>) -> bool {
    let query = match query {
        Some(q) if !q.is_empty() => q.to_lowercase(),
        _ => return true,
    };
    candidate.name.to_lowercase().contains(&query)
        || candidate.current_role.to_lowercase().contains(&query)
        || candidate.email.to_lowercase().contains(&query)
        || candidate
            .skills
            .iter()
            .any(|skill| skill.to_lowercase().contains(&query))
}

/// OR semantics: keep the candidate if any requested skill is among theirs.
/// Skills are canonical tokens, so membership is exact and case-sensitive.
fn skill_match(have: &[String], wanted: &[String]) -> bool {
    wanted.is_empty() || wanted.iter().any(|w| have.iter().any(|h| h == w))
}

/// Case-insensitive substring over location; empty or absent matches all.
fn location_match(location: &str, wanted: Option<&str>) -> bool {
    match wanted {
        Some(w) if !w.is_empty() => location.to_lowercase().contains(&w.to_lowercase()),
        _ => true,
    }
}

fn sort_candidates(candidates: &mut [Candidate], key: SortKey) {
    // Vec::sort_by is stable: ties preserve input order.
    match key {
        SortKey::Name => candidates.sort_by(|a, b| a.name.cmp(&b.name)),
        SortKey::Experience => candidates.sort_by(|a, b| a.experience.cmp(&b.experience)),
        // Undated records sort before dated ones (None < Some).
        SortKey::AddedDate => candidates.sort_by(|a, b| a.added_date.cmp(&b.added_date)),
    }
}
