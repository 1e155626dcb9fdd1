//! Field extraction — the call contract of the extraction backend, plus the
//! default heuristic implementation.
//!
//! `HeuristicExtractor` is pure-Rust and deterministic: text comes out of
//! the document (PDF or plain text), then line and token scanning derives
//! the fields. A semantic backend plugs in behind the same trait.

use async_trait::async_trait;

use crate::errors::AppError;
use crate::ingest::ExtractedFields;

/// Canonical skill tokens recognized by the heuristic backend. Matches are
/// case-insensitive in the document but always reported in this casing.
const SKILL_CATALOG: &[&str] = &[
    "React",
    "TypeScript",
    "JavaScript",
    "Python",
    "Node.js",
    "GraphQL",
    "AWS",
    "Docker",
    "PostgreSQL",
    "MongoDB",
    "Vue.js",
    "Angular",
    "Django",
    "FastAPI",
    "Kubernetes",
    "Rust",
    "Go",
    "Java",
];

const ROLE_WORDS: &[&str] = &[
    "engineer",
    "developer",
    "architect",
    "designer",
    "scientist",
    "analyst",
    "consultant",
    "manager",
    "lead",
];

const EDUCATION_MARKERS: &[&str] = &[
    "university",
    "college",
    "institute",
    "bachelor",
    "master",
    "phd",
    "b.s.",
    "m.s.",
];

/// Degree abbreviations only count at the start of a line ("BS Computer
/// Science"); a bare contains check would hit "systems ".
const DEGREE_PREFIXES: &[&str] = &["bs ", "ms ", "ba ", "ma "];

/// The extraction seam. Implementations take one document and return the
/// structured fields they could derive from it.
#[async_trait]
pub trait FieldExtractor: Send + Sync {
    async fn extract(&self, filename: &str, bytes: &[u8]) -> Result<ExtractedFields, AppError>;
}

pub struct HeuristicExtractor;

#[async_trait]
impl FieldExtractor for HeuristicExtractor {
    async fn extract(&self, filename: &str, bytes: &[u8]) -> Result<ExtractedFields, AppError> {
        let text = document_text(filename, bytes)?;
        Ok(extract_fields_from_text(&text))
    }
}

/// Pulls plain text out of the document by file type.
fn document_text(filename: &str, bytes: &[u8]) -> Result<String, AppError> {
    let lower = filename.to_lowercase();
    if lower.ends_with(".pdf") {
        pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| AppError::Extraction(format!("could not read PDF '{filename}': {e}")))
    } else if lower.ends_with(".txt") || lower.ends_with(".md") {
        String::from_utf8(bytes.to_vec())
            .map_err(|_| AppError::Extraction(format!("'{filename}' is not valid UTF-8 text")))
    } else {
        Err(AppError::Extraction(format!(
            "unsupported file type for '{filename}' (expected .pdf, .txt or .md)"
        )))
    }
}

fn extract_fields_from_text(text: &str) -> ExtractedFields {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    ExtractedFields {
        name: guess_name(&lines),
        email: find_email(text),
        location: find_location(&lines),
        current_role: detect_role(&lines),
        experience: find_experience_years(text),
        skills: match_skills(text),
        education: detect_education(&lines),
    }
}

/// The top line of a CV is almost always the name.
fn guess_name(lines: &[&str]) -> Option<String> {
    let first = lines.first()?;
    let word_count = first.split_whitespace().count();
    if first.len() <= 80 && word_count <= 5 && !first.contains('@') {
        Some((*first).to_string())
    } else {
        None
    }
}

fn find_email(text: &str) -> Option<String> {
    for token in text.split_whitespace() {
        let trimmed = token.trim_matches(|c: char| !c.is_ascii_alphanumeric() && c != '@');
        if let Some(at) = trimmed.find('@') {
            let (local, domain) = trimmed.split_at(at);
            let domain = &domain[1..];
            if !local.is_empty() && domain.contains('.') && !domain.contains('@') {
                return Some(trimmed.to_string());
            }
        }
    }
    None
}

fn find_location(lines: &[&str]) -> Option<String> {
    for line in lines {
        if line.to_lowercase().starts_with("location:") {
            let rest = line.get("location:".len()..).map(str::trim).unwrap_or("");
            if !rest.is_empty() {
                return Some(rest.to_string());
            }
        }
    }
    None
}

/// First short line near the top that names a role.
fn detect_role(lines: &[&str]) -> Option<String> {
    for line in lines.iter().skip(1).take(14) {
        let lower = line.to_lowercase();
        if line.len() <= 80 && ROLE_WORDS.iter().any(|w| lower.contains(w)) {
            return Some((*line).to_string());
        }
    }
    None
}

/// Scans for the first "N years" / "N+ years" mention.
fn find_experience_years(text: &str) -> Option<u32> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    for window in tokens.windows(2) {
        let number = window[0].trim_end_matches('+');
        let unit = window[1].to_lowercase();
        if unit.starts_with("year") {
            if let Ok(years) = number.parse::<u32>() {
                return Some(years);
            }
        }
    }
    None
}

fn match_skills(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    SKILL_CATALOG
        .iter()
        .filter(|skill| contains_token(&lower, &skill.to_lowercase()))
        .map(|skill| (*skill).to_string())
        .collect()
}

fn detect_education(lines: &[&str]) -> Option<String> {
    for line in lines {
        let lower = line.to_lowercase();
        let marked = EDUCATION_MARKERS.iter().any(|m| lower.contains(m))
            || DEGREE_PREFIXES.iter().any(|p| lower.starts_with(p));
        if line.len() <= 120 && marked {
            return Some((*line).to_string());
        }
    }
    None
}

/// Substring match bounded by non-alphanumeric characters, so "java" does
/// not hit inside "javascript".
fn contains_token(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    let bytes = haystack.as_bytes();
    let mut start = 0;
    while let Some(pos) = haystack[start..].find(needle) {
        let begin = start + pos;
        let end = begin + needle.len();
        let before_ok = begin == 0 || !bytes[begin - 1].is_ascii_alphanumeric();
        let after_ok = end >= haystack.len() || !bytes[end].is_ascii_alphanumeric();
        if before_ok && after_ok {
            return true;
        }
        start = begin + 1;
    }
    false
}
