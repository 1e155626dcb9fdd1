//! CV ingestion — batch document intake with per-item outcomes.
//!
//! One outcome per submitted document: a failing item never aborts the rest
//! of the batch. Extraction itself sits behind the `FieldExtractor` trait;
//! the default backend is deterministic and heuristic.

pub mod extractor;
pub mod handlers;
pub mod pipeline;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fields pulled out of a single CV document. Absent fields mean the
/// document never yielded them, not that they are empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedFields {
    pub name: Option<String>,
    pub email: Option<String>,
    pub location: Option<String>,
    pub current_role: Option<String>,
    pub experience: Option<u32>,
    pub skills: Vec<String>,
    pub education: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngestItemStatus {
    Success,
    Error,
}

/// Result of processing one submitted document.
#[derive(Debug, Clone, Serialize)]
pub struct IngestOutcome {
    pub filename: String,
    pub status: IngestItemStatus,
    pub fields: Option<ExtractedFields>,
    /// Id of the candidate created from this document.
    pub candidate_id: Option<String>,
    pub error: Option<String>,
}

impl IngestOutcome {
    pub fn failure(filename: String, message: String) -> Self {
        Self {
            filename,
            status: IngestItemStatus::Error,
            fields: None,
            candidate_id: None,
            error: Some(message),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub batch_id: Uuid,
    pub submitted: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub results: Vec<IngestOutcome>,
}
