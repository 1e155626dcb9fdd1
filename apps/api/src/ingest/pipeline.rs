//! Batch ingestion pipeline: extract fields from each document, create a
//! candidate from what came out, report one outcome per item.

use bytes::Bytes;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::ingest::extractor::FieldExtractor;
use crate::ingest::{ExtractedFields, IngestItemStatus, IngestOutcome, IngestResponse};
use crate::models::candidate::{CandidateInput, CandidateStatus};
use crate::store::CandidateStore;

pub struct IngestItem {
    pub filename: String,
    pub bytes: Bytes,
}

/// Runs every item through extract → create. Item failures are recorded in
/// the corresponding outcome and never abort the remaining items.
pub async fn process_batch(
    store: &dyn CandidateStore,
    extractor: &dyn FieldExtractor,
    max_upload_bytes: usize,
    items: Vec<IngestItem>,
) -> IngestResponse {
    let batch_id = Uuid::new_v4();
    let submitted = items.len();
    let mut results = Vec::with_capacity(submitted);

    for item in items {
        let outcome = match process_item(store, extractor, max_upload_bytes, &item).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Ingest of '{}' failed: {e}", item.filename);
                IngestOutcome::failure(item.filename, e.to_string())
            }
        };
        results.push(outcome);
    }

    let succeeded = results
        .iter()
        .filter(|o| o.status == IngestItemStatus::Success)
        .count();
    info!("Ingest batch {batch_id}: {succeeded}/{submitted} documents processed");

    IngestResponse {
        batch_id,
        submitted,
        succeeded,
        failed: submitted - succeeded,
        results,
    }
}

async fn process_item(
    store: &dyn CandidateStore,
    extractor: &dyn FieldExtractor,
    max_upload_bytes: usize,
    item: &IngestItem,
) -> Result<IngestOutcome, AppError> {
    if item.bytes.len() > max_upload_bytes {
        return Err(AppError::Extraction(format!(
            "'{}' exceeds the {max_upload_bytes}-byte upload limit",
            item.filename
        )));
    }

    let fields = extractor.extract(&item.filename, &item.bytes).await?;
    let input = candidate_input_from_fields(&item.filename, &fields)?;
    let candidate = store.create(input).await?;

    Ok(IngestOutcome {
        filename: item.filename.clone(),
        status: IngestItemStatus::Success,
        fields: Some(fields),
        candidate_id: Some(candidate.id),
        error: None,
    })
}

/// Turns extracted fields into a create payload. An email is the one hard
/// requirement; a missing name falls back to the filename stem.
fn candidate_input_from_fields(
    filename: &str,
    fields: &ExtractedFields,
) -> Result<CandidateInput, AppError> {
    let email = fields
        .email
        .clone()
        .ok_or_else(|| AppError::Extraction(format!("no email address found in '{filename}'")))?;

    let name = fields
        .name
        .clone()
        .unwrap_or_else(|| filename_stem(filename).to_string());

    Ok(CandidateInput {
        name,
        email,
        location: fields.location.clone().unwrap_or_default(),
        current_role: fields.current_role.clone().unwrap_or_default(),
        experience: fields.experience.unwrap_or(0),
        skills: fields.skills.clone(),
        status: CandidateStatus::Active,
        education: fields.education.clone(),
        cv_filename: Some(filename.to_string()),
    })
}

fn filename_stem(filename: &str) -> &str {
    filename.rsplit_once('.').map_or(filename, |(stem, _)| stem)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::extractor::HeuristicExtractor;
    use crate::store::memory::MemoryStore;

    const GOOD_CV: &str = "\
Sarah Johnson
Full Stack Developer
sarah.j@email.com

6 years with React, Python and Django.
";

    fn item(filename: &str, body: &str) -> IngestItem {
        IngestItem {
            filename: filename.to_string(),
            bytes: Bytes::from(body.to_string()),
        }
    }

    #[tokio::test]
    async fn test_successful_item_creates_candidate() {
        let store = MemoryStore::new();
        let response =
            process_batch(&store, &HeuristicExtractor, 1024, vec![item("sarah.txt", GOOD_CV)])
                .await;

        assert_eq!(response.submitted, 1);
        assert_eq!(response.succeeded, 1);
        assert_eq!(response.failed, 0);

        let outcome = &response.results[0];
        assert_eq!(outcome.status, IngestItemStatus::Success);
        let id = outcome.candidate_id.as_deref().unwrap();
        let candidate = store.get(id).await.unwrap();
        assert_eq!(candidate.name, "Sarah Johnson");
        assert_eq!(candidate.experience, 6);
        assert_eq!(candidate.skills, vec!["React", "Python", "Django"]);
    }

    #[tokio::test]
    async fn test_bad_item_never_blocks_the_batch() {
        let store = MemoryStore::new();
        let response = process_batch(
            &store,
            &HeuristicExtractor,
            1024,
            vec![
                item("no-email.txt", "Just Some Notes\nnothing useful here"),
                item("sarah.txt", GOOD_CV),
                item("photo.png", "not a document"),
            ],
        )
        .await;

        assert_eq!(response.submitted, 3);
        assert_eq!(response.succeeded, 1);
        assert_eq!(response.failed, 2);
        assert_eq!(response.results[0].status, IngestItemStatus::Error);
        assert!(response.results[0].error.as_deref().unwrap().contains("email"));
        assert_eq!(response.results[1].status, IngestItemStatus::Success);
        assert_eq!(response.results[2].status, IngestItemStatus::Error);

        // Only the good document produced a candidate.
        assert_eq!(store.list(0, 10).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_oversized_item_fails_per_item() {
        let store = MemoryStore::new();
        let response =
            process_batch(&store, &HeuristicExtractor, 8, vec![item("big.txt", GOOD_CV)]).await;
        assert_eq!(response.failed, 1);
        assert!(response.results[0]
            .error
            .as_deref()
            .unwrap()
            .contains("upload limit"));
    }

    #[tokio::test]
    async fn test_missing_name_falls_back_to_filename_stem() {
        let store = MemoryStore::new();
        let cv = "contact@email.com\nreachable by mail only";
        let response =
            process_batch(&store, &HeuristicExtractor, 1024, vec![item("resume.txt", cv)]).await;

        assert_eq!(response.succeeded, 1);
        let id = response.results[0].candidate_id.as_deref().unwrap();
        assert_eq!(store.get(id).await.unwrap().name, "resume");
    }
}
