//! Candidate store — CRUD over candidate records behind a trait seam.
//!
//! The canonical candidate id is an opaque string at every boundary above
//! this module; the PostgreSQL adapter maps it to/from the table's BIGSERIAL
//! key. An id that does not parse as a store key denotes no record at all,
//! so it reports `NotFound` rather than a validation error.

pub mod handlers;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::candidate::{
    Candidate, CandidateInput, CandidateRow, CandidateStatus, CandidateUpdate,
};

/// Page size used when materializing a full snapshot for the filter engine.
const SNAPSHOT_PAGE: u32 = 500;

#[async_trait]
pub trait CandidateStore: Send + Sync {
    /// One page of candidates, ordered by creation time descending.
    async fn list(&self, offset: u32, limit: u32) -> Result<Vec<Candidate>, AppError>;

    async fn get(&self, id: &str) -> Result<Candidate, AppError>;

    async fn create(&self, input: CandidateInput) -> Result<Candidate, AppError>;

    /// Applies the non-absent fields of `patch`.
    async fn update(&self, id: &str, patch: CandidateUpdate) -> Result<Candidate, AppError>;

    async fn delete(&self, id: &str) -> Result<(), AppError>;

    /// Distinct skill tokens across all candidates, sorted.
    async fn distinct_skills(&self, limit: u32) -> Result<Vec<String>, AppError>;

    /// Distinct non-empty locations across all candidates, sorted.
    async fn distinct_locations(&self, limit: u32) -> Result<Vec<String>, AppError>;
}

/// Materializes the full candidate set, newest first. The filter engine
/// operates on an immutable snapshot; every search invocation gets its own.
pub async fn fetch_snapshot(store: &dyn CandidateStore) -> Result<Vec<Candidate>, AppError> {
    let mut all = Vec::new();
    let mut offset = 0u32;
    loop {
        let page = store.list(offset, SNAPSHOT_PAGE).await?;
        let fetched = page.len() as u32;
        all.extend(page);
        if fetched < SNAPSHOT_PAGE {
            break;
        }
        offset += fetched;
    }
    Ok(all)
}

fn parse_id(id: &str) -> Result<i64, AppError> {
    id.parse::<i64>()
        .map_err(|_| AppError::NotFound(format!("Candidate {id} not found")))
}

fn row_to_candidate(row: CandidateRow) -> Result<Candidate, AppError> {
    let status = CandidateStatus::parse(&row.status).ok_or_else(|| {
        AppError::Internal(anyhow::anyhow!(
            "candidate {} carries unrecognized status '{}'",
            row.id,
            row.status
        ))
    })?;
    Ok(Candidate {
        id: row.id.to_string(),
        name: row.name,
        email: row.email,
        location: row.location,
        current_role: row.current_role,
        experience: row.experience_years.max(0) as u32,
        skills: row.skills,
        status: Some(status),
        education: row.education,
        match_score: None,
        added_date: Some(row.created_at.date_naive()),
    })
}

pub struct PgCandidateStore {
    pool: PgPool,
}

impl PgCandidateStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CandidateStore for PgCandidateStore {
    async fn list(&self, offset: u32, limit: u32) -> Result<Vec<Candidate>, AppError> {
        let rows: Vec<CandidateRow> = sqlx::query_as(
            "SELECT * FROM candidates ORDER BY created_at DESC, id DESC OFFSET $1 LIMIT $2",
        )
        .bind(offset as i64)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(row_to_candidate).collect()
    }

    async fn get(&self, id: &str) -> Result<Candidate, AppError> {
        let key = parse_id(id)?;
        let row: Option<CandidateRow> = sqlx::query_as("SELECT * FROM candidates WHERE id = $1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        let row = row.ok_or_else(|| AppError::NotFound(format!("Candidate {id} not found")))?;
        row_to_candidate(row)
    }

    async fn create(&self, input: CandidateInput) -> Result<Candidate, AppError> {
        let row: CandidateRow = sqlx::query_as(
            r#"
            INSERT INTO candidates
                (name, email, location, current_role, experience_years,
                 skills, status, education, cv_filename)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.location)
        .bind(&input.current_role)
        .bind(input.experience as i32)
        .bind(&input.skills)
        .bind(input.status.as_str())
        .bind(&input.education)
        .bind(&input.cv_filename)
        .fetch_one(&self.pool)
        .await?;

        row_to_candidate(row)
    }

    async fn update(&self, id: &str, patch: CandidateUpdate) -> Result<Candidate, AppError> {
        let key = parse_id(id)?;
        let row: Option<CandidateRow> = sqlx::query_as(
            r#"
            UPDATE candidates SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                location = COALESCE($4, location),
                current_role = COALESCE($5, current_role),
                experience_years = COALESCE($6, experience_years),
                skills = COALESCE($7, skills),
                status = COALESCE($8, status),
                education = COALESCE($9, education),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(key)
        .bind(&patch.name)
        .bind(&patch.email)
        .bind(&patch.location)
        .bind(&patch.current_role)
        .bind(patch.experience.map(|e| e as i32))
        .bind(&patch.skills)
        .bind(patch.status.map(|s| s.as_str()))
        .bind(&patch.education)
        .fetch_optional(&self.pool)
        .await?;

        let row = row.ok_or_else(|| AppError::NotFound(format!("Candidate {id} not found")))?;
        row_to_candidate(row)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let key = parse_id(id)?;
        let result = sqlx::query("DELETE FROM candidates WHERE id = $1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Candidate {id} not found")));
        }
        Ok(())
    }

    async fn distinct_skills(&self, limit: u32) -> Result<Vec<String>, AppError> {
        let skills: Vec<String> = sqlx::query_scalar(
            "SELECT DISTINCT unnest(skills) AS skill FROM candidates ORDER BY skill LIMIT $1",
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;
        Ok(skills)
    }

    async fn distinct_locations(&self, limit: u32) -> Result<Vec<String>, AppError> {
        let locations: Vec<String> = sqlx::query_scalar(
            "SELECT DISTINCT location FROM candidates WHERE location <> '' ORDER BY location LIMIT $1",
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;
        Ok(locations)
    }
}


#[cfg(test)]
mod tests {
    use super::memory::MemoryStore;
    use super::*;
    use crate::models::candidate::CandidateStatus;

    fn make_input(name: &str, skills: &[&str]) -> CandidateInput {
        CandidateInput {
            name: name.to_string(),
            email: format!("{}@email.com", name.to_lowercase()),
            location: "Austin, TX".to_string(),
            current_role: "Developer".to_string(),
            experience: 2,
            skills: skills.iter().map(|s| s.to_string()).collect(),
            status: CandidateStatus::Active,
            education: None,
            cv_filename: None,
        }
    }

    #[test]
    fn test_unparseable_id_is_not_found() {
        assert!(matches!(parse_id("not-a-key"), Err(AppError::NotFound(_))));
        assert_eq!(parse_id("42").unwrap(), 42);
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let store = MemoryStore::new();
        store.create(make_input("first", &[])).await.unwrap();
        store.create(make_input("second", &[])).await.unwrap();

        let page = store.list(0, 10).await.unwrap();
        assert_eq!(page[0].name, "second");
        assert_eq!(page[1].name, "first");
    }

    #[tokio::test]
    async fn test_get_update_delete_not_found() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.get("99").await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            store.update("99", CandidateUpdate::default()).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            store.delete("99").await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_update_applies_only_present_fields() {
        let store = MemoryStore::new();
        let created = store.create(make_input("carla", &["React"])).await.unwrap();

        let patch = CandidateUpdate {
            status: Some(CandidateStatus::Contacted),
            experience: Some(6),
            ..Default::default()
        };
        let updated = store.update(&created.id, patch).await.unwrap();
        assert_eq!(updated.status, Some(CandidateStatus::Contacted));
        assert_eq!(updated.experience, 6);
        assert_eq!(updated.name, "carla");
        assert_eq!(updated.skills, vec!["React".to_string()]);
    }

    #[tokio::test]
    async fn test_snapshot_pages_through_everything() {
        let store = MemoryStore::new();
        for i in 0..7 {
            store.create(make_input(&format!("c{i}"), &[])).await.unwrap();
        }
        let snapshot = fetch_snapshot(&store).await.unwrap();
        assert_eq!(snapshot.len(), 7);
    }

    #[tokio::test]
    async fn test_distinct_facets() {
        let store = MemoryStore::new();
        store
            .create(make_input("a", &["React", "Python"]))
            .await
            .unwrap();
        store.create(make_input("b", &["React"])).await.unwrap();

        let skills = store.distinct_skills(100).await.unwrap();
        assert_eq!(skills, vec!["Python".to_string(), "React".to_string()]);

        let locations = store.distinct_locations(100).await.unwrap();
        assert_eq!(locations, vec!["Austin, TX".to_string()]);
    }
}
