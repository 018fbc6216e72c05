//! Artifact Store: persistence for interview artifacts.
//!
//! Insert-only: an artifact is written once by the pipeline and afterwards only read.
//! Entries are stored as one JSONB array so their order survives the round trip.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::models::artifact::{ArtifactRow, InterviewArtifact, NewInterviewArtifact};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(sqlx::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Persists a new artifact and returns the identifier assigned to it.
    async fn insert(&self, artifact: NewInterviewArtifact) -> Result<Uuid, StoreError>;

    async fn get(&self, id: Uuid) -> Result<Option<InterviewArtifact>, StoreError>;
}

#[derive(Clone)]
pub struct PgArtifactStore {
    pool: PgPool,
}

impl PgArtifactStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Pool exhaustion and shutdown are reported separately from query failures.
fn classify(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
            StoreError::Unavailable(err.to_string())
        }
        other => StoreError::Database(other),
    }
}

#[async_trait]
impl ArtifactStore for PgArtifactStore {
    async fn insert(&self, artifact: NewInterviewArtifact) -> Result<Uuid, StoreError> {
        let id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO interview_artifacts (id, owner_id, source_filename, entries)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(id)
        .bind(&artifact.owner_id)
        .bind(&artifact.source_filename)
        .bind(Json(&artifact.entries))
        .execute(&self.pool)
        .await
        .map_err(classify)?;

        info!(
            artifact_id = %id,
            owner_id = %artifact.owner_id,
            entries = artifact.entries.len(),
            "Inserted interview artifact"
        );
        Ok(id)
    }

    async fn get(&self, id: Uuid) -> Result<Option<InterviewArtifact>, StoreError> {
        let row = sqlx::query_as::<_, ArtifactRow>(
            r#"
            SELECT id, owner_id, source_filename, entries, created_at
            FROM interview_artifacts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(classify)?;

        Ok(row.map(InterviewArtifact::from))
    }
}
