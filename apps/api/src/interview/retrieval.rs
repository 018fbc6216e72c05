//! Access-Gated Retrieval: single-record fetch authorized against the stored owner.

use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

use crate::interview::store::{ArtifactStore, StoreError};
use crate::models::artifact::InterviewArtifact;

#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("interview artifact not found")]
    NotFound,

    #[error("not authorized to view this interview artifact")]
    Forbidden,

    #[error("failed to load interview artifact: {0}")]
    StorageFailure(#[from] StoreError),
}

/// Loads an artifact and hands it back only to its owner.
///
/// The comparison is on the stable principal identifier. On mismatch nothing about the
/// artifact leaves this function.
pub async fn fetch(
    store: &dyn ArtifactStore,
    artifact_id: Uuid,
    requester_id: &str,
) -> Result<InterviewArtifact, RetrievalError> {
    let artifact = store
        .get(artifact_id)
        .await?
        .ok_or(RetrievalError::NotFound)?;

    if artifact.owner_id != requester_id {
        warn!(%artifact_id, requester_id, "Denied access to interview artifact");
        return Err(RetrievalError::Forbidden);
    }

    Ok(artifact)
}
