//! Pipeline Orchestrator: upload → extract → infer → parse → persist.
//!
//! Every stage is a hard sequence point. Nothing is written unless parsing produced
//! at least one entry, and exactly one artifact is written on success.

use std::sync::Arc;

use bytes::Bytes;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::extraction::{self, ExtractionError};
use crate::interview::parser::ResponseParser;
use crate::interview::store::{ArtifactStore, StoreError};
use crate::llm_client::{InferenceError, TextGenerator};
use crate::models::artifact::NewInterviewArtifact;

const PDF_MEDIA_TYPE: &str = "application/pdf";
const FALLBACK_FILENAME: &str = "resume.pdf";

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("unsupported media type: {0}")]
    UnsupportedMedia(String),

    #[error("unreadable document: {0}")]
    BadDocument(#[from] ExtractionError),

    #[error("{0}")]
    UpstreamFailure(#[from] InferenceError),

    #[error("model output contained no parseable questions")]
    NoQuestionsProduced,

    #[error("failed to store interview artifact: {0}")]
    StorageFailure(#[from] StoreError),
}

/// A fully buffered upload as declared by the client.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactSummary {
    pub artifact_id: Uuid,
    pub question_count: usize,
}

/// Rejects anything not declared as a PDF.
///
/// The declared content type decides (parameters ignored). Only when no content type
/// was declared does the filename extension count.
pub fn admit(filename: Option<&str>, content_type: Option<&str>) -> Result<(), PipelineError> {
    match content_type {
        Some(declared) => {
            let essence = declared.split(';').next().unwrap_or_default().trim();
            if essence.eq_ignore_ascii_case(PDF_MEDIA_TYPE) {
                Ok(())
            } else {
                Err(PipelineError::UnsupportedMedia(declared.to_string()))
            }
        }
        None => match filename {
            Some(name) if name.to_ascii_lowercase().ends_with(".pdf") => Ok(()),
            _ => Err(PipelineError::UnsupportedMedia(
                "no content type declared and filename is not .pdf".to_string(),
            )),
        },
    }
}

#[derive(Clone)]
pub struct InterviewPipeline {
    generator: Arc<dyn TextGenerator>,
    store: Arc<dyn ArtifactStore>,
    parser: Arc<ResponseParser>,
}

impl InterviewPipeline {
    pub fn new(generator: Arc<dyn TextGenerator>, store: Arc<dyn ArtifactStore>) -> Self {
        Self {
            generator,
            store,
            parser: Arc::new(ResponseParser::default()),
        }
    }

    /// Runs the whole pipeline for one upload on behalf of `owner_id`.
    pub async fn process(
        &self,
        upload: UploadedFile,
        owner_id: &str,
    ) -> Result<ArtifactSummary, PipelineError> {
        // Step 1: Admission
        admit(upload.filename.as_deref(), upload.content_type.as_deref())?;
        let source_filename = upload
            .filename
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| FALLBACK_FILENAME.to_string());
        info!(
            owner_id,
            filename = %source_filename,
            bytes = upload.bytes.len(),
            "Processing resume upload"
        );

        // Step 2-3: Extract page text off the async runtime
        let bytes = upload.bytes;
        let pages = tokio::task::spawn_blocking(move || extraction::extract(&bytes))
            .await
            .map_err(|e| ExtractionError::Corrupt(format!("extraction task failed: {e}")))??;
        info!("Extracted text from {} page(s)", pages.len());

        // Step 4: Inference
        let resume_text = extraction::join_pages(&pages);
        let raw_output = self.generator.generate(&resume_text).await.map_err(|e| {
            warn!("Inference failed for {owner_id}: {e}");
            e
        })?;
        debug!("Raw model output:\n{raw_output}");

        // Step 5: Parse
        let entries = self.parser.parse(&raw_output);
        if entries.is_empty() {
            warn!("No questions parsed from model output for {owner_id}");
            return Err(PipelineError::NoQuestionsProduced);
        }
        let question_count = entries.len();
        info!("Parsed {question_count} question(s)");

        // Step 6: Persist
        let artifact_id = self
            .store
            .insert(NewInterviewArtifact {
                owner_id: owner_id.to_string(),
                source_filename,
                entries,
            })
            .await?;

        // Step 7: Summary
        info!(%artifact_id, question_count, "Interview artifact created");
        Ok(ArtifactSummary {
            artifact_id,
            question_count,
        })
    }
}
