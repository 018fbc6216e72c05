use std::sync::Arc;

use crate::auth::TokenVerifier;
use crate::config::Config;
use crate::interview::pipeline::InterviewPipeline;
use crate::interview::store::ArtifactStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: InterviewPipeline,
    /// Single source of truth for artifacts. No process-local cache sits in front of it.
    pub store: Arc<dyn ArtifactStore>,
    pub verifier: Arc<dyn TokenVerifier>,
    pub config: Config,
}
