mod auth;
mod config;
mod db;
mod errors;
mod extraction;
mod interview;
mod llm_client;
mod models;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::JwtVerifier;
use crate::config::Config;
use crate::db::create_pool;
use crate::interview::convention::OutputConvention;
use crate::interview::pipeline::InterviewPipeline;
use crate::interview::store::PgArtifactStore;
use crate::llm_client::InferenceClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Interview API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL (artifact store)
    let db = create_pool(&config.database_url).await?;
    let store = Arc::new(PgArtifactStore::new(db));

    // Initialize inference client
    let inference = InferenceClient::new(config.inference_api_url.clone(), config.hf_token.clone());
    info!(
        "Inference client initialized (endpoint: {}, output convention v{})",
        inference.endpoint(),
        OutputConvention::current().version
    );

    // Build app state
    let state = AppState {
        pipeline: InterviewPipeline::new(Arc::new(inference), store.clone()),
        store,
        verifier: Arc::new(JwtVerifier::new(
            &config.jwt_secret_key,
            config.jwt_algorithm,
        )),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins to the web client's host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
