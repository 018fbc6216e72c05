//! Inference Client: the single point of entry for calls to the external
//! text-generation endpoint.
//!
//! One synchronous POST per résumé. No retry, no backoff: a failed call is
//! terminal for the request and the caller has to resubmit.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::interview::convention::OutputConvention;

/// Hosted Mistral instruct model used when `INFERENCE_API_URL` is not set.
pub const DEFAULT_INFERENCE_URL: &str =
    "https://api-inference.huggingface.co/models/mistralai/Mistral-7B-Instruct-v0.3";

#[derive(Debug, Error)]
pub enum InferenceError {
    /// The endpoint answered with a non-success status. `body` is the upstream body, verbatim.
    #[error("inference endpoint returned status {status}: {body}")]
    Unavailable { status: u16, body: String },

    #[error("inference endpoint unreachable: {0}")]
    Transport(String),

    #[error("malformed inference response: {0}")]
    MalformedResponse(String),
}

/// Produces raw model text for a résumé. Carried as `Arc<dyn TextGenerator>` so the
/// pipeline can run against a scripted generator in tests.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, resume_text: &str) -> Result<String, InferenceError>;
}

#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    inputs: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerationResult {
    generated_text: String,
}

/// HTTP client for a Hugging Face style text-generation endpoint.
#[derive(Clone)]
pub struct InferenceClient {
    client: Client,
    endpoint: String,
    token: String,
    convention: OutputConvention,
}

impl std::fmt::Debug for InferenceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InferenceClient")
            .field("endpoint", &self.endpoint)
            .field("token", &"<redacted>")
            .field("convention", &self.convention.version)
            .finish()
    }
}

impl InferenceClient {
    pub fn new(endpoint: String, token: String) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            token,
            convention: OutputConvention::current(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends an already-built prompt and returns the first `generated_text`.
    pub async fn call(&self, prompt: &str) -> Result<String, InferenceError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(&GenerationRequest { inputs: prompt })
            .send()
            .await
            // without_url keeps the endpoint out of the error text; the token is a header
            // and never appears in reqwest errors
            .map_err(|e| InferenceError::Transport(e.without_url().to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| InferenceError::Transport(e.without_url().to_string()))?;

        if !status.is_success() {
            warn!("Inference endpoint returned {status}");
            return Err(InferenceError::Unavailable {
                status: status.as_u16(),
                body,
            });
        }

        let text = decode_generation(&body)?;
        debug!("Inference call succeeded: {} chars generated", text.len());
        Ok(text)
    }
}

#[async_trait]
impl TextGenerator for InferenceClient {
    async fn generate(&self, resume_text: &str) -> Result<String, InferenceError> {
        let prompt = self.convention.build_prompt(resume_text);
        let text = self.call(&prompt).await?;
        Ok(strip_prompt_echo(&prompt, text))
    }
}

/// Text-generation endpoints return the prompt followed by the completion unless told
/// otherwise. The echoed prompt contains a format example that would parse as an item.
fn strip_prompt_echo(prompt: &str, text: String) -> String {
    match text.strip_prefix(prompt) {
        Some(completion) => completion.to_string(),
        None => text,
    }
}

/// Decodes a success body: a JSON array whose first element carries `generated_text`.
fn decode_generation(body: &str) -> Result<String, InferenceError> {
    let results: Vec<GenerationResult> = serde_json::from_str(body)
        .map_err(|e| InferenceError::MalformedResponse(e.to_string()))?;

    results
        .into_iter()
        .next()
        .map(|r| r.generated_text)
        .ok_or_else(|| InferenceError::MalformedResponse("empty result list".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        http::{HeaderMap, StatusCode},
        routing::post,
        Json, Router,
    };
    use serde_json::{json, Value};

    /// Serves `router` on an ephemeral port and returns its base URL.
    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/generate")
    }

    #[test]
    fn test_decode_generation_takes_first_result() {
        let body = r#"[{"generated_text": "first"}, {"generated_text": "second"}]"#;
        assert_eq!(decode_generation(body).unwrap(), "first");
    }

    #[test]
    fn test_decode_generation_rejects_object_body() {
        let body = r#"{"generated_text": "not wrapped in a list"}"#;
        assert!(matches!(
            decode_generation(body),
            Err(InferenceError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_decode_generation_rejects_empty_list() {
        assert!(matches!(
            decode_generation("[]"),
            Err(InferenceError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_decode_generation_rejects_missing_field() {
        assert!(matches!(
            decode_generation(r#"[{"text": "x"}]"#),
            Err(InferenceError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_strip_prompt_echo() {
        let prompt = "Resume: cv\n";
        assert_eq!(
            strip_prompt_echo(prompt, format!("{prompt}1. Question: Q Answer: A")),
            "1. Question: Q Answer: A"
        );
        assert_eq!(
            strip_prompt_echo(prompt, "1. Question: Q Answer: A".to_string()),
            "1. Question: Q Answer: A"
        );
    }

    #[tokio::test]
    async fn test_generate_drops_echoed_prompt() {
        let router = Router::new().route(
            "/generate",
            post(|Json(body): Json<Value>| async move {
                let inputs = body["inputs"].as_str().unwrap_or_default().to_string();
                Json(json!([{ "generated_text": format!("{inputs}\n1. Question: Q Answer: A") }]))
            }),
        );
        let url = serve(router).await;
        let client = InferenceClient::new(url, "hf_test".to_string());

        let text = client.generate("cv").await.unwrap();
        assert_eq!(text, "\n1. Question: Q Answer: A");
    }

    #[test]
    fn test_debug_redacts_token() {
        let client = InferenceClient::new("http://localhost".to_string(), "hf_secret".to_string());
        let rendered = format!("{client:?}");
        assert!(!rendered.contains("hf_secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[tokio::test]
    async fn test_generate_sends_bearer_token_and_prompt() {
        let router = Router::new().route(
            "/generate",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                let auth = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                let inputs = body["inputs"].as_str().unwrap_or_default().to_string();
                let ok = auth == "Bearer hf_test" && inputs.contains("Rust engineer at Acme");
                let text = if ok { "1. Question: Q Answer: A" } else { "rejected" };
                Json(json!([{ "generated_text": text }]))
            }),
        );
        let url = serve(router).await;
        let client = InferenceClient::new(url, "hf_test".to_string());

        let text = client.generate("Rust engineer at Acme").await.unwrap();
        assert_eq!(text, "1. Question: Q Answer: A");
    }

    #[tokio::test]
    async fn test_generate_503_is_unavailable_with_verbatim_body() {
        let router = Router::new().route(
            "/generate",
            post(|| async {
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    r#"{"error":"Model is currently loading","estimated_time":20.0}"#,
                )
            }),
        );
        let url = serve(router).await;
        let client = InferenceClient::new(url, "hf_test".to_string());

        match client.generate("resume").await {
            Err(InferenceError::Unavailable { status, body }) => {
                assert_eq!(status, 503);
                assert_eq!(
                    body,
                    r#"{"error":"Model is currently loading","estimated_time":20.0}"#
                );
            }
            other => panic!("expected Unavailable, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_generate_unexpected_success_shape_is_malformed() {
        let router = Router::new().route(
            "/generate",
            post(|| async { Json(json!({ "outputs": "wrong shape" })) }),
        );
        let url = serve(router).await;
        let client = InferenceClient::new(url, "hf_test".to_string());

        assert!(matches!(
            client.generate("resume").await,
            Err(InferenceError::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_generate_unreachable_endpoint_is_transport_error() {
        // bind then drop to get a port with nothing listening
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = InferenceClient::new(format!("http://{addr}/generate"), "hf_test".to_string());
        let err = client.generate("resume").await.unwrap_err();
        assert!(matches!(err, InferenceError::Transport(_)));
        assert!(!err.to_string().contains("hf_test"));
    }
}
