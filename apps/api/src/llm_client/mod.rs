//! LLM Client: the single point of entry for all inference backend calls.
//!
//! No other module may call the backend directly. Handlers depend on the
//! `InferenceBackend` trait; `InferenceClient` is the HTTP implementation
//! wired up in `main`.
//!
//! Every call is a single attempt: failures are surfaced to the caller as-is.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::{Config, GenerationParams};

pub mod prompts;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Inference backend request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Inference backend timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("Inference backend returned status {status}")]
    Api { status: u16, message: String },

    #[error("Inference backend reply could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}

/// A fully resolved generation request: which model, and what to ask it.
#[derive(Debug, Clone, PartialEq)]
pub struct InferenceRequest {
    pub model: String,
    pub prompt: String,
}

#[derive(Debug, Serialize)]
struct GenerateBody<'a> {
    model: &'a str,
    prompt: &'a str,
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateReply {
    #[serde(default)]
    response: String,
}

/// The inference seam. Carried in `AppState` as `Arc<dyn InferenceBackend>`.
/// Returns the model's raw text output, untouched.
#[async_trait]
pub trait InferenceBackend: Send + Sync {
    async fn generate(&self, request: &InferenceRequest) -> Result<String, LlmError>;
}

/// HTTP client for a text-generation backend exposing a single
/// `POST {"model", "prompt", ...} -> {"response": "..."}` endpoint.
#[derive(Clone)]
pub struct InferenceClient {
    client: Client,
    url: String,
    timeout: Duration,
    params: GenerationParams,
}

impl InferenceClient {
    pub fn new(config: &Config) -> Result<Self, LlmError> {
        let client = Client::builder().timeout(config.inference_timeout).build()?;
        Ok(Self {
            client,
            url: config.inference_url.clone(),
            timeout: config.inference_timeout,
            params: config.generation,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// The client-wide timeout can fire while sending or while reading the body.
    fn transport_error(&self, e: reqwest::Error) -> LlmError {
        if e.is_timeout() {
            LlmError::Timeout(self.timeout)
        } else {
            LlmError::Http(e)
        }
    }
}

#[async_trait]
impl InferenceBackend for InferenceClient {
    async fn generate(&self, request: &InferenceRequest) -> Result<String, LlmError> {
        let body = GenerateBody {
            model: &request.model,
            prompt: &request.prompt,
            temperature: self.params.temperature,
            max_tokens: self.params.max_tokens,
            top_p: self.params.top_p,
            stream: false,
        };

        let response = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();

        if status != reqwest::StatusCode::OK {
            let message = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| self.transport_error(e))?;
        let reply: GenerateReply = serde_json::from_str(&text)?;

        debug!(
            "Inference call succeeded: model={}, response_chars={}",
            request.model,
            reply.response.len()
        );

        Ok(reply.response)
    }
}
