//! Client for the hosted text-generation service.
//!
//! The gateway talks to the service through the [`TextGenerator`] trait; the
//! production implementation is [`MessagesClient`], which calls the Anthropic
//! Messages API over reqwest. One request per call, no retries.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::config::UpstreamConfig;

/// Header carrying the API credential
const API_KEY_HEADER: &str = "x-api-key";
/// Header selecting the Messages API version
const API_VERSION_HEADER: &str = "anthropic-version";
const API_VERSION: &str = "2023-06-01";
const MESSAGES_PATH: &str = "/v1/messages";

/// Error talking to the text-generation service
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("Generation service timed out after {0} seconds")]
    Timeout(u64),

    #[error("Could not reach generation service: {0}")]
    Transport(String),

    #[error("Generation service returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Malformed response from generation service: {0}")]
    MalformedResponse(String),

    #[error("Generation service returned no text")]
    EmptyResponse,

    #[error("Failed to create HTTP client: {0}")]
    Client(String),
}

/// Something that turns a prompt into generated text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, UpstreamError>;
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [Message<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Messages API client with a bounded per-request timeout
pub struct MessagesClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    timeout_seconds: u64,
}

impl std::fmt::Debug for MessagesClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessagesClient")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish_non_exhaustive()
    }
}

impl MessagesClient {
    pub fn new(config: &UpstreamConfig, api_key: String) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(format!("label-desk/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| UpstreamError::Client(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: format!("{}{}", config.base_url.trim_end_matches('/'), MESSAGES_PATH),
            api_key,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            timeout_seconds: config.timeout_seconds,
        })
    }

    fn map_send_error(&self, err: reqwest::Error) -> UpstreamError {
        if err.is_timeout() {
            UpstreamError::Timeout(self.timeout_seconds)
        } else {
            UpstreamError::Transport(err.to_string())
        }
    }
}

#[async_trait]
impl TextGenerator for MessagesClient {
    async fn complete(&self, prompt: &str) -> Result<String, UpstreamError> {
        let body = MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            messages: [Message {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .http
            .post(&self.endpoint)
            .header(API_KEY_HEADER, &self.api_key)
            .header(API_VERSION_HEADER, API_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| self.map_send_error(e))?;

        if !status.is_success() {
            return Err(status_error(status, &bytes));
        }

        let parsed: MessagesResponse = serde_json::from_slice(&bytes)
            .map_err(|e| UpstreamError::MalformedResponse(e.to_string()))?;

        extract_text(parsed)
    }
}

fn status_error(status: StatusCode, body: &[u8]) -> UpstreamError {
    let message = serde_json::from_slice::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| {
            status
                .canonical_reason()
                .unwrap_or("unexpected status")
                .to_string()
        });

    UpstreamError::Status {
        status: status.as_u16(),
        message,
    }
}

/// First text block of the response; the model's label is returned verbatim.
fn extract_text(response: MessagesResponse) -> Result<String, UpstreamError> {
    response
        .content
        .into_iter()
        .filter(|block| block.kind == "text")
        .find_map(|block| block.text)
        .filter(|text| !text.trim().is_empty())
        .ok_or(UpstreamError::EmptyResponse)
}
