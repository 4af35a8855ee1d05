//! Ollama inference client

use super::models::{GenerateRequest, GenerateResponse};
use crate::network::HttpClient;
use async_trait::async_trait;
use std::error::Error as StdError;
use std::time::Duration;
use thiserror::Error;

/// Errors from the inference service
#[derive(Debug, Error)]
pub enum InferenceError {
    /// Nothing is listening at the configured address
    #[error("connection refused")]
    ConnectionRefused,

    /// The host could not be reached for another reason
    #[error("inference service unreachable: {0}")]
    Unreachable(#[source] reqwest::Error),

    /// Request timed out
    #[error("inference request timed out")]
    Timeout,

    /// The service answered with a non-success status
    #[error("inference service returned {0}")]
    Status(u16),

    /// The response body was not a generate response
    #[error("malformed inference response: {0}")]
    Malformed(String),

    /// Any other transport failure
    #[error("network error: {0}")]
    Transport(#[source] reqwest::Error),
}

impl From<reqwest::Error> for InferenceError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            InferenceError::Timeout
        } else if e.is_connect() {
            if is_connection_refused(&e) {
                InferenceError::ConnectionRefused
            } else {
                InferenceError::Unreachable(e)
            }
        } else if e.is_decode() {
            InferenceError::Malformed(e.to_string())
        } else {
            InferenceError::Transport(e)
        }
    }
}

fn is_connection_refused(e: &(dyn StdError + 'static)) -> bool {
    let mut current = Some(e);
    while let Some(err) = current {
        if let Some(io) = err.downcast_ref::<std::io::Error>() {
            if io.kind() == std::io::ErrorKind::ConnectionRefused {
                return true;
            }
        }
        current = err.source();
    }
    false
}

/// A service that turns a prompt into generated text
#[async_trait]
pub trait InferenceBackend: Send + Sync {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, InferenceError>;
}

/// Client for a local Ollama server
#[derive(Clone)]
pub struct OllamaClient {
    client: HttpClient,
    base_url: String,
    timeout: Duration,
}

impl OllamaClient {
    pub fn new(client: HttpClient, base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            timeout,
        }
    }

    fn generate_url(&self) -> String {
        format!("{}/api/generate", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl InferenceBackend for OllamaClient {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, InferenceError> {
        let response = self
            .client
            .post_json(&self.generate_url(), request, self.timeout)
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(InferenceError::Status(status.as_u16()));
        }

        Ok(response.json::<GenerateResponse>().await?)
    }
}
