//! Summarizer request/response models and Ollama wire types

use serde::{Deserialize, Serialize};

use super::prompt::MISSING_SNIPPET;

pub const FALLBACK_MESSAGE: &str = "AI summary unavailable - Ollama may not be running";

/// A search result as sent back by the browser
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResultItem {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
}

impl ResultItem {
    pub fn snippet_or_placeholder(&self) -> &str {
        match self.snippet.as_deref() {
            Some(snippet) if !snippet.is_empty() => snippet,
            _ => MISSING_SNIPPET,
        }
    }
}

/// Body of `POST /summarize`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SummaryRequest {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub results: Option<Vec<ResultItem>>,
}

/// Either a real summary or an explicit "unavailable" signal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryResponse {
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SummaryResponse {
    pub fn summary(text: impl Into<String>) -> Self {
        Self {
            summary: Some(text.into()),
            fallback: None,
            error: None,
        }
    }

    pub fn fallback() -> Self {
        Self {
            summary: None,
            fallback: Some(true),
            error: Some(FALLBACK_MESSAGE.to_string()),
        }
    }
}

/// Sampling options sent with every generate call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationOptions {
    pub temperature: f64,
    pub num_predict: u32,
    pub top_p: f64,
    pub top_k: u32,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            temperature: 0.3,
            num_predict: 100,
            top_p: 0.9,
            top_k: 40,
        }
    }
}

/// Ollama `/api/generate` request
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    pub stream: bool,
    pub options: GenerationOptions,
}

impl GenerateRequest {
    /// Non-streamed request with the default sampling options
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            stream: false,
            options: GenerationOptions::default(),
        }
    }
}

/// Ollama `/api/generate` response, only the fields the relay reads
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub response: Option<String>,
}
