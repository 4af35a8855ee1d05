//! Search request and response models

use secrecy::{ExposeSecret, Secret};
use serde::Serialize;
use std::fmt;
use url::Url;

/// Placeholder printed wherever the API key would otherwise appear
pub const REDACTED_KEY: &str = "HIDDEN_KEY";

/// An outbound Custom Search request
#[derive(Clone)]
pub struct CseRequest {
    /// Custom Search JSON API endpoint
    pub endpoint: String,
    /// API key
    pub api_key: Secret<String>,
    /// Search engine identifier
    pub cx: String,
    /// User query, unencoded
    pub query: String,
    /// 1-based start cursor, passed through as resolved
    pub start: i64,
}

impl CseRequest {
    /// Full request URL including the API key
    pub fn url(&self) -> Result<Url, url::ParseError> {
        self.build_url(self.api_key.expose_secret())
    }

    /// Request URL with the API key replaced, safe to log
    pub fn redacted_url(&self) -> String {
        match self.build_url(REDACTED_KEY) {
            Ok(url) => url.to_string(),
            Err(_) => format!("{} (invalid endpoint)", self.endpoint),
        }
    }

    /// Length of the API key
    pub fn key_len(&self) -> usize {
        self.api_key.expose_secret().len()
    }

    fn build_url(&self, key: &str) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(&self.endpoint)?;
        let query = format!(
            "key={}&cx={}&q={}&start={}",
            urlencoding::encode(key),
            urlencoding::encode(&self.cx),
            urlencoding::encode(&self.query),
            self.start
        );
        url.set_query(Some(&query));
        Ok(url)
    }
}

impl fmt::Display for CseRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.redacted_url())
    }
}

impl fmt::Debug for CseRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CseRequest")
            .field("endpoint", &self.endpoint)
            .field("api_key", &REDACTED_KEY)
            .field("cx", &self.cx)
            .field("query", &self.query)
            .field("start", &self.start)
            .finish()
    }
}

/// A successful upstream response, kept byte for byte
#[derive(Debug, Clone)]
pub struct UpstreamPage {
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

/// Result counters reported alongside search items
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchInformation {
    pub total_results: String,
    pub formatted_total_results: String,
}

/// Synthetic response for cursors past the result window
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitReachedEnvelope {
    pub items: Vec<serde_json::Value>,
    pub search_information: SearchInformation,
    pub limit_reached: bool,
    pub message: String,
}

/// What the relay hands back for a valid search
#[derive(Debug, Clone)]
pub enum SearchOutcome {
    /// Upstream payload, passed through unchanged
    Upstream(UpstreamPage),
    /// The cursor was past the result window; nothing was sent upstream
    LimitReached(LimitReachedEnvelope),
}
