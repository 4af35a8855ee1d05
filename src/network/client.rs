//! HTTP client for calling the search provider and the inference service

use anyhow::Result;
use reqwest::{Client, Response};
use serde::Serialize;
use std::time::Duration;

/// HTTP client wrapper with relay-specific defaults
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    default_timeout: Duration,
}

impl HttpClient {
    /// Create a new HTTP client with the relay's default timeout
    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(crate::DEFAULT_TIMEOUT))
    }

    /// Create a new HTTP client whose requests expire after `timeout`
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent())
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self {
            client,
            default_timeout: timeout,
        })
    }

    /// Simple GET request
    pub async fn get(&self, url: &str) -> reqwest::Result<Response> {
        self.client
            .get(url)
            .header("Accept", "application/json")
            .timeout(self.default_timeout)
            .send()
            .await
    }

    /// POST with JSON body and an explicit timeout
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &T,
        timeout: Duration,
    ) -> reqwest::Result<Response> {
        self.client
            .post(url)
            .json(body)
            .timeout(timeout)
            .send()
            .await
    }

    /// Default timeout applied to GET requests
    pub fn default_timeout(&self) -> Duration {
        self.default_timeout
    }
}

fn user_agent() -> String {
    format!("search-relay/{}", crate::VERSION)
}
