//! Application state shared across handlers

use crate::config::Settings;
use crate::metrics::RelayMetrics;
use crate::network::HttpClient;
use crate::search::{CseClient, SearchBackend, SearchRelay};
use crate::summarize::{InferenceBackend, OllamaClient, Summarizer};
use std::sync::Arc;
use std::time::Duration;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Global settings
    pub settings: Arc<Settings>,
    /// Search relay
    pub relay: Arc<SearchRelay>,
    /// Result summarizer
    pub summarizer: Arc<Summarizer>,
    /// Request counters
    pub metrics: Arc<RelayMetrics>,
}

impl AppState {
    /// Create application state talking to the configured services
    pub fn new(settings: Settings) -> anyhow::Result<Self> {
        let search_timeout = Duration::try_from_secs_f64(settings.search.request_timeout)?;
        let search = Arc::new(CseClient::new(HttpClient::with_timeout(search_timeout)?));

        let inference_timeout = Duration::try_from_secs_f64(settings.summarizer.request_timeout)?;
        let inference = Arc::new(OllamaClient::new(
            HttpClient::with_timeout(inference_timeout)?,
            settings.summarizer.base_url.clone(),
            inference_timeout,
        ));

        Ok(Self::with_backends(settings, search, inference))
    }

    /// Create application state around explicit backends
    pub fn with_backends(
        settings: Settings,
        search: Arc<dyn SearchBackend>,
        inference: Arc<dyn InferenceBackend>,
    ) -> Self {
        let metrics = Arc::new(RelayMetrics::new());
        let relay = Arc::new(SearchRelay::new(
            search,
            settings.search.clone(),
            metrics.clone(),
        ));
        let summarizer = Arc::new(Summarizer::new(
            inference,
            settings.summarizer.model.clone(),
            metrics.clone(),
        ));

        Self {
            settings: Arc::new(settings),
            relay,
            summarizer,
            metrics,
        }
    }
}
