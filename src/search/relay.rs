//! Search relay: validation, window enforcement and forwarding

use super::backend::SearchBackend;
use super::error::RelayError;
use super::models::{CseRequest, SearchOutcome};
use super::window::{limit_reached, resolve_cursor, MAX_START};
use crate::config::SearchSettings;
use crate::metrics::RelayMetrics;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Forwards searches to the provider, answering out-of-window cursors locally
pub struct SearchRelay {
    backend: Arc<dyn SearchBackend>,
    settings: SearchSettings,
    metrics: Arc<RelayMetrics>,
}

impl SearchRelay {
    pub fn new(
        backend: Arc<dyn SearchBackend>,
        settings: SearchSettings,
        metrics: Arc<RelayMetrics>,
    ) -> Self {
        Self {
            backend,
            settings,
            metrics,
        }
    }

    /// Relay one search.
    ///
    /// `raw_start` is the unparsed `start` parameter. The window check runs
    /// before anything else touches the network.
    pub async fn search(
        &self,
        query: Option<&str>,
        raw_start: Option<&str>,
    ) -> Result<SearchOutcome, RelayError> {
        let query = match query {
            Some(q) if !q.is_empty() => q,
            _ => return Err(RelayError::MissingQuery),
        };

        let start = resolve_cursor(raw_start);

        if let Some(envelope) = limit_reached(start) {
            info!(
                "Start value {} exceeds Google API limit of {}. Returning empty results.",
                start, MAX_START
            );
            self.metrics.inc_limit_reached();
            return Ok(SearchOutcome::LimitReached(envelope));
        }

        let request = self.build_request(query, start)?;

        debug!(
            query = %request.query,
            start = request.start,
            cx = %request.cx,
            api_key_len = request.key_len(),
            url = %request,
            "Forwarding search request"
        );

        self.metrics.inc_forwarded();

        match self.backend.fetch(&request).await {
            Ok(page) => Ok(SearchOutcome::Upstream(page)),
            Err(e) => {
                self.metrics.inc_upstream_failure();
                error!(error = %e, request = %request, "Error fetching search results");
                if let RelayError::Upstream { status, body } = &e {
                    error!(status, details = %body, "Google API error details");
                }
                Err(e)
            }
        }
    }

    fn build_request(&self, query: &str, start: i64) -> Result<CseRequest, RelayError> {
        let (Some(api_key), Some(cx)) = (&self.settings.api_key, &self.settings.cx) else {
            return Err(RelayError::NotConfigured);
        };

        Ok(CseRequest {
            endpoint: self.settings.endpoint.clone(),
            api_key: api_key.clone(),
            cx: cx.clone(),
            query: query.to_string(),
            start,
        })
    }
}
