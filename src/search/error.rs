//! Error types for the search relay

use thiserror::Error;

/// Errors that can occur while relaying a search
#[derive(Debug, Error)]
pub enum RelayError {
    /// The caller did not supply a query
    #[error("Query parameter \"q\" is required")]
    MissingQuery,

    /// The relay is missing its credentials
    #[error("search credentials are not configured")]
    NotConfigured,

    /// The configured endpoint could not be turned into a request URL
    #[error("invalid search endpoint: {0}")]
    Endpoint(#[from] url::ParseError),

    /// Request timed out
    #[error("search request timed out")]
    Timeout,

    /// Network-level error during HTTP communication
    #[error("network error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The provider answered with a non-success status
    #[error("search provider returned {status}")]
    Upstream { status: u16, body: String },
}

impl RelayError {
    /// Whether the caller, rather than the relay or the provider, is at fault
    pub fn is_client_error(&self) -> bool {
        matches!(self, RelayError::MissingQuery)
    }
}

impl From<reqwest::Error> for RelayError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            RelayError::Timeout
        } else {
            // The request URL carries the API key.
            RelayError::Transport(e.without_url())
        }
    }
}
