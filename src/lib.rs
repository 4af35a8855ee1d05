//! search-relay: a thin backend between a browser search UI, the Google
//! Custom Search JSON API and a local Ollama model.
//!
//! `/search` forwards queries upstream while enforcing the provider's
//! 100-result window; `/summarize` asks the model for a short answer and
//! degrades to an explicit fallback when the model is unavailable.

pub mod config;
pub mod metrics;
pub mod network;
pub mod search;
pub mod summarize;
pub mod web;

#[cfg(test)]
mod test_support;

pub use config::Settings;
pub use search::SearchRelay;
pub use summarize::Summarizer;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default timeout for outbound requests in seconds
pub const DEFAULT_TIMEOUT: u64 = 10;
