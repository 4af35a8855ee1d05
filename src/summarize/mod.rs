//! Summarizer module
//!
//! Turns search results the browser already holds into a short answer from a
//! local Ollama model, degrading to an explicit fallback on any failure.

mod models;
mod ollama;
pub mod prompt;
mod summarizer;

pub use models::*;
pub use ollama::{InferenceBackend, InferenceError, OllamaClient};
pub use summarizer::{SummarizeError, Summarizer};
