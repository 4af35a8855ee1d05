//! HTTP networking module
//!
//! Provides the outbound HTTP client shared by the search relay and the summarizer.

mod client;

pub use client::HttpClient;
