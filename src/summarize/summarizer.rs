//! Best-effort summaries of search results

use super::models::{GenerateRequest, SummaryRequest, SummaryResponse};
use super::ollama::{InferenceBackend, InferenceError};
use super::prompt::build_prompt;
use crate::metrics::RelayMetrics;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

/// Length of the summary preview written to the log
const PREVIEW_CHARS: usize = 100;

/// Errors surfaced to the caller. Inference failures never are.
#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("Query and results are required")]
    MissingInput,
}

/// Asks the inference backend for a short answer built from search results
pub struct Summarizer {
    backend: Arc<dyn InferenceBackend>,
    model: String,
    metrics: Arc<RelayMetrics>,
}

impl Summarizer {
    pub fn new(
        backend: Arc<dyn InferenceBackend>,
        model: impl Into<String>,
        metrics: Arc<RelayMetrics>,
    ) -> Self {
        Self {
            backend,
            model: model.into(),
            metrics,
        }
    }

    /// Summarize the request's results.
    ///
    /// Only missing input is an error; every inference failure is folded
    /// into [`SummaryResponse::fallback`].
    pub async fn summarize(&self, request: SummaryRequest) -> Result<SummaryResponse, SummarizeError> {
        let (query, results) = match (request.query, request.results) {
            (Some(query), Some(results)) if !query.is_empty() && !results.is_empty() => {
                (query, results)
            }
            _ => return Err(SummarizeError::MissingInput),
        };

        let prompt = build_prompt(&query, &results);
        let generate = GenerateRequest::new(self.model.clone(), prompt);

        match self.backend.generate(&generate).await {
            Ok(response) => {
                let text = response.response.unwrap_or_default();
                let summary = text.trim();

                info!(
                    model = %self.model,
                    query = %query,
                    summary = %preview(summary),
                    "AI summary generated"
                );
                self.metrics.inc_summary();

                Ok(SummaryResponse::summary(summary))
            }
            Err(e) => {
                error!(error = %e, model = %self.model, "Error generating AI summary");
                if matches!(e, InferenceError::ConnectionRefused) {
                    error!("Ollama server not running. Start it with: ollama serve");
                }
                self.metrics.inc_summary_fallback();

                Ok(SummaryResponse::fallback())
            }
        }
    }
}

fn preview(text: &str) -> String {
    let mut out: String = text.chars().take(PREVIEW_CHARS).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::HttpClient;
    use crate::summarize::models::{GenerateResponse, ResultItem};
    use crate::summarize::ollama::OllamaClient;
    use crate::test_support::LogCapture;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Scripted backend recording every prompt it receives
    struct ScriptedBackend {
        prompts: Mutex<Vec<String>>,
        reply: fn() -> Result<GenerateResponse, InferenceError>,
    }

    impl ScriptedBackend {
        fn new(reply: fn() -> Result<GenerateResponse, InferenceError>) -> Arc<Self> {
            Arc::new(Self {
                prompts: Mutex::new(Vec::new()),
                reply,
            })
        }

        fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl InferenceBackend for ScriptedBackend {
        async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse, InferenceError> {
            assert!(!request.stream);
            self.prompts.lock().unwrap().push(request.prompt.clone());
            (self.reply)()
        }
    }

    fn healthy() -> Result<GenerateResponse, InferenceError> {
        Ok(GenerateResponse {
            response: Some("  Paris is the capital of France.\n".to_string()),
        })
    }

    fn refused() -> Result<GenerateResponse, InferenceError> {
        Err(InferenceError::ConnectionRefused)
    }

    fn timed_out() -> Result<GenerateResponse, InferenceError> {
        Err(InferenceError::Timeout)
    }

    fn request(query: &str, count: usize) -> SummaryRequest {
        SummaryRequest {
            query: Some(query.to_string()),
            results: Some(
                (0..count)
                    .map(|i| ResultItem {
                        title: Some(format!("Title {i}")),
                        snippet: Some(format!("Snippet {i}")),
                    })
                    .collect(),
            ),
        }
    }

    fn summarizer(backend: Arc<ScriptedBackend>) -> (Summarizer, Arc<RelayMetrics>) {
        let metrics = Arc::new(RelayMetrics::new());
        (Summarizer::new(backend, "llama3.2", metrics.clone()), metrics)
    }

    #[tokio::test]
    async fn test_summary_is_trimmed() {
        let backend = ScriptedBackend::new(healthy);
        let (summarizer, metrics) = summarizer(backend.clone());

        let response = summarizer
            .summarize(request("capital of France", 1))
            .await
            .unwrap();

        assert_eq!(response, SummaryResponse::summary("Paris is the capital of France."));
        assert_eq!(backend.prompts().len(), 1);
        assert_eq!(metrics.snapshot().summaries, 1);
    }

    #[tokio::test]
    async fn test_missing_text_becomes_empty_summary() {
        let backend = ScriptedBackend::new(|| Ok(GenerateResponse::default()));
        let (summarizer, _) = summarizer(backend);

        let response = summarizer.summarize(request("q", 2)).await.unwrap();
        assert_eq!(response.summary.as_deref(), Some(""));
        assert!(response.fallback.is_none());
    }

    #[tokio::test]
    async fn test_failures_degrade_to_fallback() {
        for reply in [refused, timed_out] {
            let backend = ScriptedBackend::new(reply);
            let (summarizer, metrics) = summarizer(backend);

            let response = summarizer.summarize(request("q", 3)).await.unwrap();
            assert_eq!(response, SummaryResponse::fallback());
            assert_eq!(metrics.snapshot().summary_fallbacks, 1);
        }
    }

    #[tokio::test]
    async fn test_connection_refused_logs_hint() {
        let capture = LogCapture::default();
        let _guard = tracing::subscriber::set_default(capture.subscriber());

        let (summarizer, _) = summarizer(ScriptedBackend::new(refused));
        summarizer.summarize(request("q", 1)).await.unwrap();

        assert!(capture.contents().contains("ollama serve"));
    }

    #[tokio::test]
    async fn test_stopped_ollama_logs_hint() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let capture = LogCapture::default();
        let _guard = tracing::subscriber::set_default(capture.subscriber());

        let client = OllamaClient::new(
            HttpClient::new().unwrap(),
            format!("http://{}", addr),
            Duration::from_secs(5),
        );
        let summarizer = Summarizer::new(Arc::new(client), "llama3.2", Arc::new(RelayMetrics::new()));

        let response = summarizer.summarize(request("q", 1)).await.unwrap();

        assert_eq!(response, SummaryResponse::fallback());
        assert!(capture
            .contents()
            .contains("Ollama server not running. Start it with: ollama serve"));
    }

    #[tokio::test]
    async fn test_missing_input_rejected() {
        let backend = ScriptedBackend::new(healthy);
        let (summarizer, _) = summarizer(backend.clone());

        let cases = vec![
            SummaryRequest::default(),
            SummaryRequest {
                query: Some("q".to_string()),
                results: None,
            },
            SummaryRequest {
                query: Some("q".to_string()),
                results: Some(vec![]),
            },
            SummaryRequest {
                query: Some(String::new()),
                results: request("q", 1).results,
            },
        ];

        for case in cases {
            assert!(matches!(
                summarizer.summarize(case).await,
                Err(SummarizeError::MissingInput)
            ));
        }
        assert!(backend.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_only_first_five_results_reach_backend() {
        let backend = ScriptedBackend::new(healthy);
        let (summarizer, _) = summarizer(backend.clone());

        summarizer.summarize(request("q", 9)).await.unwrap();
        summarizer.summarize(request("q", 5)).await.unwrap();

        let prompts = backend.prompts();
        assert_eq!(prompts[0], prompts[1]);
        assert!(prompts[0].contains("Title 4"));
        assert!(!prompts[0].contains("Title 5"));
    }

    #[test]
    fn test_preview_is_char_safe() {
        let long = "é".repeat(150);
        assert_eq!(preview(&long).chars().count(), PREVIEW_CHARS + 3);
    }
}
