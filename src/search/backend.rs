//! Outbound search provider

use super::error::RelayError;
use super::models::{CseRequest, UpstreamPage};
use crate::network::HttpClient;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;

/// A search provider the relay forwards to
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Issue one request and return the successful payload
    async fn fetch(&self, request: &CseRequest) -> Result<UpstreamPage, RelayError>;
}

/// Google Custom Search JSON API client
#[derive(Clone)]
pub struct CseClient {
    client: HttpClient,
}

impl CseClient {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SearchBackend for CseClient {
    async fn fetch(&self, request: &CseRequest) -> Result<UpstreamPage, RelayError> {
        let url = request.url()?;
        let response = self.client.get(url.as_str()).await?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(RelayError::Upstream {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        Ok(UpstreamPage {
            content_type,
            body: body.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::Secret;
    use std::time::Duration;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request(server: &MockServer, query: &str, start: i64) -> CseRequest {
        CseRequest {
            endpoint: format!("{}/customsearch/v1", server.uri()),
            api_key: Secret::new("test-key".to_string()),
            cx: "test-cx".to_string(),
            query: query.to_string(),
            start,
        }
    }

    #[tokio::test]
    async fn test_passes_body_through() {
        let server = MockServer::start().await;
        let payload = r#"{"items":[{"title":"Cats","link":"https://cats.example"}],"searchInformation":{"totalResults":"1"}}"#;

        Mock::given(method("GET"))
            .and(path("/customsearch/v1"))
            .and(query_param("key", "test-key"))
            .and(query_param("cx", "test-cx"))
            .and(query_param("q", "big cats"))
            .and(query_param("start", "11"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(payload, "application/json"))
            .expect(1)
            .mount(&server)
            .await;

        let client = CseClient::new(HttpClient::new().unwrap());
        let page = client.fetch(&request(&server, "big cats", 11)).await.unwrap();

        assert_eq!(page.body, payload.as_bytes());
        assert_eq!(page.content_type.as_deref(), Some("application/json"));
    }

    #[tokio::test]
    async fn test_error_status_captures_body() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(403)
                    .set_body_raw(r#"{"error":{"message":"quota exceeded"}}"#, "application/json"),
            )
            .mount(&server)
            .await;

        let client = CseClient::new(HttpClient::new().unwrap());
        let err = client.fetch(&request(&server, "cats", 1)).await.unwrap_err();

        match err {
            RelayError::Upstream { status, body } => {
                assert_eq!(status, 403);
                assert!(body.contains("quota exceeded"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_timeout() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let client = CseClient::new(HttpClient::with_timeout(Duration::from_millis(100)).unwrap());
        let err = client.fetch(&request(&server, "cats", 1)).await.unwrap_err();

        assert!(matches!(err, RelayError::Timeout));
    }
}
