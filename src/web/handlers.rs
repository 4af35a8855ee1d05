//! HTTP request handlers

use super::state::AppState;
use crate::search::SearchOutcome;
use crate::summarize::{SummarizeError, SummaryRequest};
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Query parameters for search
#[derive(Debug, Default)]
pub struct SearchParams {
    /// Search query
    pub q: Option<String>,
    /// 1-based result cursor, parsed leniently
    pub start: Option<String>,
}

impl SearchParams {
    /// Pick the parameters out of raw pairs, keeping the first value of a
    /// repeated key
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "q" => &mut params.q,
                "start" => &mut params.start,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

/// Search handler
pub async fn search(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let params = SearchParams::from_pairs(pairs);
    let outcome = state
        .relay
        .search(params.q.as_deref(), params.start.as_deref())
        .await;

    match outcome {
        Ok(SearchOutcome::LimitReached(envelope)) => Json(envelope).into_response(),
        Ok(SearchOutcome::Upstream(page)) => {
            let content_type = page
                .content_type
                .unwrap_or_else(|| "application/json".to_string());
            ([(header::CONTENT_TYPE, content_type)], page.body).into_response()
        }
        Err(e) if e.is_client_error() => error_response(StatusCode::BAD_REQUEST, e.to_string()),
        Err(_) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to fetch search results",
        ),
    }
}

/// Summary handler. Only malformed input produces a non-200 status.
pub async fn summarize(
    State(state): State<AppState>,
    payload: Result<Json<SummaryRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::warn!("Rejected summary request body: {}", rejection.body_text());
            return error_response(
                StatusCode::BAD_REQUEST,
                SummarizeError::MissingInput.to_string(),
            );
        }
    };

    match state.summarizer.summarize(request).await {
        Ok(response) => Json(response).into_response(),
        Err(e) => error_response(StatusCode::BAD_REQUEST, e.to_string()),
    }
}

/// Health check handler
pub async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "version": crate::VERSION
    }))
}

/// Counter snapshot
pub async fn stats(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.metrics.snapshot())
}
