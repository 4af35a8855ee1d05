//! Result-window pagination rules
//!
//! The Custom Search API addresses at most 100 results through a 1-based
//! `start` cursor, ten per page. Any cursor above 91 can never yield a full
//! page, so such requests are answered locally.

use super::models::{LimitReachedEnvelope, SearchInformation};

/// Maximum number of results the provider will ever return for a query
pub const MAX_RESULTS: i64 = 100;

/// Results per page
pub const PAGE_SIZE: i64 = 10;

/// Largest cursor that is still forwarded upstream
pub const MAX_START: i64 = MAX_RESULTS - PAGE_SIZE + 1;

/// Cursor used when none (or an unparsable one) is supplied
pub const DEFAULT_CURSOR: i64 = 1;

pub const LIMIT_MESSAGE: &str = "Google Custom Search API only returns up to 100 results.";

/// Resolve the raw `start` parameter into a cursor.
///
/// Reads the leading integer the way a lenient form parser would: leading
/// whitespace and a sign are accepted and anything after the digits is
/// ignored. Absent, non-numeric and zero values resolve to
/// [`DEFAULT_CURSOR`]; any other value, negative ones included, is kept.
/// Values outside the `i64` range saturate.
pub fn resolve_cursor(raw: Option<&str>) -> i64 {
    let Some(raw) = raw else {
        return DEFAULT_CURSOR;
    };

    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = rest
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..end];

    if digits.is_empty() {
        return DEFAULT_CURSOR;
    }

    match (negative, digits.parse::<i64>().ok()) {
        (_, Some(0)) => DEFAULT_CURSOR,
        (true, Some(value)) => -value,
        (false, Some(value)) => value,
        (true, None) => i64::MIN,
        (false, None) => i64::MAX,
    }
}

/// Whether a cursor can still be forwarded upstream
pub fn within_window(cursor: i64) -> bool {
    cursor <= MAX_START
}

/// Envelope for cursors past the window, `None` when the cursor is in range
pub fn limit_reached(cursor: i64) -> Option<LimitReachedEnvelope> {
    if within_window(cursor) {
        return None;
    }

    Some(LimitReachedEnvelope {
        items: Vec::new(),
        search_information: SearchInformation {
            total_results: "0".to_string(),
            formatted_total_results: "0".to_string(),
        },
        limit_reached: true,
        message: LIMIT_MESSAGE.to_string(),
    })
}
