//! Metrics collection module
//!
//! Counts how requests flow through the relay and the summarizer.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Relay-wide counters
#[derive(Debug, Default)]
pub struct RelayMetrics {
    searches_forwarded: AtomicU64,
    limit_reached: AtomicU64,
    upstream_failures: AtomicU64,
    summaries: AtomicU64,
    summary_fallbacks: AtomicU64,
}

impl RelayMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// A search was sent upstream
    pub fn inc_forwarded(&self) {
        self.searches_forwarded.fetch_add(1, Ordering::Relaxed);
    }

    /// A search was answered locally because the cursor was out of range
    pub fn inc_limit_reached(&self) {
        self.limit_reached.fetch_add(1, Ordering::Relaxed);
    }

    /// A forwarded search failed
    pub fn inc_upstream_failure(&self) {
        self.upstream_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// A summary was generated
    pub fn inc_summary(&self) {
        self.summaries.fetch_add(1, Ordering::Relaxed);
    }

    /// A summary request degraded to the fallback
    pub fn inc_summary_fallback(&self) {
        self.summary_fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time copy of every counter
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            searches_forwarded: self.searches_forwarded.load(Ordering::Relaxed),
            limit_reached: self.limit_reached.load(Ordering::Relaxed),
            upstream_failures: self.upstream_failures.load(Ordering::Relaxed),
            summaries: self.summaries.load(Ordering::Relaxed),
            summary_fallbacks: self.summary_fallbacks.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub searches_forwarded: u64,
    pub limit_reached: u64,
    pub upstream_failures: u64,
    pub summaries: u64,
    pub summary_fallbacks: u64,
}
