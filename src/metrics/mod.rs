//! Counters for remote-store traffic, logged as a summary at shutdown.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Default)]
struct Counters {
    http_attempts: AtomicU64,
    http_errors: AtomicU64,
    http_retries: AtomicU64,
    http_duration_ms: AtomicU64,
    files_listed: AtomicU64,
    documents_downloaded: AtomicU64,
    records_fetched: AtomicU64,
}

/// Metrics collector shared by every client built from one [`Metrics`].
///
/// Clones share the same counters.
#[derive(Debug, Clone, Default)]
pub struct Metrics {
    counters: Arc<Counters>,
}

/// A snapshot of all counters.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsSummary {
    pub http_requests_total: u64,
    pub http_errors_total: u64,
    pub http_retries_total: u64,
    pub http_duration_avg_ms: f64,
    pub files_listed_total: u64,
    pub documents_downloaded_total: u64,
    pub records_fetched_total: u64,
}

fn add(counter: &AtomicU64, n: u64) {
    counter.fetch_add(n, Ordering::Relaxed);
}

fn get(counter: &AtomicU64) -> u64 {
    counter.load(Ordering::Relaxed)
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one HTTP attempt, successful or not.
    pub fn record_http_attempt(&self, duration: Duration, failed: bool) {
        add(&self.counters.http_attempts, 1);
        add(&self.counters.http_duration_ms, duration.as_millis() as u64);
        if failed {
            add(&self.counters.http_errors, 1);
        }
    }

    pub fn record_http_retry(&self) {
        add(&self.counters.http_retries, 1);
    }

    pub fn record_files_listed(&self, count: usize) {
        add(&self.counters.files_listed, count as u64);
    }

    pub fn record_document_downloaded(&self) {
        add(&self.counters.documents_downloaded, 1);
    }

    pub fn record_records_fetched(&self, count: usize) {
        add(&self.counters.records_fetched, count as u64);
    }

    pub fn http_requests_total(&self) -> u64 {
        get(&self.counters.http_attempts)
    }

    pub fn http_errors_total(&self) -> u64 {
        get(&self.counters.http_errors)
    }

    pub fn http_retries_total(&self) -> u64 {
        get(&self.counters.http_retries)
    }

    pub fn files_listed_total(&self) -> u64 {
        get(&self.counters.files_listed)
    }

    pub fn documents_downloaded_total(&self) -> u64 {
        get(&self.counters.documents_downloaded)
    }

    pub fn records_fetched_total(&self) -> u64 {
        get(&self.counters.records_fetched)
    }

    pub fn summary(&self) -> MetricsSummary {
        let attempts = self.http_requests_total();
        let http_duration_avg_ms = match attempts {
            0 => 0.0,
            n => get(&self.counters.http_duration_ms) as f64 / n as f64,
        };

        MetricsSummary {
            http_requests_total: attempts,
            http_errors_total: self.http_errors_total(),
            http_retries_total: self.http_retries_total(),
            http_duration_avg_ms,
            files_listed_total: self.files_listed_total(),
            documents_downloaded_total: self.documents_downloaded_total(),
            records_fetched_total: self.records_fetched_total(),
        }
    }
}
