//! Basic metrics instrumentation for the submission pipeline.
//!
//! Provides counters and duration tracking for submissions, deliveries and
//! HTTP calls to the email API.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Metrics collector for submissions and deliveries.
#[derive(Debug, Clone)]
pub struct SubmissionMetrics {
    /// Submissions accepted by the pipeline (entered `Sending`)
    submissions_total: Arc<AtomicU64>,

    /// Submissions rejected because another was in flight
    rejected_busy_total: Arc<AtomicU64>,

    /// Submissions delivered successfully
    sent_total: Arc<AtomicU64>,

    /// Submissions that failed to deliver
    failed_total: Arc<AtomicU64>,

    /// Total time spent in delivery attempts in milliseconds
    send_duration_total_ms: Arc<AtomicU64>,

    /// Total number of HTTP requests to the email API
    http_requests_total: Arc<AtomicU64>,

    /// Total number of HTTP errors
    http_errors_total: Arc<AtomicU64>,

    /// Total duration of all HTTP requests in milliseconds
    http_duration_total_ms: Arc<AtomicU64>,
}

impl Default for SubmissionMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmissionMetrics {
    /// Create a new metrics collector.
    pub fn new() -> Self {
        Self {
            submissions_total: Arc::new(AtomicU64::new(0)),
            rejected_busy_total: Arc::new(AtomicU64::new(0)),
            sent_total: Arc::new(AtomicU64::new(0)),
            failed_total: Arc::new(AtomicU64::new(0)),
            send_duration_total_ms: Arc::new(AtomicU64::new(0)),
            http_requests_total: Arc::new(AtomicU64::new(0)),
            http_errors_total: Arc::new(AtomicU64::new(0)),
            http_duration_total_ms: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Record a submission entering the `Sending` state.
    pub fn record_submission(&self) {
        self.submissions_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a submission turned away while another was in flight.
    pub fn record_rejected_busy(&self) {
        self.rejected_busy_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a finished delivery attempt.
    pub fn record_send(&self, duration: Duration, success: bool) {
        if success {
            self.sent_total.fetch_add(1, Ordering::Relaxed);
        } else {
            self.failed_total.fetch_add(1, Ordering::Relaxed);
        }
        self.send_duration_total_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    /// Record an HTTP request with duration.
    pub fn record_http_request(&self, duration: Duration) {
        self.http_requests_total.fetch_add(1, Ordering::Relaxed);
        self.http_duration_total_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    /// Record an HTTP error.
    pub fn record_http_error(&self) {
        self.http_errors_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn submissions_total(&self) -> u64 {
        self.submissions_total.load(Ordering::Relaxed)
    }

    pub fn rejected_busy_total(&self) -> u64 {
        self.rejected_busy_total.load(Ordering::Relaxed)
    }

    pub fn sent_total(&self) -> u64 {
        self.sent_total.load(Ordering::Relaxed)
    }

    pub fn failed_total(&self) -> u64 {
        self.failed_total.load(Ordering::Relaxed)
    }

    pub fn http_requests_total(&self) -> u64 {
        self.http_requests_total.load(Ordering::Relaxed)
    }

    pub fn http_errors_total(&self) -> u64 {
        self.http_errors_total.load(Ordering::Relaxed)
    }

    /// Get average delivery attempt duration in milliseconds.
    pub fn send_duration_avg_ms(&self) -> f64 {
        let total = self.send_duration_total_ms.load(Ordering::Relaxed);
        let count = self.sent_total() + self.failed_total();
        if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        }
    }

    /// Get average email API request duration in milliseconds.
    pub fn http_duration_avg_ms(&self) -> f64 {
        let total = self.http_duration_total_ms.load(Ordering::Relaxed);
        let count = self.http_requests_total();
        if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        }
    }

    /// Get a summary of all metrics.
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            submissions_total: self.submissions_total(),
            rejected_busy_total: self.rejected_busy_total(),
            sent_total: self.sent_total(),
            failed_total: self.failed_total(),
            send_duration_avg_ms: self.send_duration_avg_ms(),
            http_requests_total: self.http_requests_total(),
            http_errors_total: self.http_errors_total(),
            http_duration_avg_ms: self.http_duration_avg_ms(),
        }
    }
}

/// Summary of all metrics.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSummary {
    pub submissions_total: u64,
    pub rejected_busy_total: u64,
    pub sent_total: u64,
    pub failed_total: u64,
    pub send_duration_avg_ms: f64,
    pub http_requests_total: u64,
    pub http_errors_total: u64,
    pub http_duration_avg_ms: f64,
}

/// Helper for timing a delivery attempt.
pub struct SendTimer {
    start: Instant,
    metrics: SubmissionMetrics,
}

impl SendTimer {
    /// Start timing a delivery attempt.
    pub fn new(metrics: SubmissionMetrics) -> Self {
        Self {
            start: Instant::now(),
            metrics,
        }
    }

    /// Complete the timing and record the result.
    pub fn complete(self, success: bool) -> Duration {
        let duration = self.start.elapsed();
        self.metrics.record_send(duration, success);
        duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_metrics_creation() {
        let metrics = SubmissionMetrics::new();
        assert_eq!(metrics.submissions_total(), 0);
        assert_eq!(metrics.sent_total(), 0);
        assert_eq!(metrics.send_duration_avg_ms(), 0.0);
    }

    #[test]
    fn test_record_send() {
        let metrics = SubmissionMetrics::new();
        metrics.record_send(Duration::from_millis(100), true);
        metrics.record_send(Duration::from_millis(200), false);

        assert_eq!(metrics.sent_total(), 1);
        assert_eq!(metrics.failed_total(), 1);
        assert_eq!(metrics.send_duration_avg_ms(), 150.0);
    }

    #[test]
    fn test_http_duration_in_summary() {
        let metrics = SubmissionMetrics::new();
        metrics.record_http_request(Duration::from_millis(40));
        metrics.record_http_request(Duration::from_millis(60));
        metrics.record_http_error();

        let summary = metrics.summary();
        assert_eq!(summary.http_requests_total, 2);
        assert_eq!(summary.http_errors_total, 1);
        assert_eq!(summary.http_duration_avg_ms, 50.0);
    }

    #[test]
    fn test_send_timer() {
        let metrics = SubmissionMetrics::new();
        let timer = SendTimer::new(metrics.clone());
        thread::sleep(Duration::from_millis(10));
        let elapsed = timer.complete(true);

        assert_eq!(metrics.sent_total(), 1);
        assert!(elapsed >= Duration::from_millis(10));
    }

    #[test]
    fn test_clones_share_counters() {
        let metrics = SubmissionMetrics::new();
        let other = metrics.clone();

        let handle = thread::spawn(move || {
            for _ in 0..100 {
                other.record_submission();
            }
        });
        for _ in 0..100 {
            metrics.record_submission();
        }
        handle.join().unwrap();

        assert_eq!(metrics.submissions_total(), 200);
    }
}
