//! Metrics and observability utilities
//!
//! Provides Prometheus metrics with latency histograms
//! and standardized naming conventions.

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram, Unit};
use std::time::Instant;

/// Metrics prefix for all Adelante metrics
pub const METRICS_PREFIX: &str = "adelante";

/// Histogram buckets for request latency (in seconds)
pub const LATENCY_BUCKETS: &[f64] = &[
    0.001,  // 1ms
    0.005,  // 5ms
    0.010,  // 10ms
    0.025,  // 25ms
    0.050,  // 50ms
    0.100,  // 100ms
    0.250,  // 250ms
    0.500,  // 500ms
    1.000,  // 1s
    2.500,  // 2.5s
    5.000,  // 5s
    10.00,  // 10s
];

/// Buckets for generation latency (typically slower)
pub const GENERATION_BUCKETS: &[f64] = &[
    0.100,  // 100ms
    0.250,  // 250ms
    0.500,  // 500ms
    1.000,  // 1s
    2.000,  // 2s
    5.000,  // 5s
    10.00,  // 10s
    30.00,  // 30s
];

/// Register all metric descriptions
pub fn register_metrics() {
    // Request metrics
    describe_counter!(
        format!("{}_requests_total", METRICS_PREFIX),
        Unit::Count,
        "Total number of HTTP requests"
    );

    describe_histogram!(
        format!("{}_request_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "HTTP request latency in seconds"
    );

    // Catalog query metrics
    describe_counter!(
        format!("{}_catalog_queries_total", METRICS_PREFIX),
        Unit::Count,
        "Total number of catalog queries"
    );

    describe_histogram!(
        format!("{}_catalog_query_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "Catalog query latency in seconds"
    );

    describe_gauge!(
        format!("{}_catalog_results_count", METRICS_PREFIX),
        Unit::Count,
        "Number of records returned from a catalog query"
    );

    // Study-assistant metrics
    describe_counter!(
        format!("{}_generation_requests_total", METRICS_PREFIX),
        Unit::Count,
        "Total text generation API requests"
    );

    describe_histogram!(
        format!("{}_generation_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "Text generation latency in seconds"
    );

    describe_counter!(
        format!("{}_generation_errors_total", METRICS_PREFIX),
        Unit::Count,
        "Total text generation API errors"
    );

    // Session metrics
    describe_counter!(
        format!("{}_sign_ins_total", METRICS_PREFIX),
        Unit::Count,
        "Total successful sign-ins"
    );

    tracing::info!("Metrics registered");
}

/// Helper to record request metrics
pub struct RequestMetrics {
    start: Instant,
    endpoint: String,
    method: String,
}

impl RequestMetrics {
    /// Start tracking a request
    pub fn start(method: &str, endpoint: &str) -> Self {
        Self {
            start: Instant::now(),
            endpoint: endpoint.to_string(),
            method: method.to_string(),
        }
    }

    /// Record request completion
    pub fn finish(self, status: u16) {
        let duration = self.start.elapsed().as_secs_f64();

        counter!(
            format!("{}_requests_total", METRICS_PREFIX),
            "method" => self.method.clone(),
            "endpoint" => self.endpoint.clone(),
            "status" => status.to_string()
        )
        .increment(1);

        histogram!(
            format!("{}_request_duration_seconds", METRICS_PREFIX),
            "method" => self.method,
            "endpoint" => self.endpoint
        )
        .record(duration);
    }
}

/// Helper to record catalog query metrics
pub fn record_catalog_query(duration_secs: f64, panel: &str, result_count: usize) {
    counter!(
        format!("{}_catalog_queries_total", METRICS_PREFIX),
        "panel" => panel.to_string()
    )
    .increment(1);

    histogram!(
        format!("{}_catalog_query_duration_seconds", METRICS_PREFIX),
        "panel" => panel.to_string()
    )
    .record(duration_secs);

    gauge!(
        format!("{}_catalog_results_count", METRICS_PREFIX),
        "panel" => panel.to_string()
    )
    .set(result_count as f64);
}

/// Helper to record text generation metrics
pub fn record_generation(duration_secs: f64, operation: &str, success: bool) {
    let status = if success { "success" } else { "error" };

    counter!(
        format!("{}_generation_requests_total", METRICS_PREFIX),
        "operation" => operation.to_string(),
        "status" => status.to_string()
    )
    .increment(1);

    if success {
        histogram!(
            format!("{}_generation_duration_seconds", METRICS_PREFIX),
            "operation" => operation.to_string()
        )
        .record(duration_secs);
    } else {
        counter!(
            format!("{}_generation_errors_total", METRICS_PREFIX),
            "operation" => operation.to_string()
        )
        .increment(1);
    }
}

/// Helper to record a successful sign-in
pub fn record_sign_in(provider: &str) {
    counter!(
        format!("{}_sign_ins_total", METRICS_PREFIX),
        "provider" => provider.to_string()
    )
    .increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latency_buckets_sorted() {
        let mut prev = 0.0;
        for &bucket in LATENCY_BUCKETS {
            assert!(bucket > prev);
            prev = bucket;
        }

        let mut prev = 0.0;
        for &bucket in GENERATION_BUCKETS {
            assert!(bucket > prev);
            prev = bucket;
        }
    }

    #[test]
    fn test_request_metrics() {
        let metrics = RequestMetrics::start("GET", "/v1/resources");
        std::thread::sleep(std::time::Duration::from_millis(10));
        metrics.finish(200);
        // Just verify it runs without panic
    }
}
