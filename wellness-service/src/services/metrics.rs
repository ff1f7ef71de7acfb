//! Prometheus metrics for wellness-service.

use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec, register_histogram_vec, CounterVec, Encoder, HistogramVec, TextEncoder,
};

/// Cache lookup counter by bucket kind and result.
pub static CACHE_LOOKUPS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "wellness_cache_lookups_total",
        "Total number of cache lookups by result",
        &["kind", "result"] // hit, miss
    )
    .expect("Failed to register cache_lookups_total")
});

/// Completion counter by endpoint and outcome.
pub static COMPLETIONS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "wellness_completions_total",
        "Total number of AI completions by outcome",
        &["endpoint", "outcome"] // ok, error
    )
    .expect("Failed to register completions_total")
});

/// Completion duration histogram by endpoint.
pub static COMPLETION_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "wellness_completion_duration_seconds",
        "AI completion duration in seconds",
        &["endpoint"],
        vec![0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0]
    )
    .expect("Failed to register completion_duration")
});

/// Database query duration histogram.
pub static DB_QUERY_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "wellness_db_query_duration_seconds",
        "Database query duration in seconds",
        &["operation"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0]
    )
    .expect("Failed to register db_query_duration")
});

/// Render all registered metrics in Prometheus text format.
pub fn render_metrics() -> String {
    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return format!("# Failed to encode metrics: {}\n", e);
    }

    String::from_utf8(buffer).unwrap_or_default()
}
