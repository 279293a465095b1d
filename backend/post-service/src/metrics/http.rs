use lazy_static::lazy_static;
use prometheus::{register_histogram_vec, register_int_counter_vec, HistogramVec, IntCounterVec};

lazy_static! {
    /// HTTP requests served, by method and status code.
    pub static ref HTTP_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "http_requests_total",
        "HTTP requests segmented by method and status",
        &["method", "status"]
    )
    .expect("failed to register http_requests_total");

    /// HTTP request latency by method.
    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "http_request_duration_seconds",
        "HTTP request duration segmented by method",
        &["method"]
    )
    .expect("failed to register http_request_duration_seconds");
}
