use crate::error::{AppError, Result};
use lazy_static::lazy_static;
use prometheus::{register_int_counter_vec, IntCounterVec};

lazy_static! {
    /// Post service operations segmented by operation and outcome (ok / error kind).
    pub static ref POST_OPERATIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "post_operations_total",
        "Post service operations segmented by operation and outcome",
        &["operation", "outcome"]
    )
    .expect("failed to register post_operations_total");

    /// Accepted votes segmented by result (upvoted, downvoted, vote reset).
    pub static ref POST_VOTES_TOTAL: IntCounterVec = register_int_counter_vec!(
        "post_votes_total",
        "Accepted votes segmented by result",
        &["result"]
    )
    .expect("failed to register post_votes_total");
}

pub fn record_operation<T>(operation: &str, result: &Result<T>) {
    let outcome = match result {
        Ok(_) => "ok",
        Err(AppError::NotFound(_)) => "not_found",
        Err(AppError::Unauthorized(_)) => "unauthorized",
        Err(AppError::BadRequest(_))
        | Err(AppError::Validation(_)) => "bad_request",
        Err(_) => "error",
    };
    POST_OPERATIONS_TOTAL
        .with_label_values(&[operation, outcome])
        .inc();
}

pub fn record_vote(result: &str) {
    POST_VOTES_TOTAL.with_label_values(&[result]).inc();
}
