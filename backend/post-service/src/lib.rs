/// Post Service Library
///
/// Serves posts for the Noddit forum: single-post lookup with vote sums,
/// filtered listings, a news feed built from follower edges, authoring with
/// ownership checks, and toggle-style up/down voting.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers and route registration
/// - `models`: Rows, request payloads, and response envelopes
/// - `services`: Business logic layer
/// - `db`: Database access layer and the `PostRepository` seam
/// - `middleware`: Acting-user extraction, ownership checks, request metrics
/// - `error`: Error types and handling
/// - `config`: Configuration management
/// - `metrics`: Prometheus collectors
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod openapi;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
