/// Error types for Post Service
///
/// Every service operation returns [`AppError`]; handlers propagate it
/// unmodified and actix-web maps it to a status code through [`ResponseError`].
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use thiserror::Error;

/// Result type for post-service operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Request payload failed validation
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// Resource not found
    #[error("{0}")]
    NotFound(String),

    /// Acting user may not touch the resource
    #[error("{0}")]
    Unauthorized(String),

    /// Bad request
    #[error("{0}")]
    BadRequest(String),

    /// Conflict (duplicate resource, etc.)
    #[error("{0}")]
    Conflict(String),

    /// Internal server error, including data-consistency faults
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    /// Message exposed to API clients. Database details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Database(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Conflict(_) => StatusCode::CONFLICT,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        if let AppError::Database(err) = self {
            tracing::error!(error = %err, "database operation failed");
        }

        HttpResponse::build(status).json(serde_json::json!({
            "error": self.public_message(),
            "status": status.as_u16(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_variants_to_status_codes() {
        assert_eq!(
            AppError::NotFound("Post not found".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Unauthorized("nope".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Internal("Wrong filters".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Database(sqlx::Error::RowNotFound).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::BadRequest("bad".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn database_errors_are_not_leaked() {
        let err = AppError::Database(sqlx::Error::PoolTimedOut);
        assert_eq!(err.public_message(), "Internal server error");

        let err = AppError::NotFound("Post not found".into());
        assert_eq!(err.public_message(), "Post not found");
    }
}
