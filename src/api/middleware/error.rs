use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

/// Tagged failure surface of every core operation. No raw store error
/// crosses this boundary; the presentation layer decides how each tag is
/// rendered.
#[derive(Debug)]
pub enum ApiError {
    /// Malformed input, caught before any store round trip.
    Validation(String),
    Unauthorized,
    /// An authenticated actor touched a slot or appointment they do not
    /// own. Correctly gated UI never produces this.
    NotOwner(String),
    NotFound(String),
    /// The target slot or interval is no longer available; the caller
    /// refreshes availability and asks the visitor to pick another time.
    Conflict(String),
    /// Any other store failure. Retry is user-initiated, never automatic.
    Store(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Validation(msg) => write!(f, "Validation failed: {}", msg),
            ApiError::Unauthorized => write!(f, "Unauthorized"),
            ApiError::NotOwner(msg) => write!(f, "Not owner: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::Store(msg) => write!(f, "Store error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            ApiError::NotOwner(_) => (StatusCode::FORBIDDEN, "Permission denied".to_string()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Store(msg) => {
                tracing::error!("Store error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong, please try again".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// Convert from sqlx errors
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".to_string()),
            sqlx::Error::Database(db_err) => {
                // A unique violation on (slot, interval) means a racing
                // booking won; surface it as a conflict, not a store bug.
                let message = db_err.message();
                if message.contains("UNIQUE") || message.contains("unique") {
                    ApiError::Conflict("The selected time is no longer available".to_string())
                } else {
                    ApiError::Store(format!("Database error: {}", message))
                }
            }
            _ => ApiError::Store("Internal server error".to_string()),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
