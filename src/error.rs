// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::database::StoreError;

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),
    /// Bad request caused by a lower-level failure (e.g. a decode error)
    BadRequestWithCause { message: String, cause: String },

    // 401 Unauthorized
    Unauthorized(String),

    // 403 Forbidden
    Forbidden(String),

    // 404 Not Found
    NotFound(String),

    // 500 Internal Server Error
    InternalServerError(String),

    // 503 Service Unavailable
    ServiceUnavailable(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::BadRequestWithCause { .. } => 400,
            ApiError::Unauthorized(_) => 401,
            ApiError::Forbidden(_) => 403,
            ApiError::NotFound(_) => 404,
            ApiError::InternalServerError(_) => 500,
            ApiError::ServiceUnavailable(_) => 503,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::BadRequestWithCause { message, .. } => message,
            ApiError::Unauthorized(msg) => msg,
            ApiError::Forbidden(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::InternalServerError(msg) => msg,
            ApiError::ServiceUnavailable(msg) => msg,
        }
    }

    pub fn cause(&self) -> Option<&str> {
        match self {
            ApiError::BadRequestWithCause { cause, .. } => Some(cause),
            _ => None,
        }
    }

    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::BadRequestWithCause { .. } => "BAD_REQUEST",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::Forbidden(_) => "FORBIDDEN",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
            ApiError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        let mut response = json!({
            "success": false,
            "error": self.message(),
            "code": self.error_code()
        });

        if let Some(cause) = self.cause() {
            response["cause"] = json!(cause);
        }

        response
    }
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    /// Wrap an underlying error as the cause of a 400 response
    pub fn bad_request_caused_by(message: impl Into<String>, cause: impl std::error::Error) -> Self {
        ApiError::BadRequestWithCause {
            message: message.into(),
            cause: cause.to_string(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        ApiError::ServiceUnavailable(message.into())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(msg) => ApiError::not_found(msg),
            StoreError::Forbidden(msg) => ApiError::forbidden(msg),
            StoreError::ConfigMissing(name) => {
                tracing::error!("Storage misconfigured, missing {}", name);
                ApiError::service_unavailable("Game storage temporarily unavailable")
            }
            StoreError::InvalidTable(name) => {
                tracing::error!("Storage misconfigured, invalid table name {:?}", name);
                ApiError::service_unavailable("Game storage temporarily unavailable")
            }
            StoreError::Sqlx(sqlx_err) => {
                // Log the real error but return generic message
                tracing::error!("SQLx error: {}", sqlx_err);
                ApiError::internal_server_error("Database error occurred")
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.cause() {
            Some(cause) => write!(f, "{}: {}", self.message(), cause),
            None => write!(f, "{}", self.message()),
        }
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_not_found_keeps_status_and_message() {
        let err: ApiError = StoreError::NotFound("Invalid request: game not found".to_string()).into();
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.message(), "Invalid request: game not found");
    }

    #[test]
    fn store_forbidden_maps_to_403() {
        let err: ApiError = StoreError::Forbidden("not yours".to_string()).into();
        assert_eq!(err.status_code(), 403);
        assert_eq!(err.error_code(), "FORBIDDEN");
    }

    #[test]
    fn sqlx_errors_are_not_exposed() {
        let err: ApiError = StoreError::Sqlx(sqlx::Error::PoolTimedOut).into();
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.message(), "Database error occurred");
    }

    #[test]
    fn store_status_is_preserved() {
        let errors = vec![
            StoreError::NotFound("gone".to_string()),
            StoreError::Forbidden("nope".to_string()),
            StoreError::ConfigMissing("DATABASE_URL"),
            StoreError::InvalidTable("bad-name".to_string()),
            StoreError::Sqlx(sqlx::Error::RowNotFound),
        ];

        for err in errors {
            let status = err.status_code();
            assert_eq!(ApiError::from(err).status_code(), status);
        }
    }

    #[test]
    fn cause_is_rendered_in_json() {
        let decode = base64::DecodeError::InvalidByte(3, b'!');
        let err = ApiError::bad_request_caused_by("Invalid request: id is not base64 encoded", decode);

        let body = err.to_json();
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "BAD_REQUEST");
        assert_eq!(body["error"], "Invalid request: id is not base64 encoded");
        assert!(body["cause"].as_str().unwrap().contains("Invalid symbol"));
    }

    #[test]
    fn plain_errors_have_no_cause() {
        let body = ApiError::bad_request("Invalid request: id is required").to_json();
        assert!(body.get("cause").is_none());
    }
}
