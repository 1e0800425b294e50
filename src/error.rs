//! Application error type shared by every layer.
//!
//! Each variant is one stable, machine-readable error kind. Handlers return
//! [`AppError`] directly; the [`IntoResponse`] impl picks the HTTP status and
//! renders the JSON error body.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

/// Name of the unique constraint guarding `short_links.short_code`.
pub const SHORT_CODE_CONSTRAINT: &str = "short_links_short_code_key";

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Serializable error payload: stable code, human message, structured details.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    InvalidUrl { message: String, details: Value },

    #[error("{message}")]
    InvalidValidity { message: String, details: Value },

    #[error("{message}")]
    InvalidCodeFormat { message: String, details: Value },

    #[error("{message}")]
    InvalidRequest { message: String, details: Value },

    #[error("{message}")]
    CodeConflict { message: String, details: Value },

    #[error("{message}")]
    CodeGenerationExhausted { message: String, details: Value },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    #[error("{message}")]
    Expired { message: String, details: Value },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn invalid_url(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidUrl {
            message: message.into(),
            details,
        }
    }
    pub fn invalid_validity(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidValidity {
            message: message.into(),
            details,
        }
    }
    pub fn invalid_code_format(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidCodeFormat {
            message: message.into(),
            details,
        }
    }
    pub fn invalid_request(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidRequest {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::CodeConflict {
            message: message.into(),
            details,
        }
    }
    pub fn exhausted(message: impl Into<String>, details: Value) -> Self {
        Self::CodeGenerationExhausted {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn expired(message: impl Into<String>, details: Value) -> Self {
        Self::Expired {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Stable machine-readable kind, used as `error.code` in responses.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidUrl { .. } => "invalid_url",
            AppError::InvalidValidity { .. } => "invalid_validity",
            AppError::InvalidCodeFormat { .. } => "invalid_code_format",
            AppError::InvalidRequest { .. } => "invalid_request",
            AppError::CodeConflict { .. } => "code_conflict",
            AppError::CodeGenerationExhausted { .. } => "code_generation_exhausted",
            AppError::NotFound { .. } => "not_found",
            AppError::Expired { .. } => "expired",
            AppError::Internal { .. } => "internal_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidUrl { .. }
            | AppError::InvalidValidity { .. }
            | AppError::InvalidCodeFormat { .. }
            | AppError::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::CodeConflict { .. } => StatusCode::CONFLICT,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Expired { .. } => StatusCode::GONE,
            AppError::CodeGenerationExhausted { .. } | AppError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Structured details attached to the error.
    pub fn details(&self) -> &Value {
        match self {
            AppError::InvalidUrl { details, .. }
            | AppError::InvalidValidity { details, .. }
            | AppError::InvalidCodeFormat { details, .. }
            | AppError::InvalidRequest { details, .. }
            | AppError::CodeConflict { details, .. }
            | AppError::CodeGenerationExhausted { details, .. }
            | AppError::NotFound { details, .. }
            | AppError::Expired { details, .. }
            | AppError::Internal { details, .. } => details,
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        ErrorInfo {
            code: self.code(),
            message: self.to_string(),
            details: self.details().clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(code = self.code(), details = %self.details(), "{}", self);
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
            && db.constraint() == Some(SHORT_CODE_CONSTRAINT)
        {
            return AppError::conflict(
                "Shortcode already in use",
                json!({ "constraint": SHORT_CODE_CONSTRAINT }),
            );
        }

        tracing::error!("Database error: {}", e);
        AppError::internal("Database error", json!({}))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::invalid_url("x", json!({})), StatusCode::BAD_REQUEST),
            (AppError::invalid_validity("x", json!({})), StatusCode::BAD_REQUEST),
            (AppError::invalid_code_format("x", json!({})), StatusCode::BAD_REQUEST),
            (AppError::invalid_request("x", json!({})), StatusCode::BAD_REQUEST),
            (AppError::conflict("x", json!({})), StatusCode::CONFLICT),
            (AppError::not_found("x", json!({})), StatusCode::NOT_FOUND),
            (AppError::expired("x", json!({})), StatusCode::GONE),
            (
                AppError::exhausted("x", json!({})),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AppError::internal("x", json!({})),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.status(), status, "wrong status for {}", err.code());
        }
    }

    #[test]
    fn test_error_info_carries_code_and_message() {
        let err = AppError::invalid_validity(
            "The validity you have entered is not a number",
            json!({ "reason": "not_a_number" }),
        );

        let info = err.to_error_info();
        assert_eq!(info.code, "invalid_validity");
        assert_eq!(info.message, "The validity you have entered is not a number");
        assert_eq!(info.details["reason"], "not_a_number");
    }

    #[test]
    fn test_display_uses_message() {
        let err = AppError::not_found("Short URL not found", json!({ "code": "abcd" }));
        assert_eq!(err.to_string(), "Short URL not found");
    }

    #[test]
    fn test_non_database_sqlx_error_maps_to_internal() {
        let err: AppError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_into_response_status() {
        let response = AppError::expired("Short URL has expired", json!({})).into_response();
        assert_eq!(response.status(), StatusCode::GONE);
    }
}
