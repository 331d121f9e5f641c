//! Error types for the gateway layer

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use roster_users::{FieldError, UserError};
use serde_json::Value;
use thiserror::Error;

use crate::envelope::ApiResponse;

pub const VALIDATION_FAILED: &str = "Validation failed";
pub const INVALID_ID: &str = "Validation failed (numeric string is expected)";
pub const INTERNAL_ERROR: &str = "Internal server error";

/// Gateway error types
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error("Invalid id: {0:?}")]
    InvalidId(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl GatewayError {
    /// An error carrying only a status, described by its canonical reason.
    pub fn from_status(status: StatusCode) -> Self {
        if status.is_server_error() {
            return GatewayError::InternalError(status.to_string());
        }

        GatewayError::Rejected {
            status,
            message: status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::Validation(_) | GatewayError::InvalidId(_) => StatusCode::BAD_REQUEST,
            GatewayError::NotFound(_) => StatusCode::NOT_FOUND,
            GatewayError::Rejected { status, .. } => *status,
            GatewayError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message sent to the client; internal details never leave the process.
    pub fn client_message(&self) -> String {
        match self {
            GatewayError::Validation(_) => VALIDATION_FAILED.to_string(),
            GatewayError::InvalidId(_) => INVALID_ID.to_string(),
            GatewayError::InternalError(_) => INTERNAL_ERROR.to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.client_message();

        let data = match self {
            GatewayError::Validation(errors) => {
                serde_json::to_value(errors).unwrap_or(Value::Null)
            }
            GatewayError::InternalError(detail) => {
                tracing::error!(error = %detail, "request failed");
                Value::Null
            }
            _ => Value::Null,
        };

        (status, Json(ApiResponse::new(status, message, data))).into_response()
    }
}

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

impl From<UserError> for GatewayError {
    fn from(error: UserError) -> Self {
        match error {
            UserError::Validation(errors) => GatewayError::Validation(errors),
            UserError::InvalidId(raw) => GatewayError::InvalidId(raw),
            UserError::NotFound(_) => GatewayError::NotFound(error.to_string()),
            UserError::EmailAlreadyExists
            | UserError::PasswordHashingFailed
            | UserError::DatabaseError(_) => GatewayError::InternalError(error.to_string()),
        }
    }
}

impl From<Vec<FieldError>> for GatewayError {
    fn from(errors: Vec<FieldError>) -> Self {
        GatewayError::Validation(errors)
    }
}
