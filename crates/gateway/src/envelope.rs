//! The `{code, message, data}` body shared by every response.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

pub const SUCCESS_MESSAGE: &str = "success";

/// Wire shape of every response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: u16,
    pub message: String,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(status: StatusCode, message: impl Into<String>, data: T) -> Self {
        Self {
            code: status.as_u16(),
            message: message.into(),
            data,
        }
    }

    pub fn success(data: T) -> Self {
        Self::new(StatusCode::OK, SUCCESS_MESSAGE, data)
    }
}

/// Successful handler output.
///
/// The body always carries `code: 200`; only the HTTP status differs for
/// [`Envelope::created`].
#[derive(Debug)]
pub struct Envelope<T> {
    status: StatusCode,
    data: T,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            status: StatusCode::OK,
            data,
        }
    }

    pub fn created(data: T) -> Self {
        Self {
            status: StatusCode::CREATED,
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        (self.status, Json(ApiResponse::success(self.data))).into_response()
    }
}
