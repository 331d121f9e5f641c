//! Request extractors that reject with the gateway envelope.

use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::{header::CONTENT_TYPE, HeaderMap},
};
use serde_json::{Map, Value};

use crate::error::GatewayError;

/// Raw JSON request body.
///
/// The body is kept as a [`Value`] so the validation layer can report on
/// missing, mistyped and unknown fields itself. An empty body, or a body sent
/// without a JSON content type, is read as an empty object. Malformed JSON is
/// rejected here with the parser's message.
pub struct JsonPayload(pub Value);

#[axum::async_trait]
impl<S> FromRequest<S> for JsonPayload
where
    S: Send + Sync,
{
    type Rejection = GatewayError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = has_json_content_type(req.headers());
        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            rejected(rejection.status(), rejection.body_text())
        })?;

        if !is_json || bytes.is_empty() {
            return Ok(JsonPayload(Value::Object(Map::new())));
        }

        match axum::Json::<Value>::from_bytes(&bytes) {
            Ok(axum::Json(value)) => Ok(JsonPayload(value)),
            Err(rejection) => Err(reject(rejection)),
        }
    }
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };

    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    match essence.strip_prefix("application/") {
        Some(subtype) => subtype == "json" || subtype.ends_with("+json"),
        None => false,
    }
}

fn reject(rejection: JsonRejection) -> GatewayError {
    let status = rejection.status();
    let message = match rejection {
        JsonRejection::JsonSyntaxError(error) => error.body_text(),
        JsonRejection::JsonDataError(error) => error.body_text(),
        other => {
            tracing::warn!(error = ?other, "unhandled JSON rejection");
            other.body_text()
        }
    };

    rejected(status, message)
}

fn rejected(status: axum::http::StatusCode, message: String) -> GatewayError {
    if status.is_server_error() {
        return GatewayError::InternalError(message);
    }

    GatewayError::Rejected { status, message }
}
