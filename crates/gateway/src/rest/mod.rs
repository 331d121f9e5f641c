//! REST API endpoints for the gateway

pub mod health;
pub mod users;

use std::sync::Arc;

use axum::{
    http::{Method, StatusCode, Uri},
    routing::get,
    Router,
};

use crate::error::GatewayError;
use crate::state::GatewayState;

/// Create all REST API routes
pub fn create_rest_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route("/health", get(health::health_check))
        .merge(users::create_user_routes())
        .fallback(fallback)
}

/// Answer for paths no route matches.
pub async fn fallback(method: Method, uri: Uri) -> GatewayError {
    GatewayError::Rejected {
        status: StatusCode::NOT_FOUND,
        message: format!("Cannot {method} {}", uri.path()),
    }
}

pub use health::HealthResponse;
pub use users::{CreateUserRequest, UpdateUserRequest, UserResponse};
