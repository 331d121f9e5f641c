//! # Roster Gateway Crate
//!
//! HTTP layer of the Roster service: routes the `/user` CRUD endpoints to the
//! user service and guarantees that every response, successful or not, has
//! the `{code, message, data}` shape.
//!
//! ## Architecture
//!
//! - **REST**: user and health endpoints with OpenAPI documentation
//! - **Envelope**: the success wrapper returned by handlers
//! - **Error**: [`GatewayError`], the error wrapper
//! - **Middleware**: error normalization, panic recovery, CORS and logging
//! - **State**: shared pool and services
//!
//! ## Usage
//!
//! ```rust,no_run
//! # async fn run(pool: roster_database::SqlitePool) -> Result<(), Box<dyn std::error::Error>> {
//! use roster_gateway::{create_router, GatewayState};
//!
//! let app = create_router(GatewayState::new(pool));
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

pub mod docs;
pub mod envelope;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod rest;
pub mod state;

// Re-export main types for convenience
pub use docs::{openapi_json, ApiDoc};
pub use envelope::{ApiResponse, Envelope};
pub use error::{GatewayError, GatewayResult};
pub use state::GatewayState;

use std::sync::Arc;

use axum::{middleware as axum_middleware, Router};
use tower_http::catch_panic::CatchPanicLayer;

/// Create the main application router with all routes
pub fn create_router(state: GatewayState) -> Router {
    let routes = rest::create_rest_routes().with_state(Arc::new(state));

    apply_middleware(routes)
}

/// Wrap a router in the response normalization and logging stack.
///
/// Layers run outside-in: tracing, request logging, CORS, error
/// normalization, then panic recovery closest to the handlers.
pub fn apply_middleware(router: Router) -> Router {
    router
        .layer(CatchPanicLayer::custom(middleware::catch_panic))
        .layer(axum_middleware::from_fn(middleware::normalize_errors))
        .layer(middleware::create_cors_middleware())
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        .layer(middleware::create_trace_middleware())
}
