//! User REST endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};
use roster_users::{parse_user_id, validate_create, validate_update, User};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::envelope::Envelope;
use crate::error::GatewayResult;
use crate::extract::JsonPayload;
use crate::state::GatewayState;

/// User as returned by the API. There is no password field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Body accepted by `POST /user`. Any other key is rejected.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    /// 8 to 32 characters
    pub password: String,
}

/// Body accepted by `PATCH /user/{id}`. Omitted or `null` fields are left as is.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    /// 8 to 32 characters
    pub password: Option<String>,
}

/// Create user routes
pub fn create_user_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route("/user", get(list_users).post(create_user))
        .route(
            "/user/:id",
            get(get_user).patch(update_user).delete(delete_user),
        )
}

#[utoipa::path(
    post,
    path = "/user",
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = crate::docs::UserEnvelope),
        (status = 400, description = "Validation failed", body = crate::docs::ErrorEnvelope),
        (status = 500, description = "Duplicate email or storage failure", body = crate::docs::ErrorEnvelope)
    )
)]
pub async fn create_user(
    State(state): State<Arc<GatewayState>>,
    JsonPayload(payload): JsonPayload,
) -> GatewayResult<Envelope<UserResponse>> {
    let input = validate_create(&payload)?;

    let user = state.user_service.create_user(input).await?;

    Ok(Envelope::created(user.into()))
}

#[utoipa::path(
    get,
    path = "/user",
    tag = "users",
    responses(
        (status = 200, description = "Every user ordered by id", body = crate::docs::UserListEnvelope),
        (status = 500, description = "Internal server error", body = crate::docs::ErrorEnvelope)
    )
)]
pub async fn list_users(
    State(state): State<Arc<GatewayState>>,
) -> GatewayResult<Envelope<Vec<UserResponse>>> {
    let users = state.user_service.list_users().await?;

    Ok(Envelope::ok(users.into_iter().map(UserResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/user/{id}",
    tag = "users",
    params(
        ("id" = i64, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "User details", body = crate::docs::UserEnvelope),
        (status = 400, description = "Id is not a positive integer", body = crate::docs::ErrorEnvelope),
        (status = 404, description = "User not found", body = crate::docs::ErrorEnvelope)
    )
)]
pub async fn get_user(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<String>,
) -> GatewayResult<Envelope<UserResponse>> {
    let id = parse_user_id(&id)?;

    let user = state.user_service.get_user(id).await?;

    Ok(Envelope::ok(user.into()))
}

#[utoipa::path(
    patch,
    path = "/user/{id}",
    tag = "users",
    params(
        ("id" = i64, Path, description = "User id")
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated user", body = crate::docs::UserEnvelope),
        (status = 400, description = "Validation failed", body = crate::docs::ErrorEnvelope),
        (status = 404, description = "User not found", body = crate::docs::ErrorEnvelope)
    )
)]
pub async fn update_user(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<String>,
    JsonPayload(payload): JsonPayload,
) -> GatewayResult<Envelope<UserResponse>> {
    let id = parse_user_id(&id)?;
    let input = validate_update(&payload)?;

    let user = state.user_service.update_user(id, input).await?;

    Ok(Envelope::ok(user.into()))
}

#[utoipa::path(
    delete,
    path = "/user/{id}",
    tag = "users",
    params(
        ("id" = i64, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "The user as it was before deletion", body = crate::docs::UserEnvelope),
        (status = 400, description = "Id is not a positive integer", body = crate::docs::ErrorEnvelope),
        (status = 404, description = "User not found", body = crate::docs::ErrorEnvelope)
    )
)]
pub async fn delete_user(
    State(state): State<Arc<GatewayState>>,
    Path(id): Path<String>,
) -> GatewayResult<Envelope<UserResponse>> {
    let id = parse_user_id(&id)?;

    let user = state.user_service.delete_user(id).await?;

    Ok(Envelope::ok(user.into()))
}
