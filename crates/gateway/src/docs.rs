//! OpenAPI description of the HTTP surface.
//!
//! The envelope types below exist for documentation only; handlers build
//! their bodies through [`crate::envelope`].

use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

use crate::rest::{CreateUserRequest, HealthResponse, UpdateUserRequest, UserResponse};

/// Success body carrying one user.
#[derive(Serialize, ToSchema)]
pub struct UserEnvelope {
    #[schema(example = 200)]
    pub code: u16,
    #[schema(example = "success")]
    pub message: String,
    pub data: UserResponse,
}

/// Success body carrying every user.
#[derive(Serialize, ToSchema)]
pub struct UserListEnvelope {
    #[schema(example = 200)]
    pub code: u16,
    #[schema(example = "success")]
    pub message: String,
    pub data: Vec<UserResponse>,
}

#[derive(Serialize, ToSchema)]
pub struct HealthEnvelope {
    #[schema(example = 200)]
    pub code: u16,
    #[schema(example = "success")]
    pub message: String,
    pub data: HealthResponse,
}

/// Error body. `data` lists field errors for validation failures and is
/// `null` otherwise.
#[derive(Serialize, ToSchema)]
pub struct ErrorEnvelope {
    #[schema(example = 400)]
    pub code: u16,
    #[schema(example = "Validation failed")]
    pub message: String,
    pub data: Option<Vec<FieldErrorSchema>>,
}

/// Documented shape of [`roster_users::FieldError`].
#[derive(Serialize, ToSchema)]
pub struct FieldErrorSchema {
    #[schema(example = "email")]
    pub field: String,
    #[schema(example = "email must be an email")]
    pub message: String,
    #[schema(value_type = Object)]
    pub value: serde_json::Value,
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Roster API",
        description = "CRUD endpoints for user records with a uniform response envelope."
    ),
    paths(
        crate::rest::health::health_check,
        crate::rest::users::create_user,
        crate::rest::users::list_users,
        crate::rest::users::get_user,
        crate::rest::users::update_user,
        crate::rest::users::delete_user,
    ),
    components(schemas(
        UserResponse,
        CreateUserRequest,
        UpdateUserRequest,
        HealthResponse,
        UserEnvelope,
        UserListEnvelope,
        HealthEnvelope,
        ErrorEnvelope,
        FieldErrorSchema,
    )),
    tags(
        (name = "users", description = "User records"),
        (name = "health", description = "Liveness probe")
    )
)]
pub struct ApiDoc;

/// The OpenAPI document rendered as pretty JSON.
pub fn openapi_json() -> Result<String, serde_json::Error> {
    ApiDoc::openapi().to_pretty_json()
}

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::openapi::schema::Schema;
    use utoipa::openapi::RefOr;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn openapi_lists_every_user_route() {
        let doc = ApiDoc::openapi();

        assert!(doc.paths.paths.contains_key("/user"));
        assert!(doc.paths.paths.contains_key("/user/{id}"));
        assert!(doc.paths.paths.contains_key("/health"));
    }

    #[test]
    fn user_schema_has_no_password() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let user = schemas.get("UserResponse").expect("UserResponse schema");

        assert_object_schema_has_field(user, "createdAt");
        match user {
            RefOr::T(Schema::Object(obj)) => assert!(!obj.properties.contains_key("password")),
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn envelope_schema_has_code_message_and_data() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error = schemas.get("ErrorEnvelope").expect("ErrorEnvelope schema");

        for field in ["code", "message", "data"] {
            assert_object_schema_has_field(error, field);
        }
    }

    #[test]
    fn openapi_renders_as_json() {
        let json = openapi_json().unwrap();
        assert!(json.contains("\"Roster API\""));
    }
}
