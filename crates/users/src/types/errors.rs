//! Error types for the user management system.

use roster_database::DatabaseError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// One rejected input field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
    pub value: Value,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>, value: Value) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            value,
        }
    }
}

/// User-related errors
#[derive(Debug, Error, Clone)]
pub enum UserError {
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error("Invalid user id: {0:?}")]
    InvalidId(String),

    #[error("User with ID {0} not found")]
    NotFound(i64),

    #[error("Email already exists")]
    EmailAlreadyExists,

    #[error("Password hashing failed")]
    PasswordHashingFailed,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

pub type UserResult<T> = Result<T, UserError>;

impl From<Vec<FieldError>> for UserError {
    fn from(errors: Vec<FieldError>) -> Self {
        UserError::Validation(errors)
    }
}

/// Convert database errors to our error types
impl From<DatabaseError> for UserError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::Duplicate(_) => UserError::EmailAlreadyExists,
            other => UserError::DatabaseError(other.to_string()),
        }
    }
}
