//! Shared types for the user management system.

pub mod errors;
pub mod requests;

pub use errors::{FieldError, UserError, UserResult};
pub use requests::{CreateUserInput, UpdateUserInput};

pub type UserId = i64;
