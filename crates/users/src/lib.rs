//! # Roster Users Crate
//!
//! Validation and data access for the Roster user records.
//!
//! ## Architecture
//!
//! - **Types**: validated inputs, field errors and [`UserError`]
//! - **Utils**: payload validation and password hashing
//! - **Services**: [`UserService`] over the [`UserRepo`] storage seam
//!
//! ## Usage
//!
//! ```rust,no_run
//! # async fn demo(pool: roster_users::SqlitePool) -> roster_users::UserResult<()> {
//! use roster_users::{validate_create, UserService};
//!
//! let service = UserService::new(pool);
//! let input = validate_create(&serde_json::json!({
//!     "name": "Ada",
//!     "email": "ada@example.com",
//!     "password": "correct-horse"
//! }))?;
//! let user = service.create_user(input).await?;
//! # let _ = user;
//! # Ok(())
//! # }
//! ```

pub mod services;
pub mod types;
pub mod utils;

pub use roster_database::{SqlitePool, User, UserRepository};

pub use services::{MemoryUserRepository, UserRepo, UserService};
pub use types::{CreateUserInput, FieldError, UpdateUserInput, UserError, UserId, UserResult};
pub use utils::{parse_user_id, validate_create, validate_update};
