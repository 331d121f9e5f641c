//! Business logic services for user records.
//!
//! [`UserService`] coordinates hashing and persistence on top of any
//! [`UserRepo`] implementation.

mod memory_repository;
pub mod user_service;

pub use memory_repository::MemoryUserRepository;
pub use user_service::{UserRepo, UserService};
