//! Internal utilities for the user management system.

pub mod password;
pub mod validation;

pub use password::*;
pub use validation::*;
