//! Validated inputs accepted by the user service.
//!
//! These are only produced by [`crate::utils::validation`], so a value of either
//! type has already passed every field rule.

use std::fmt;

/// Fields for a new user. The password is still in clear text here.
#[derive(Clone, PartialEq, Eq)]
pub struct CreateUserInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Fields to change on an existing user; `None` means untouched.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct UpdateUserInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl UpdateUserInput {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.password.is_none()
    }
}

const REDACTED: &str = "<redacted>";

impl fmt::Debug for CreateUserInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateUserInput")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &REDACTED)
            .finish()
    }
}

impl fmt::Debug for UpdateUserInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateUserInput")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| REDACTED))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_never_contains_the_password() {
        let create = CreateUserInput {
            name: "A".to_string(),
            email: "a@x.com".to_string(),
            password: "hunter2hunter2".to_string(),
        };
        assert!(!format!("{create:?}").contains("hunter2"));

        let update = UpdateUserInput {
            password: Some("hunter2hunter2".to_string()),
            ..Default::default()
        };
        let rendered = format!("{update:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains(REDACTED));
    }

    #[test]
    fn empty_update_is_detected() {
        assert!(UpdateUserInput::default().is_empty());
    }
}
