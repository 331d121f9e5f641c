//! Input validation for user payloads.
//!
//! Payloads arrive as raw JSON. Only the fields in [`USER_FIELDS`] are accepted;
//! any other key is reported as an error rather than dropped. Every invalid field
//! produces exactly one [`FieldError`] carrying the first rule it broke.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use crate::types::{CreateUserInput, FieldError, UpdateUserInput, UserError};

pub const PASSWORD_MIN_LENGTH: usize = 8;
pub const PASSWORD_MAX_LENGTH: usize = 32;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9_%+-]+(?:\.[A-Za-z0-9_%+-]+)*@(?:[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?\.)+[A-Za-z]{2,}$",
    )
    .expect("email regex is valid")
});

/// A recognized field, the message for non-string values and the format rule
/// applied after the string checks.
struct FieldRule {
    name: &'static str,
    not_a_string: &'static str,
    check: fn(&str) -> Option<String>,
}

const USER_FIELDS: [FieldRule; 3] = [
    FieldRule {
        name: "name",
        not_a_string: "name must be a string",
        check: no_format_rule,
    },
    FieldRule {
        name: "email",
        not_a_string: "email must be an email",
        check: email_format,
    },
    FieldRule {
        name: "password",
        not_a_string: "password must be a string",
        check: password_length,
    },
];

fn no_format_rule(_: &str) -> Option<String> {
    None
}

fn email_format(value: &str) -> Option<String> {
    (!is_valid_email(value)).then(|| "email must be an email".to_string())
}

fn password_length(value: &str) -> Option<String> {
    let length = value.chars().count();
    if length < PASSWORD_MIN_LENGTH {
        Some(format!(
            "password must be longer than or equal to {PASSWORD_MIN_LENGTH} characters"
        ))
    } else if length > PASSWORD_MAX_LENGTH {
        Some(format!(
            "password must be shorter than or equal to {PASSWORD_MAX_LENGTH} characters"
        ))
    } else {
        None
    }
}

/// Validate email format
pub fn is_valid_email(email: &str) -> bool {
    email.len() <= 255 && EMAIL_REGEX.is_match(email)
}

/// Validate a create payload. All three fields are required.
pub fn validate_create(payload: &Value) -> Result<CreateUserInput, Vec<FieldError>> {
    let mut accepted = check_fields(payload, true)?;

    let mut take = |field: &str| accepted.remove(field).unwrap_or_default();
    Ok(CreateUserInput {
        name: take("name"),
        email: take("email"),
        password: take("password"),
    })
}

/// Validate a partial update payload. Absent or `null` fields stay untouched.
pub fn validate_update(payload: &Value) -> Result<UpdateUserInput, Vec<FieldError>> {
    let mut accepted = check_fields(payload, false)?;

    Ok(UpdateUserInput {
        name: accepted.remove("name"),
        email: accepted.remove("email"),
        password: accepted.remove("password"),
    })
}

/// Parse a path identifier; only positive decimal integers are accepted.
pub fn parse_user_id(raw: &str) -> Result<i64, UserError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(UserError::InvalidId(raw.to_string()));
    }

    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(UserError::InvalidId(raw.to_string())),
    }
}

fn check_fields(
    payload: &Value,
    required: bool,
) -> Result<HashMap<&'static str, String>, Vec<FieldError>> {
    let object = as_object(payload)?;

    let mut accepted = HashMap::new();
    let mut errors = Vec::new();

    for rule in &USER_FIELDS {
        match check_field(rule, object.get(rule.name), required) {
            Ok(Some(value)) => {
                accepted.insert(rule.name, value);
            }
            Ok(None) => {}
            Err(error) => errors.push(error),
        }
    }

    for (key, value) in object {
        if !USER_FIELDS.iter().any(|rule| rule.name == key) {
            errors.push(FieldError::new(
                key.clone(),
                format!("property {key} should not exist"),
                value.clone(),
            ));
        }
    }

    if errors.is_empty() {
        Ok(accepted)
    } else {
        Err(errors)
    }
}

fn check_field(
    rule: &FieldRule,
    value: Option<&Value>,
    required: bool,
) -> Result<Option<String>, FieldError> {
    let name = rule.name;
    let fail = |message: String, value: Option<&Value>| {
        FieldError::new(name, message, value.cloned().unwrap_or(Value::Null))
    };

    match value {
        None | Some(Value::Null) if !required => Ok(None),
        None | Some(Value::Null) => Err(fail(format!("{name} should not be empty"), value)),
        Some(Value::String(text)) if text.is_empty() => {
            Err(fail(format!("{name} should not be empty"), value))
        }
        Some(Value::String(text)) => match (rule.check)(text) {
            Some(message) => Err(fail(message, value)),
            None => Ok(Some(text.clone())),
        },
        Some(_) => Err(fail(rule.not_a_string.to_string(), value)),
    }
}

fn as_object(payload: &Value) -> Result<&Map<String, Value>, Vec<FieldError>> {
    payload.as_object().ok_or_else(|| {
        vec![FieldError::new(
            "body",
            "request body must be a JSON object",
            payload.clone(),
        )]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(errors: &[FieldError]) -> Vec<&str> {
        errors.iter().map(|e| e.field.as_str()).collect()
    }

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("test@example.com"));
        assert!(is_valid_email("user.name+tag@domain.co.uk"));

        assert!(!is_valid_email("invalid-email"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("test@"));
        assert!(!is_valid_email("a@b..com"));
        assert!(!is_valid_email("a@.b.com"));
        assert!(!is_valid_email("a..b@x.com"));
        assert!(!is_valid_email(".a@x.com"));
        assert!(!is_valid_email("a@-b.com"));
        assert!(!is_valid_email(&format!("{}@example.com", "a".repeat(256))));
    }

    #[test]
    fn test_valid_create_payload() {
        let input = validate_create(&json!({
            "name": "A",
            "email": "a@x.com",
            "password": "12345678"
        }))
        .unwrap();

        assert_eq!(input.name, "A");
        assert_eq!(input.email, "a@x.com");
        assert_eq!(input.password, "12345678");
    }

    #[test]
    fn test_create_reports_every_missing_field() {
        let errors = validate_create(&json!({ "name": "A" })).unwrap_err();

        assert_eq!(fields(&errors), vec!["email", "password"]);
        assert_eq!(errors[0].message, "email should not be empty");
        assert_eq!(errors[0].value, Value::Null);
        assert_eq!(errors[1].message, "password should not be empty");
    }

    #[test]
    fn test_create_reports_first_violated_rule_per_field() {
        let errors = validate_create(&json!({
            "name": "",
            "email": "not-an-email",
            "password": 1234
        }))
        .unwrap_err();

        assert_eq!(fields(&errors), vec!["name", "email", "password"]);
        assert_eq!(errors[0].message, "name should not be empty");
        assert_eq!(errors[1].message, "email must be an email");
        assert_eq!(errors[1].value, json!("not-an-email"));
        assert_eq!(errors[2].message, "password must be a string");
        assert_eq!(errors[2].value, json!(1234));
    }

    #[test]
    fn test_non_string_values_report_the_field_rule() {
        let errors = validate_create(&json!({
            "name": 7,
            "email": 42,
            "password": true
        }))
        .unwrap_err();

        assert_eq!(errors[0].message, "name must be a string");
        assert_eq!(errors[1].message, "email must be an email");
        assert_eq!(errors[1].value, json!(42));
        assert_eq!(errors[2].message, "password must be a string");
    }

    #[test]
    fn test_password_length_bounds() {
        let with_password = |password: &str| {
            validate_create(&json!({
                "name": "A",
                "email": "a@x.com",
                "password": password
            }))
        };

        assert!(with_password(&"x".repeat(8)).is_ok());
        assert!(with_password(&"x".repeat(32)).is_ok());

        let short = with_password("1234567").unwrap_err();
        assert_eq!(
            short[0].message,
            "password must be longer than or equal to 8 characters"
        );

        let long = with_password(&"x".repeat(33)).unwrap_err();
        assert_eq!(
            long[0].message,
            "password must be shorter than or equal to 32 characters"
        );
    }

    #[test]
    fn test_password_length_counts_characters() {
        let input = validate_create(&json!({
            "name": "A",
            "email": "a@x.com",
            "password": "密码密码密码密码"
        }));
        assert!(input.is_ok());
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let errors = validate_create(&json!({
            "name": "A",
            "email": "a@x.com",
            "password": "12345678",
            "role": "admin"
        }))
        .unwrap_err();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "role");
        assert_eq!(errors[0].message, "property role should not exist");
        assert_eq!(errors[0].value, json!("admin"));
    }

    #[test]
    fn test_non_object_body_is_rejected() {
        let errors = validate_create(&json!(["name"])).unwrap_err();
        assert_eq!(fields(&errors), vec!["body"]);

        let errors = validate_update(&Value::Null).unwrap_err();
        assert_eq!(fields(&errors), vec!["body"]);
    }

    #[test]
    fn test_update_accepts_partial_payloads() {
        let input = validate_update(&json!({ "name": "B" })).unwrap();
        assert_eq!(input.name.as_deref(), Some("B"));
        assert!(input.email.is_none());
        assert!(input.password.is_none());

        let empty = validate_update(&json!({})).unwrap();
        assert!(empty.is_empty());

        let nulls = validate_update(&json!({ "email": null })).unwrap();
        assert!(nulls.is_empty());
    }

    #[test]
    fn test_update_applies_the_same_rules() {
        let errors = validate_update(&json!({
            "email": "nope",
            "password": "short",
            "id": 5
        }))
        .unwrap_err();

        assert_eq!(fields(&errors), vec!["email", "password", "id"]);
    }

    #[test]
    fn test_parse_user_id() {
        assert_eq!(parse_user_id("1").unwrap(), 1);
        assert_eq!(parse_user_id("99999").unwrap(), 99999);

        for raw in ["abc", "", "0", "-1", "+5", "1.5", " 7", "99999999999999999999"] {
            assert!(
                matches!(parse_user_id(raw), Err(UserError::InvalidId(_))),
                "{raw:?} should be rejected"
            );
        }
    }
}
