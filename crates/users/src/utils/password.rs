//! Password hashing and verification utilities.

#[cfg(test)]
use argon2::password_hash::{PasswordHash, PasswordVerifier};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};

use crate::types::UserError;

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> Result<String, UserError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| UserError::PasswordHashingFailed)?
        .to_string();

    Ok(password_hash)
}

/// Verify a password against its hash
#[cfg(test)]
pub(crate) fn verify_password(password: &str, hash: &str) -> Result<bool, UserError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| UserError::PasswordHashingFailed)?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
