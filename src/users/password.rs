use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use lazy_static::lazy_static;
use rand::rngs::OsRng;
use regex::Regex;
use tracing::error;

lazy_static! {
    static ref HAS_LOWER: Regex = Regex::new(r"[a-z]").unwrap();
    static ref HAS_UPPER: Regex = Regex::new(r"[A-Z]").unwrap();
    static ref HAS_DIGIT: Regex = Regex::new(r"[0-9]").unwrap();
    static ref HAS_SPECIAL: Regex = Regex::new(r"[!@#$%^&]").unwrap();
    static ref HAS_WHITESPACE: Regex = Regex::new(r"\s").unwrap();
}

/// Validate a candidate password against the registration policy.
///
/// Rules are applied in order and the first violation wins. Returns the
/// client-facing message for that violation, or `None` when the password is
/// acceptable.
pub fn check_password(password: &str) -> Option<&'static str> {
    if password.starts_with(' ') || password.ends_with(' ') {
        return Some("Password must not start or end with empty spaces");
    }
    if password.len() < 9 || password.len() > 71 {
        return Some("Password must be more than 8 and less than 72 characters");
    }
    if HAS_WHITESPACE.is_match(password)
        || !HAS_LOWER.is_match(password)
        || !HAS_UPPER.is_match(password)
        || !HAS_DIGIT.is_match(password)
        || !HAS_SPECIAL.is_match(password)
    {
        return Some("Password must contain 1 upper case, lower case, number and special character");
    }
    None
}

/// Hash a plaintext password with a fresh random salt. Two calls with the
/// same input produce different strings.
pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            anyhow::anyhow!(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

/// Check a plaintext password against a stored hash. A malformed hash is an
/// error; a wrong password is `Ok(false)`.
pub fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "argon2 parse hash error");
        anyhow::anyhow!(e.to_string())
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}
