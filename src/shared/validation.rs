//! Input validation helpers shared by the account and content handlers.

use std::sync::OnceLock;

use regex::Regex;

use crate::shared::error::SharedError;

/// Minimum accepted password length
pub const MIN_PASSWORD_LENGTH: usize = 6;

fn email_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("email regex should compile")
    })
}

/// Check an email address against the standard address pattern.
pub fn validate_email(email: &str) -> Result<(), SharedError> {
    if email_regex().is_match(email) {
        Ok(())
    } else {
        Err(SharedError::validation("email", "Invalid Email Format"))
    }
}

/// Passwords must be at least [`MIN_PASSWORD_LENGTH`] characters.
pub fn validate_password(password: &str) -> Result<(), SharedError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(SharedError::validation(
            "password",
            "Password must be at least 6 characters",
        ));
    }
    Ok(())
}

/// Treat `None` and blank strings the same way.
///
/// Clients send `""` for untouched form fields, so an empty value never
/// overwrites stored data.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
