//! Form validation for the auth views
//!
//! Runs before any network call; the messages are shown verbatim.

use regex::Regex;

use crate::domain::result::{Error, Result};

pub const MSG_FILL_ALL_FIELDS: &str = "Please fill in all fields";
pub const MSG_INVALID_EMAIL: &str = "Please enter a valid email address";
pub const MSG_ALL_FIELDS_REQUIRED: &str = "All fields are required";
pub const MSG_PASSWORD_TOO_SHORT: &str = "Password must be at least 6 characters";

/// Minimum password length accepted at registration
pub const MIN_PASSWORD_LEN: usize = 6;

/// Loose `something@something.something` check
pub fn is_valid_email(email: &str) -> bool {
    Regex::new(r"\S+@\S+\.\S+")
        .map(|re| re.is_match(email))
        .unwrap_or(false)
}

pub fn validate_login(email: &str, password: &str) -> Result<()> {
    if email.is_empty() || password.is_empty() {
        return Err(Error::validation(MSG_FILL_ALL_FIELDS));
    }
    if !is_valid_email(email) {
        return Err(Error::validation(MSG_INVALID_EMAIL));
    }
    Ok(())
}

pub fn validate_registration(name: &str, email: &str, password: &str) -> Result<()> {
    if name.is_empty() || email.is_empty() || password.is_empty() {
        return Err(Error::validation(MSG_ALL_FIELDS_REQUIRED));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(Error::validation(MSG_PASSWORD_TOO_SHORT));
    }
    Ok(())
}
