//! # Input Validation
//!
//! Field checks applied before a record is inserted or mutated.

use std::sync::OnceLock;

use regex::Regex;

use super::errors::{DirectoryError, DirectoryResult};

/// Minimum password length accepted by the directory
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Password requirements configuration
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    pub min_length: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: MIN_PASSWORD_LENGTH,
        }
    }
}

impl PasswordPolicy {
    /// Validate a non-blank password against this policy
    pub fn validate(&self, password: &str) -> DirectoryResult<()> {
        if password.chars().count() < self.min_length {
            return Err(DirectoryError::PasswordTooShort(self.min_length));
        }
        Ok(())
    }
}

/// Blank means empty or whitespace-only
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)+$")
            .expect("email pattern must compile")
    })
}

/// Check that `email` is syntactically a valid address
pub fn validate_email(email: &str) -> DirectoryResult<()> {
    if email_pattern().is_match(email) {
        Ok(())
    } else {
        Err(DirectoryError::InvalidEmail)
    }
}
