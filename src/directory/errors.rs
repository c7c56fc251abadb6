//! # Directory Errors
//!
//! Error types for the directory engine.

use thiserror::Error;

/// Result type for directory operations
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Broad classification used by the HTTP layer to pick a status code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or missing input
    Validation,
    /// Unknown identifier
    NotFound,
    /// Duplicate username or email
    Conflict,
    /// Unexpected failure
    Internal,
}

/// Directory engine errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryError {
    // ==================
    // Validation Errors
    // ==================

    #[error("Username is required")]
    UsernameRequired,

    #[error("Email is required")]
    EmailRequired,

    #[error("Password is required")]
    PasswordRequired,

    /// Password shorter than the configured minimum
    #[error("Password must be at least {0} characters long")]
    PasswordTooShort(usize),

    #[error("Invalid email address")]
    InvalidEmail,

    // ==================
    // Lookup Errors
    // ==================

    #[error("User not found")]
    UserNotFound,

    // ==================
    // Conflict Errors
    // ==================

    #[error("Username already exists")]
    UsernameExists,

    #[error("Email already exists")]
    EmailExists,

    // ==================
    // Internal Errors
    // ==================

    /// State lock poisoned or similar
    #[error("Storage error: {0}")]
    StorageError(String),
}

impl DirectoryError {
    /// Returns the error classification
    pub fn kind(&self) -> ErrorKind {
        match self {
            DirectoryError::UsernameRequired
            | DirectoryError::EmailRequired
            | DirectoryError::PasswordRequired
            | DirectoryError::PasswordTooShort(_)
            | DirectoryError::InvalidEmail => ErrorKind::Validation,

            DirectoryError::UserNotFound => ErrorKind::NotFound,

            DirectoryError::UsernameExists | DirectoryError::EmailExists => ErrorKind::Conflict,

            DirectoryError::StorageError(_) => ErrorKind::Internal,
        }
    }

    /// Returns the HTTP status code for this error
    ///
    /// Conflicts are reported as 400 to stay compatible with existing clients.
    pub fn status_code(&self) -> u16 {
        match self.kind() {
            ErrorKind::Validation => 400,
            ErrorKind::NotFound => 404,
            ErrorKind::Conflict => 400,
            ErrorKind::Internal => 500,
        }
    }

    /// Returns whether this error was caused by the caller
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }

    pub(crate) fn lock_poisoned() -> Self {
        DirectoryError::StorageError("Lock poisoned".to_string())
    }
}
