//! # Directory Module
//!
//! In-memory user directory: records, validation, uniqueness checks and
//! paginated search. The HTTP layer calls into [`DirectoryEngine`] and maps
//! [`DirectoryError`] kinds to status codes.

pub mod engine;
pub mod errors;
pub mod user;
pub mod validation;

pub use engine::DirectoryEngine;
pub use errors::{DirectoryError, DirectoryResult, ErrorKind};
pub use user::{default_seed, CreatedUser, ListQuery, User, UserId, UserPage, UserView};
pub use validation::{PasswordPolicy, MIN_PASSWORD_LENGTH};
