//! # User Records
//!
//! The stored user model, its public projections and the fixture seed.

use serde::{Deserialize, Serialize};

/// Numeric user identifier
pub type UserId = u64;

/// Stored user record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique, never reused
    pub id: UserId,

    /// Unique username (case-sensitive)
    pub username: String,

    /// Unique email address (case-sensitive)
    pub email: String,

    /// Stored as given; never serialized
    #[serde(skip_serializing)]
    pub password: String,
}

impl User {
    /// Public projection without the password
    pub fn view(&self) -> UserView {
        UserView {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
        }
    }

    /// Whether username or email contains `needle` (already lowercased)
    pub(crate) fn matches_keyword(&self, needle: &str) -> bool {
        self.username.to_lowercase().contains(needle) || self.email.to_lowercase().contains(needle)
    }
}

/// Public view of a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserView {
    pub id: UserId,
    pub username: String,
    pub email: String,
}

/// Narrow view returned right after creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedUser {
    pub id: UserId,
    pub username: String,
}

/// One page of a (possibly filtered) listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPage {
    /// Number of matching records before pagination
    pub total: usize,

    /// Records on this page, ascending by id
    #[serde(rename = "list")]
    pub items: Vec<UserView>,
}

/// Listing parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// 1-based page number
    pub page: u64,
    pub size: u64,
    pub keyword: Option<String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            size: 10,
            keyword: None,
        }
    }
}

impl ListQuery {
    pub fn new(page: u64, size: u64) -> Self {
        Self {
            page,
            size,
            keyword: None,
        }
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }
}

/// The fixture records loaded at startup and on reset
pub fn default_seed() -> Vec<User> {
    [
        (1, "test", "t@x.com", "123456"),
        (2, "john_doe", "john@example.com", "password123"),
        (3, "jane_smith", "jane@example.com", "securepass"),
        (4, "admin", "admin@company.com", "admin123"),
        (5, "demo_user", "demo@test.com", "demo123"),
    ]
    .into_iter()
    .map(|(id, username, email, password)| User {
        id,
        username: username.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    })
    .collect()
}
