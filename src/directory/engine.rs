//! # Directory Engine
//!
//! Owns the user collection and the id counter.
//!
//! ## Invariants
//! - Usernames and emails are unique across live records (exact match)
//! - Ids are strictly increasing and never reassigned after delete
//! - Every check-then-mutate sequence runs under one write lock

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use super::errors::{DirectoryError, DirectoryResult};
use super::user::{default_seed, CreatedUser, ListQuery, User, UserId, UserPage, UserView};
use super::validation::{is_blank, validate_email, PasswordPolicy};

#[derive(Debug)]
struct DirectoryState {
    users: BTreeMap<UserId, User>,
    next_id: UserId,
}

impl DirectoryState {
    fn from_seed(seed: &[User]) -> Self {
        let users: BTreeMap<_, _> = seed.iter().map(|u| (u.id, u.clone())).collect();
        let next_id = users.keys().next_back().map_or(1, |max| max + 1);
        Self { users, next_id }
    }

    fn username_taken(&self, username: &str) -> bool {
        self.users.values().any(|u| u.username == username)
    }

    fn email_taken_by_other(&self, email: &str, except: Option<UserId>) -> bool {
        self.users
            .values()
            .any(|u| Some(u.id) != except && u.email == email)
    }
}

/// In-memory user directory
#[derive(Debug)]
pub struct DirectoryEngine {
    seed: Vec<User>,
    policy: PasswordPolicy,
    state: RwLock<DirectoryState>,
}

impl Default for DirectoryEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectoryEngine {
    /// Create an engine loaded with the default fixture records
    pub fn new() -> Self {
        Self::with_seed(default_seed())
    }

    /// Create an engine loaded with `seed`
    ///
    /// The counter starts one past the highest seeded id. Seed records are
    /// trusted and not re-validated.
    pub fn with_seed(seed: Vec<User>) -> Self {
        let state = DirectoryState::from_seed(&seed);
        Self {
            seed,
            policy: PasswordPolicy::default(),
            state: RwLock::new(state),
        }
    }

    fn read(&self) -> DirectoryResult<RwLockReadGuard<'_, DirectoryState>> {
        self.state.read().map_err(|_| DirectoryError::lock_poisoned())
    }

    fn write(&self) -> DirectoryResult<RwLockWriteGuard<'_, DirectoryState>> {
        self.state.write().map_err(|_| DirectoryError::lock_poisoned())
    }

    /// Create a user
    ///
    /// Required fields and the password policy are checked before any
    /// uniqueness lookup.
    pub fn create(&self, username: &str, email: &str, password: &str) -> DirectoryResult<CreatedUser> {
        if is_blank(username) {
            return Err(DirectoryError::UsernameRequired);
        }
        if is_blank(email) {
            return Err(DirectoryError::EmailRequired);
        }
        if is_blank(password) {
            return Err(DirectoryError::PasswordRequired);
        }
        self.policy.validate(password)?;
        validate_email(email)?;

        let mut state = self.write()?;

        if state.username_taken(username) {
            return Err(DirectoryError::UsernameExists);
        }
        if state.email_taken_by_other(email, None) {
            return Err(DirectoryError::EmailExists);
        }

        let id = state.next_id;
        state.next_id += 1;
        state.users.insert(
            id,
            User {
                id,
                username: username.to_string(),
                email: email.to_string(),
                password: password.to_string(),
            },
        );

        debug!(user_id = id, username, "user created");
        Ok(CreatedUser {
            id,
            username: username.to_string(),
        })
    }

    /// Fetch the public view of a user
    pub fn get(&self, id: UserId) -> DirectoryResult<UserView> {
        self.read()?
            .users
            .get(&id)
            .map(User::view)
            .ok_or(DirectoryError::UserNotFound)
    }

    /// Replace a user's email
    pub fn update_email(&self, id: UserId, email: &str) -> DirectoryResult<()> {
        let mut state = self.write()?;

        if !state.users.contains_key(&id) {
            return Err(DirectoryError::UserNotFound);
        }
        validate_email(email)?;
        if state.email_taken_by_other(email, Some(id)) {
            return Err(DirectoryError::EmailExists);
        }

        if let Some(user) = state.users.get_mut(&id) {
            user.email = email.to_string();
        }

        debug!(user_id = id, "user email updated");
        Ok(())
    }

    /// Remove a user; its id is never handed out again
    pub fn delete(&self, id: UserId) -> DirectoryResult<()> {
        let mut state = self.write()?;

        if state.users.remove(&id).is_none() {
            return Err(DirectoryError::UserNotFound);
        }

        debug!(user_id = id, "user deleted");
        Ok(())
    }

    /// List users, optionally filtered by a case-insensitive keyword
    ///
    /// `total` counts every match; `items` holds at most `size` of them after
    /// skipping `(page - 1) * size`. A zero page or size, or an offset past
    /// the end, yields an empty page.
    pub fn list(&self, query: &ListQuery) -> DirectoryResult<UserPage> {
        let state = self.read()?;

        let needle = query
            .keyword
            .as_deref()
            .filter(|k| !k.is_empty())
            .map(str::to_lowercase);

        let matching: Vec<&User> = match &needle {
            Some(needle) => state
                .users
                .values()
                .filter(|u| u.matches_keyword(needle))
                .collect(),
            None => state.users.values().collect(),
        };

        let total = matching.len();
        let items = page_window(query.page, query.size, total)
            .map(|(offset, take)| {
                matching
                    .iter()
                    .skip(offset)
                    .take(take)
                    .map(|u| u.view())
                    .collect()
            })
            .unwrap_or_default();

        Ok(UserPage { total, items })
    }

    /// Restore the seed records and counter
    pub fn reset(&self) -> DirectoryResult<()> {
        // a poisoned lock still holds a usable map; reset overwrites it anyway
        let mut state = self.state.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *state = DirectoryState::from_seed(&self.seed);
        self.state.clear_poison();

        debug!(records = state.users.len(), "directory reset to seed");
        Ok(())
    }

    /// Number of live records
    pub fn len(&self) -> DirectoryResult<usize> {
        Ok(self.read()?.users.len())
    }

    pub fn is_empty(&self) -> DirectoryResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Id the next successful create will receive
    pub fn next_id(&self) -> DirectoryResult<UserId> {
        Ok(self.read()?.next_id)
    }
}

/// Offset and length of a page, or `None` when the page is empty
fn page_window(page: u64, size: u64, total: usize) -> Option<(usize, usize)> {
    if page == 0 || size == 0 {
        return None;
    }
    let offset = usize::try_from((page - 1).checked_mul(size)?).ok()?;
    if offset >= total {
        return None;
    }
    let take = usize::try_from(size).unwrap_or(usize::MAX);
    Some((offset, take))
}
