use async_trait::async_trait;
use std::error::Error;
use std::fmt;

use crate::model::{FavoriteTeam, NotificationPrefs, Role, User};

pub mod sqlite;

pub use sqlite::SqliteStore;

#[derive(Debug, Clone)]
pub struct StorageError {
    message: String,
    conflict: bool,
}

impl StorageError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            conflict: false,
        }
    }

    /// A write rejected by a uniqueness or key constraint.
    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            conflict: true,
        }
    }

    #[must_use]
    pub fn is_conflict(&self) -> bool {
        self.conflict
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for StorageError {}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        match value.sqlite_error_code() {
            Some(rusqlite::ErrorCode::ConstraintViolation) => Self::conflict(value.to_string()),
            _ => Self::new(value.to_string()),
        }
    }
}

impl From<String> for StorageError {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for StorageError {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Fields for a new account. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: Option<String>,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

/// Record-shaped access to accounts, sessions, favorites and notification
/// preferences, keyed by user id and team id.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create_user(&self, user: NewUser) -> Result<User, StorageError>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StorageError>;
    async fn find_user_by_id(&self, user_id: &str) -> Result<Option<User>, StorageError>;
    async fn list_users(&self) -> Result<Vec<User>, StorageError>;
    async fn set_role(&self, user_id: &str, role: Role) -> Result<(), StorageError>;

    /// Opens a session and returns its token.
    async fn create_session(&self, user_id: &str) -> Result<String, StorageError>;
    async fn find_session_user(&self, token: &str) -> Result<Option<User>, StorageError>;
    async fn delete_session(&self, token: &str) -> Result<(), StorageError>;

    async fn favorite_teams(&self, user_id: &str) -> Result<Vec<FavoriteTeam>, StorageError>;
    /// Adding a team twice returns the existing record.
    async fn add_favorite_team(
        &self,
        user_id: &str,
        team_id: &str,
    ) -> Result<FavoriteTeam, StorageError>;
    /// Returns whether a record was removed.
    async fn remove_favorite_team(&self, user_id: &str, team_id: &str)
    -> Result<bool, StorageError>;

    /// Stored preferences, created with defaults on first read.
    async fn notification_prefs(&self, user_id: &str) -> Result<NotificationPrefs, StorageError>;
    async fn update_notification_prefs(
        &self,
        user_id: &str,
        prefs: NotificationPrefs,
    ) -> Result<NotificationPrefs, StorageError>;
}
