use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};
use uuid::Uuid;

use super::{NewUser, StorageError, UserStore};
use crate::model::{FavoriteTeam, NotificationPrefs, Role, User};

const SCHEMA: [&str; 4] = [
    include_str!("../sql/schema/sqlite/01_app_user.sql"),
    include_str!("../sql/schema/sqlite/02_session.sql"),
    include_str!("../sql/schema/sqlite/03_favorite_team.sql"),
    include_str!("../sql/schema/sqlite/04_notification_prefs.sql"),
];

const DROP: &str = include_str!("../sql/schema/sqlite/00_table_drop.sql");

const USER_COLUMNS: &str = "user_id, name, email, password_hash, role";

/// SQLite-backed store. The single connection is shared behind a mutex and
/// only touched from blocking tasks.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

fn conversion_error(idx: usize, err: impl std::error::Error + Send + Sync + 'static) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
}

fn parse_ts(idx: usize, raw: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| conversion_error(idx, e))
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    let role: String = row.get(4)?;
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        password_hash: row.get(3)?,
        role: role
            .parse()
            .map_err(|e: String| conversion_error(4, StorageError::new(e)))?,
    })
}

fn favorite_from_row(row: &Row<'_>) -> rusqlite::Result<FavoriteTeam> {
    let ins_ts: String = row.get(3)?;
    Ok(FavoriteTeam {
        id: row.get(0)?,
        user_id: row.get(1)?,
        team_id: row.get(2)?,
        created_at: parse_ts(3, &ins_ts)?,
    })
}

fn prefs_from_row(row: &Row<'_>) -> rusqlite::Result<NotificationPrefs> {
    Ok(NotificationPrefs {
        match_start: row.get(0)?,
        goals: row.get(1)?,
        half_time: row.get(2)?,
        full_time: row.get(3)?,
        red_cards: row.get(4)?,
        favorite_teams_only: row.get(5)?,
    })
}

fn upsert_prefs(
    conn: &Connection,
    user_id: &str,
    prefs: &NotificationPrefs,
) -> rusqlite::Result<usize> {
    conn.execute(
        "INSERT INTO notification_prefs
             (user_id, match_start, goals, half_time, full_time, red_cards, favorite_teams_only)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
         ON CONFLICT(user_id) DO UPDATE SET
             match_start = excluded.match_start,
             goals = excluded.goals,
             half_time = excluded.half_time,
             full_time = excluded.full_time,
             red_cards = excluded.red_cards,
             favorite_teams_only = excluded.favorite_teams_only",
        params![
            user_id,
            prefs.match_start,
            prefs.goals,
            prefs.half_time,
            prefs.full_time,
            prefs.red_cards,
            prefs.favorite_teams_only,
        ],
    )
}

impl SqliteStore {
    /// Opens (or creates) the database file and applies the schema.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the file cannot be opened or the schema fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        Self::init(Connection::open(path)?)
    }

    /// # Errors
    ///
    /// Will return `Err` if the schema fails to apply.
    pub fn open_in_memory() -> Result<Self, StorageError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StorageError> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.execute_batch(&SCHEMA.join("\n"))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Drops and recreates every table.
    ///
    /// # Errors
    ///
    /// Will return `Err` if either script fails.
    pub async fn reset(&self) -> Result<(), StorageError> {
        self.with_conn(|conn| {
            conn.execute_batch(DROP)?;
            conn.execute_batch(&SCHEMA.join("\n"))
        })
        .await
    }

    async fn with_conn<R, F>(&self, f: F) -> Result<R, StorageError>
    where
        F: FnOnce(&mut Connection) -> rusqlite::Result<R> + Send + 'static,
        R: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut guard = conn.lock().unwrap_or_else(PoisonError::into_inner);
            f(&mut *guard)
        })
        .await
        .map_err(|e| StorageError::new(e.to_string()))?
        .map_err(StorageError::from)
    }
}

#[async_trait]
impl UserStore for SqliteStore {
    async fn create_user(&self, user: NewUser) -> Result<User, StorageError> {
        let created = User {
            id: Uuid::new_v4().to_string(),
            name: user.name,
            email: user.email,
            password_hash: Some(user.password_hash),
            role: user.role,
        };
        let row = created.clone();
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO app_user (user_id, name, email, password_hash, role, ins_ts)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    row.id,
                    row.name,
                    row.email,
                    row.password_hash,
                    row.role.to_string(),
                    Utc::now().to_rfc3339(),
                ],
            )
        })
        .await?;
        Ok(created)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StorageError> {
        let email = email.to_string();
        self.with_conn(move |conn| {
            conn.query_row(
                &format!("SELECT {USER_COLUMNS} FROM app_user WHERE email = ?1"),
                params![email],
                user_from_row,
            )
            .optional()
        })
        .await
    }

    async fn find_user_by_id(&self, user_id: &str) -> Result<Option<User>, StorageError> {
        let user_id = user_id.to_string();
        self.with_conn(move |conn| {
            conn.query_row(
                &format!("SELECT {USER_COLUMNS} FROM app_user WHERE user_id = ?1"),
                params![user_id],
                user_from_row,
            )
            .optional()
        })
        .await
    }

    async fn list_users(&self) -> Result<Vec<User>, StorageError> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare(&format!("SELECT {USER_COLUMNS} FROM app_user ORDER BY ins_ts, email"))?;
            let users = stmt.query_map([], user_from_row)?;
            users.collect()
        })
        .await
    }

    async fn set_role(&self, user_id: &str, role: Role) -> Result<(), StorageError> {
        let user_id = user_id.to_string();
        let changed = self
            .with_conn(move |conn| {
                conn.execute(
                    "UPDATE app_user SET role = ?1 WHERE user_id = ?2",
                    params![role.to_string(), user_id],
                )
            })
            .await?;
        if changed == 0 {
            return Err(StorageError::new("user not found"));
        }
        Ok(())
    }

    async fn create_session(&self, user_id: &str) -> Result<String, StorageError> {
        let user_id = user_id.to_string();
        let token = Uuid::new_v4().simple().to_string();
        let stored = token.clone();
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO session (token, user_id, ins_ts) VALUES (?1, ?2, ?3)",
                params![stored, user_id, Utc::now().to_rfc3339()],
            )
        })
        .await?;
        Ok(token)
    }

    async fn find_session_user(&self, token: &str) -> Result<Option<User>, StorageError> {
        let token = token.to_string();
        self.with_conn(move |conn| {
            conn.query_row(
                "SELECT u.user_id, u.name, u.email, u.password_hash, u.role
                 FROM session s JOIN app_user u ON u.user_id = s.user_id
                 WHERE s.token = ?1",
                params![token],
                user_from_row,
            )
            .optional()
        })
        .await
    }

    async fn delete_session(&self, token: &str) -> Result<(), StorageError> {
        let token = token.to_string();
        self.with_conn(move |conn| conn.execute("DELETE FROM session WHERE token = ?1", params![token]))
            .await?;
        Ok(())
    }

    async fn favorite_teams(&self, user_id: &str) -> Result<Vec<FavoriteTeam>, StorageError> {
        let user_id = user_id.to_string();
        self.with_conn(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT favorite_id, user_id, team_id, ins_ts
                 FROM favorite_team WHERE user_id = ?1 ORDER BY ins_ts, team_id",
            )?;
            let favorites = stmt.query_map(params![user_id], favorite_from_row)?;
            favorites.collect()
        })
        .await
    }

    async fn add_favorite_team(
        &self,
        user_id: &str,
        team_id: &str,
    ) -> Result<FavoriteTeam, StorageError> {
        let user_id = user_id.to_string();
        let team_id = team_id.to_string();
        self.with_conn(move |conn| {
            let tx = conn.transaction()?;
            tx.execute(
                "INSERT OR IGNORE INTO favorite_team (favorite_id, user_id, team_id, ins_ts)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    Uuid::new_v4().to_string(),
                    user_id,
                    team_id,
                    Utc::now().to_rfc3339()
                ],
            )?;
            let favorite = tx.query_row(
                "SELECT favorite_id, user_id, team_id, ins_ts
                 FROM favorite_team WHERE user_id = ?1 AND team_id = ?2",
                params![user_id, team_id],
                favorite_from_row,
            )?;
            tx.commit()?;
            Ok(favorite)
        })
        .await
    }

    async fn remove_favorite_team(
        &self,
        user_id: &str,
        team_id: &str,
    ) -> Result<bool, StorageError> {
        let user_id = user_id.to_string();
        let team_id = team_id.to_string();
        let removed = self
            .with_conn(move |conn| {
                conn.execute(
                    "DELETE FROM favorite_team WHERE user_id = ?1 AND team_id = ?2",
                    params![user_id, team_id],
                )
            })
            .await?;
        Ok(removed > 0)
    }

    async fn notification_prefs(&self, user_id: &str) -> Result<NotificationPrefs, StorageError> {
        let user_id = user_id.to_string();
        self.with_conn(move |conn| {
            let existing = conn
                .query_row(
                    "SELECT match_start, goals, half_time, full_time, red_cards, favorite_teams_only
                     FROM notification_prefs WHERE user_id = ?1",
                    params![user_id],
                    prefs_from_row,
                )
                .optional()?;
            match existing {
                Some(prefs) => Ok(prefs),
                None => {
                    let prefs = NotificationPrefs::default();
                    upsert_prefs(conn, &user_id, &prefs)?;
                    Ok(prefs)
                }
            }
        })
        .await
    }

    async fn update_notification_prefs(
        &self,
        user_id: &str,
        prefs: NotificationPrefs,
    ) -> Result<NotificationPrefs, StorageError> {
        let user_id = user_id.to_string();
        self.with_conn(move |conn| upsert_prefs(conn, &user_id, &prefs))
            .await?;
        Ok(prefs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store_with_user() -> (SqliteStore, User) {
        let store = SqliteStore::open_in_memory().unwrap();
        let user = store
            .create_user(NewUser {
                name: Some("Ada".to_string()),
                email: "ada@example.com".to_string(),
                password_hash: "x".to_string(),
                role: Role::User,
            })
            .await
            .unwrap();
        (store, user)
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let (store, _) = store_with_user().await;
        let again = store
            .create_user(NewUser {
                name: None,
                email: "ada@example.com".to_string(),
                password_hash: "y".to_string(),
                role: Role::User,
            })
            .await;
        assert!(again.is_err_and(|e| e.is_conflict()));
    }

    #[tokio::test]
    async fn favorites_are_unique_per_team() {
        let (store, user) = store_with_user().await;
        let first = store.add_favorite_team(&user.id, "33").await.unwrap();
        let second = store.add_favorite_team(&user.id, "33").await.unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(store.favorite_teams(&user.id).await.unwrap().len(), 1);

        assert!(store.remove_favorite_team(&user.id, "33").await.unwrap());
        assert!(!store.remove_favorite_team(&user.id, "33").await.unwrap());
        assert!(store.favorite_teams(&user.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn prefs_default_then_upsert() {
        let (store, user) = store_with_user().await;
        let prefs = store.notification_prefs(&user.id).await.unwrap();
        assert_eq!(prefs, NotificationPrefs::default());

        let changed = NotificationPrefs {
            red_cards: true,
            goals: false,
            ..prefs
        };
        store
            .update_notification_prefs(&user.id, changed)
            .await
            .unwrap();
        assert_eq!(store.notification_prefs(&user.id).await.unwrap(), changed);
    }

    #[tokio::test]
    async fn sessions_resolve_to_users() {
        let (store, user) = store_with_user().await;
        let token = store.create_session(&user.id).await.unwrap();
        let found = store.find_session_user(&token).await.unwrap();
        assert_eq!(found.map(|u| u.id), Some(user.id));

        store.delete_session(&token).await.unwrap();
        assert!(store.find_session_user(&token).await.unwrap().is_none());
    }
}
