use std::path::Path;

use super::types::{ApiCredentials, DataSource};

pub const MIN_PLAYER_POOL: usize = 11;

/// # Errors
///
/// Will return `Err` if the database file's directory does not exist.
pub fn check_db_path(path: &str) -> Result<String, String> {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return Err("The database path must not be empty.".to_string());
    }
    if trimmed == ":memory:" {
        return Ok(trimmed.to_string());
    }
    match Path::new(trimmed).parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.is_dir() => Err(format!(
            "The directory for database '{trimmed}' does not exist."
        )),
        _ => Ok(trimmed.to_string()),
    }
}

/// # Errors
///
/// Will return `Err` if the value is not a number of at least eleven.
pub fn check_player_pool(raw: &str) -> Result<usize, String> {
    let size: usize = raw
        .trim()
        .parse()
        .map_err(|_| format!("'{raw}' is not a player count."))?;
    if size < MIN_PLAYER_POOL {
        return Err(format!(
            "A side needs at least {MIN_PLAYER_POOL} players, got {size}."
        ));
    }
    Ok(size)
}

/// # Errors
///
/// Will return `Err` if the API source is chosen and either value is missing.
pub fn check_api_credentials(
    source: DataSource,
    key: Option<String>,
    secret: Option<String>,
) -> Result<Option<ApiCredentials>, String> {
    if source != DataSource::Api {
        return Ok(None);
    }
    let present = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
    match (present(key), present(secret)) {
        (Some(key), Some(secret)) => Ok(Some(ApiCredentials { key, secret })),
        _ => Err(format!(
            "--source api needs {} and {} in the environment.",
            super::API_KEY_VAR,
            super::API_SECRET_VAR
        )),
    }
}
