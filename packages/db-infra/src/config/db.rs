use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::DbInfraError;

/// Default database file used when neither the profile nor the environment name one.
pub const DEFAULT_DB_FILE: &str = "scorebook.db";

/// Runtime environment; tunes timeouts and pool sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeEnv {
    Prod,
    Test,
}

/// Which database to open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbProfile {
    /// File-backed SQLite. `None` falls back to `SCOREBOOK_DB_FILE`, then [`DEFAULT_DB_FILE`].
    SqliteFile { file: Option<String> },
    /// Private in-memory SQLite database (lives as long as its single pooled connection).
    InMemory,
}

/// What a pool is going to be used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolPurpose {
    App,
    Migration,
}

/// Per-connection session settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbSettings {
    pub busy_timeout_ms: u64,
}

/// Pool sizing plus session settings for one pool.
#[derive(Debug, Clone)]
pub struct ConnectionSettings {
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub db_settings: DbSettings,
}

/// Resolve the on-disk file for a file profile.
pub fn sqlite_file_spec(profile: &DbProfile) -> Result<String, DbInfraError> {
    match profile {
        DbProfile::SqliteFile { file: Some(file) } => {
            if file.trim().is_empty() {
                return Err(DbInfraError::config("sqlite file path must not be empty"));
            }
            Ok(file.clone())
        }
        DbProfile::SqliteFile { file: None } => Ok(env::var("SCOREBOOK_DB_FILE")
            .ok()
            .filter(|f| !f.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DB_FILE.to_string())),
        DbProfile::InMemory => Err(DbInfraError::config(
            "sqlite_file_spec only works with the SqliteFile profile",
        )),
    }
}

/// Build the sqlx/SeaORM connection URL for a profile.
pub fn make_conn_spec(profile: &DbProfile) -> Result<String, DbInfraError> {
    match profile {
        DbProfile::SqliteFile { .. } => {
            let file = sqlite_file_spec(profile)?;
            Ok(format!("sqlite://{file}?mode=rwc"))
        }
        DbProfile::InMemory => Ok("sqlite::memory:".to_string()),
    }
}

/// Lock file guarding migrations of a database file (`<db>.migrate.lock`).
pub fn sqlite_lock_path(profile: &DbProfile) -> Result<PathBuf, DbInfraError> {
    let file = sqlite_file_spec(profile)?;
    Ok(lock_path_for(Path::new(&file)))
}

fn lock_path_for(db_file: &Path) -> PathBuf {
    let mut name = db_file
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".migrate.lock");
    db_file.with_file_name(name)
}

pub fn busy_timeout_ms(env: RuntimeEnv) -> Result<u64, DbInfraError> {
    match env::var("SCOREBOOK_BUSY_TIMEOUT_MS") {
        Ok(raw) => raw.trim().parse::<u64>().map_err(|_| {
            DbInfraError::config(format!(
                "SCOREBOOK_BUSY_TIMEOUT_MS must be a non-negative integer, got '{raw}'"
            ))
        }),
        Err(_) => Ok(match env {
            RuntimeEnv::Prod => 5000,
            RuntimeEnv::Test => 2000,
        }),
    }
}

/// How long a migration may wait for the bootstrap lock.
pub fn migrate_lock_timeout_ms(env: RuntimeEnv) -> u64 {
    env::var("SCOREBOOK_MIGRATE_TIMEOUT_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(match env {
            RuntimeEnv::Test => 3000,
            RuntimeEnv::Prod => 900,
        })
}

pub fn build_connection_settings(
    env: RuntimeEnv,
    profile: &DbProfile,
    purpose: PoolPurpose,
) -> Result<ConnectionSettings, DbInfraError> {
    let db_settings = DbSettings {
        busy_timeout_ms: busy_timeout_ms(env)?,
    };

    // every pooled connection to sqlite::memory: is a separate database
    let (min_connections, max_connections) = match (profile, purpose) {
        (DbProfile::InMemory, _) | (_, PoolPurpose::Migration) => (1, 1),
        (DbProfile::SqliteFile { .. }, PoolPurpose::App) => match env {
            RuntimeEnv::Prod => (1, 4),
            RuntimeEnv::Test => (1, 2),
        },
    };

    Ok(ConnectionSettings {
        max_connections,
        min_connections,
        acquire_timeout: Duration::from_secs(2),
        db_settings,
    })
}

/// Ordered per-connection statements. The journal mode is stored in the file and set separately.
pub fn build_session_statements(settings: &DbSettings) -> Vec<String> {
    vec![
        "PRAGMA foreign_keys = ON;".to_string(),
        format!("PRAGMA busy_timeout = {};", settings.busy_timeout_ms),
        "PRAGMA synchronous = NORMAL;".to_string(),
    ]
}
