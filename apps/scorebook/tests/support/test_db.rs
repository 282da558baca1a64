//! Fresh, migrated SQLite database per test.

use std::path::{Path, PathBuf};

use scorebook::{build_state, AppState, DbProfile, DomainError, RuntimeEnv};
use sea_orm::DatabaseConnection;
use tempfile::TempDir;

/// A migrated database file living in its own temp directory.
///
/// The directory (and the file) is removed when this value drops.
pub struct TestDb {
    pub state: AppState,
    pub path: PathBuf,
    _dir: TempDir,
}

impl TestDb {
    pub fn conn(&self) -> &DatabaseConnection {
        self.state.db()
    }
}

/// Build test state against the SQLite file at `path`, migrating it if needed.
pub async fn open_state(path: &Path) -> Result<AppState, DomainError> {
    build_state()
        .with_env(RuntimeEnv::Test)
        .with_db(DbProfile::SqliteFile {
            file: Some(path.display().to_string()),
        })
        .build()
        .await
}

pub async fn fresh_db() -> Result<TestDb, Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("scorebook.db");
    let state = open_state(&path).await?;
    Ok(TestDb {
        state,
        path,
        _dir: dir,
    })
}
