// Standard library imports
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

// External crate imports
use async_trait::async_trait;
use tracing::debug;

// Internal crate imports
use crate::error::DbInfraError;

/// Guard representing a held migration lock.
/// For SQLite file locks it owns the OS file handle; the in-memory guard holds nothing.
pub struct Guard {
    sqlite_file: Option<File>,
    sqlite_lock_path: Option<PathBuf>,
    released: bool,
}

impl Guard {
    fn sqlite(file: File, lock_path: PathBuf) -> Self {
        Self {
            sqlite_file: Some(file),
            sqlite_lock_path: Some(lock_path),
            released: false,
        }
    }

    fn in_memory() -> Self {
        Self {
            sqlite_file: None,
            sqlite_lock_path: None,
            released: false,
        }
    }

    /// Release the lock. Releasing twice is a no-op.
    pub async fn release(mut self) -> Result<(), DbInfraError> {
        self.release_inner();
        Ok(())
    }

    fn release_inner(&mut self) {
        if self.released {
            return;
        }

        if let Some(file) = self.sqlite_file.take() {
            let lock_path_display = self
                .sqlite_lock_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "unknown".to_string());

            match fs4::fs_std::FileExt::unlock(&file) {
                Ok(()) => debug!(lock_path = lock_path_display, "SQLite file lock released"),
                // the handle is dropped right after, which releases the OS lock anyway
                Err(e) => debug!(
                    error = %e,
                    lock_path = lock_path_display,
                    "SQLite file unlock returned error"
                ),
            }
        }

        self.released = true;
    }
}

impl Drop for Guard {
    fn drop(&mut self) {
        self.release_inner();
    }
}

/// Bootstrap/migration lock acquisition.
#[async_trait]
pub trait BootstrapLock {
    /// Try to acquire the lock without blocking.
    /// Returns `Some(Guard)` if acquired, `None` if another holder has it.
    async fn try_acquire(&mut self) -> Result<Option<Guard>, DbInfraError>;
}

/// Exclusive OS-level lock on `<db>.migrate.lock`, shared by every process that
/// resolves the same on-disk path.
pub struct SqliteFileLock {
    lock_path: PathBuf,
}

impl SqliteFileLock {
    pub fn new(lock_path: &Path) -> Result<Self, DbInfraError> {
        if lock_path.as_os_str().is_empty() {
            return Err(DbInfraError::lock("lock path must not be empty"));
        }
        Ok(Self {
            lock_path: lock_path.to_path_buf(),
        })
    }
}

#[async_trait]
impl BootstrapLock for SqliteFileLock {
    async fn try_acquire(&mut self) -> Result<Option<Guard>, DbInfraError> {
        use fs4::fs_std::FileExt;

        if let Some(parent) = self.lock_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    DbInfraError::lock(format!("failed to create lock file parent directory: {e}"))
                })?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .truncate(true)
            .read(true)
            .write(true)
            .open(&self.lock_path)
            .map_err(|e| DbInfraError::lock(format!("failed to open lock file: {e}")))?;

        // Ok(true) = acquired, Ok(false) = would block
        match file.try_lock_exclusive() {
            Ok(true) => {
                debug!(lock_path = %self.lock_path.display(), "SQLite file lock acquired");
                Ok(Some(Guard::sqlite(file, self.lock_path.clone())))
            }
            Ok(false) => {
                debug!(lock_path = %self.lock_path.display(), "SQLite file lock contended");
                Ok(None)
            }
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                debug!(lock_path = %self.lock_path.display(), "SQLite file lock contended");
                Ok(None)
            }
            Err(e) => Err(DbInfraError::lock(format!(
                "failed to acquire SQLite file lock: {e}"
            ))),
        }
    }
}

/// No-op lock for in-memory databases, which are private to one connection.
pub struct InMemoryLock;

#[async_trait]
impl BootstrapLock for InMemoryLock {
    async fn try_acquire(&mut self) -> Result<Option<Guard>, DbInfraError> {
        Ok(Some(Guard::in_memory()))
    }
}
