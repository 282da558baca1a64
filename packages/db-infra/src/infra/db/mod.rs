pub mod core;
pub mod diagnostics;
pub mod locking;

pub use core::{build_admin_pool, build_pool, orchestrate_migration, orchestrate_migration_internal};
pub use diagnostics::{migration_counters, sqlite_diagnostics};
pub use locking::{BootstrapLock, Guard, InMemoryLock, SqliteFileLock};
