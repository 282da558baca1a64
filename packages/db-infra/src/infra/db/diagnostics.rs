//! Process-wide migration counters and SQLite pragma inspection.

pub mod migration_counters {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tracing::debug;

    static SCHEMA_CHECKS: AtomicUsize = AtomicUsize::new(0);
    static FAST_PATH_HITS: AtomicUsize = AtomicUsize::new(0);
    static FAST_PATH_MISSES: AtomicUsize = AtomicUsize::new(0);
    static LOCK_ACQUIRED: AtomicUsize = AtomicUsize::new(0);
    static LOCK_ACQUIRE_ATTEMPTS: AtomicUsize = AtomicUsize::new(0);
    static LOCK_BACKOFFS: AtomicUsize = AtomicUsize::new(0);
    static LOCK_TIMEOUTS: AtomicUsize = AtomicUsize::new(0);
    static MIGRATOR_RUNS: AtomicUsize = AtomicUsize::new(0);
    static MIGRATION_FAILURES: AtomicUsize = AtomicUsize::new(0);
    static POSTCHECK_MISMATCHES: AtomicUsize = AtomicUsize::new(0);
    static BUSY_EVENTS: AtomicUsize = AtomicUsize::new(0);

    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct Snapshot {
        pub schema_checks: usize,
        pub fast_path_hits: usize,
        pub fast_path_misses: usize,
        pub lock_acquired: usize,
        pub lock_acquire_attempts: usize,
        pub lock_backoffs: usize,
        pub lock_timeouts: usize,
        pub migrator_runs: usize,
        pub migration_failures: usize,
        pub postcheck_mismatches: usize,
        pub busy_events: usize,
    }

    fn bump(counter: &AtomicUsize) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn schema_check() {
        bump(&SCHEMA_CHECKS);
    }
    pub fn fast_path_hit() {
        bump(&FAST_PATH_HITS);
    }
    pub fn fast_path_miss() {
        bump(&FAST_PATH_MISSES);
    }
    pub fn lock_acquired() {
        bump(&LOCK_ACQUIRED);
    }
    pub fn add_lock_acquire_attempts(n: usize) {
        LOCK_ACQUIRE_ATTEMPTS.fetch_add(n, Ordering::Relaxed);
    }
    pub fn lock_backoff_event() {
        bump(&LOCK_BACKOFFS);
    }
    pub fn lock_acquire_timeout() {
        bump(&LOCK_TIMEOUTS);
    }
    pub fn migrator_ran() {
        bump(&MIGRATOR_RUNS);
    }
    pub fn migration_failed() {
        bump(&MIGRATION_FAILURES);
    }
    pub fn postcheck_mismatch() {
        bump(&POSTCHECK_MISMATCHES);
    }
    pub fn busy_event() {
        bump(&BUSY_EVENTS);
    }

    pub fn snapshot() -> Snapshot {
        Snapshot {
            schema_checks: SCHEMA_CHECKS.load(Ordering::Relaxed),
            fast_path_hits: FAST_PATH_HITS.load(Ordering::Relaxed),
            fast_path_misses: FAST_PATH_MISSES.load(Ordering::Relaxed),
            lock_acquired: LOCK_ACQUIRED.load(Ordering::Relaxed),
            lock_acquire_attempts: LOCK_ACQUIRE_ATTEMPTS.load(Ordering::Relaxed),
            lock_backoffs: LOCK_BACKOFFS.load(Ordering::Relaxed),
            lock_timeouts: LOCK_TIMEOUTS.load(Ordering::Relaxed),
            migrator_runs: MIGRATOR_RUNS.load(Ordering::Relaxed),
            migration_failures: MIGRATION_FAILURES.load(Ordering::Relaxed),
            postcheck_mismatches: POSTCHECK_MISMATCHES.load(Ordering::Relaxed),
            busy_events: BUSY_EVENTS.load(Ordering::Relaxed),
        }
    }

    pub fn log_snapshot(context: &str) {
        let s = snapshot();
        debug!(
            context,
            schema_checks = s.schema_checks,
            fast_path_hits = s.fast_path_hits,
            fast_path_misses = s.fast_path_misses,
            lock_acquired = s.lock_acquired,
            lock_acquire_attempts = s.lock_acquire_attempts,
            lock_backoffs = s.lock_backoffs,
            lock_timeouts = s.lock_timeouts,
            migrator_runs = s.migrator_runs,
            migration_failures = s.migration_failures,
            postcheck_mismatches = s.postcheck_mismatches,
            busy_events = s.busy_events,
            "migration counters"
        );
    }
}

pub mod sqlite_diagnostics {
    use sea_orm::{ConnectionTrait, DatabaseBackend, DbErr, Statement};
    use tracing::info;

    /// Whether foreign key enforcement is on for the connection that serves this query.
    pub async fn foreign_keys_enabled<C: ConnectionTrait>(conn: &C) -> Result<bool, DbErr> {
        let row = conn
            .query_one(Statement::from_string(
                DatabaseBackend::Sqlite,
                "PRAGMA foreign_keys",
            ))
            .await?;
        match row {
            Some(row) => Ok(row.try_get_by_index::<i32>(0)? == 1),
            None => Ok(false),
        }
    }

    pub async fn journal_mode<C: ConnectionTrait>(conn: &C) -> Result<String, DbErr> {
        let row = conn
            .query_one(Statement::from_string(
                DatabaseBackend::Sqlite,
                "PRAGMA journal_mode",
            ))
            .await?;
        match row {
            Some(row) => row.try_get_by_index::<String>(0),
            None => Ok(String::from("unknown")),
        }
    }

    pub async fn log_pragmas<C: ConnectionTrait>(conn: &C, context: &str) -> Result<(), DbErr> {
        let foreign_keys = foreign_keys_enabled(conn).await?;
        let journal_mode = journal_mode(conn).await?;
        info!(context, foreign_keys, journal_mode = %journal_mode, "sqlite pragmas");
        Ok(())
    }
}
