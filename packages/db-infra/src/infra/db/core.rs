use std::str::FromStr;
use std::time::{Duration, Instant};

use migration::{migrate, MigrationCommand, Migrator, MigratorTrait};
use rand::Rng;
use sea_orm::{
    ConnectionTrait, DatabaseBackend, DatabaseConnection, DbErr, SqlxSqliteConnector, Statement,
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::{error, info, trace, warn};

use crate::config::db::{
    build_connection_settings, build_session_statements, make_conn_spec, migrate_lock_timeout_ms,
    sqlite_lock_path, DbProfile, DbSettings, PoolPurpose, RuntimeEnv,
};
use crate::error::DbInfraError;
use crate::infra::db::diagnostics::migration_counters;
use crate::infra::db::locking::{BootstrapLock, Guard, InMemoryLock, SqliteFileLock};

const MIGRATION_BODY_TIMEOUT: Duration = Duration::from_secs(120);

fn profile_label(profile: &DbProfile) -> &'static str {
    match profile {
        DbProfile::SqliteFile { .. } => "sqlite file",
        DbProfile::InMemory => "sqlite::memory:",
    }
}

/// Apply per-connection session settings (foreign keys, busy timeout).
async fn apply_sqlite_config(
    conn: &mut sqlx::SqliteConnection,
    settings: &DbSettings,
) -> Result<(), sqlx::Error> {
    for stmt in build_session_statements(settings) {
        sqlx::query(&stmt).execute(&mut *conn).await?;
    }
    Ok(())
}

/// Build a SeaORM connection backed by a sqlx SQLite pool.
///
/// Every connection the pool opens runs the session statements, so foreign key
/// enforcement can never be missing on a pooled connection.
pub async fn build_pool(
    env: RuntimeEnv,
    profile: &DbProfile,
    purpose: PoolPurpose,
) -> Result<DatabaseConnection, DbInfraError> {
    let url = make_conn_spec(profile)?;
    let settings = build_connection_settings(env, profile, purpose)?;

    let connect_options = SqliteConnectOptions::from_str(&url)
        .map_err(|e| DbInfraError::config(format!("invalid sqlite url '{url}': {e}")))?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(Duration::from_millis(settings.db_settings.busy_timeout_ms));

    let mut pool_options = SqlitePoolOptions::new()
        .min_connections(settings.min_connections)
        .max_connections(settings.max_connections)
        .acquire_timeout(settings.acquire_timeout);

    if matches!(profile, DbProfile::InMemory) {
        // closing the only connection would drop the whole database
        pool_options = pool_options.idle_timeout(None).max_lifetime(None);
    }

    let db_settings = settings.db_settings.clone();
    let pool = pool_options
        .after_connect(move |conn, _meta| {
            let db_settings = db_settings.clone();
            Box::pin(async move { apply_sqlite_config(conn, &db_settings).await })
        })
        .connect_with(connect_options)
        .await
        .map_err(|e| {
            DbInfraError::connect(format!(
                "failed to open {} ({purpose:?} pool): {e}",
                profile_label(profile)
            ))
        })?;

    info!(
        env = ?env,
        purpose = ?purpose,
        target = profile_label(profile),
        max_connections = settings.max_connections,
        "db pool ready"
    );

    Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
}

/// Single-connection pool used by the migration CLI.
pub async fn build_admin_pool(
    env: RuntimeEnv,
    profile: &DbProfile,
) -> Result<DatabaseConnection, DbInfraError> {
    build_pool(env, profile, PoolPurpose::Migration).await
}

async fn fast_path_schema_check(conn: &DatabaseConnection) -> Result<bool, DbInfraError> {
    migration_counters::schema_check();

    let defined = Migrator::migrations();
    let expected_count = defined.len();
    let expected_last = defined
        .last()
        .map(|m| m.name().to_string())
        .unwrap_or_default();

    let (current_count, current_last) = match Migrator::get_applied_migrations(conn).await {
        Ok(applied) => (
            applied.len(),
            applied.last().map(|m| m.name().to_string()),
        ),
        Err(DbErr::Exec(_)) | Err(DbErr::Query(_)) => {
            trace!(fastpath = "miss", reason = "migration_table_missing");
            return Ok(false);
        }
        Err(e) => {
            return Err(DbInfraError::migration(format!(
                "failed to get applied migrations: {e}"
            )))
        }
    };

    let up_to_date = current_count == expected_count
        && !expected_last.is_empty()
        && current_last.as_deref() == Some(expected_last.as_str());

    if up_to_date {
        migration_counters::fast_path_hit();
    } else {
        migration_counters::fast_path_miss();
    }
    let outcome = if up_to_date { "hit" } else { "miss" };
    trace!(
        fastpath = outcome,
        current_count,
        expected_count,
        current_last = %current_last.as_deref().unwrap_or(""),
        expected_last = %expected_last
    );

    Ok(up_to_date)
}

/// Open an admin pool for `profile` and run `command` under the migration lock.
pub async fn orchestrate_migration(
    env: RuntimeEnv,
    profile: &DbProfile,
    command: MigrationCommand,
) -> Result<(), DbInfraError> {
    let admin_pool = build_admin_pool(env, profile).await?;
    orchestrate_migration_internal(&admin_pool, env, profile, command).await
}

/// Run `command` on an existing pool, serialised against other migrators of the same database.
pub async fn orchestrate_migration_internal(
    pool: &DatabaseConnection,
    env: RuntimeEnv,
    profile: &DbProfile,
    command: MigrationCommand,
) -> Result<(), DbInfraError> {
    info!(
        env = ?env,
        target = profile_label(profile),
        command = ?command,
        "migrate=start"
    );

    if command == MigrationCommand::Status {
        migrate(pool, command)
            .await
            .map_err(|e| DbInfraError::migration(format!("migration execution failed: {e}")))?;
        info!("migrate=done");
        return Ok(());
    }

    let result = match profile {
        DbProfile::InMemory => migrate_with_lock(pool, InMemoryLock, env, profile, command).await,
        DbProfile::SqliteFile { .. } => {
            let lock_path = sqlite_lock_path(profile)?;
            let lock = SqliteFileLock::new(&lock_path)?;
            migrate_with_lock(pool, lock, env, profile, command).await
        }
    };

    if let Err(ref e) = result {
        let msg = e.message();
        if msg.contains("database is locked") || msg.contains("SQLITE_BUSY") {
            migration_counters::busy_event();
            error!(error = %e, "sqlite_busy op=migrate");
        }
    }

    info!("migrate=done");
    migration_counters::log_snapshot("migrate_orchestration");

    result
}

async fn migrate_with_lock<L>(
    pool: &DatabaseConnection,
    mut lock: L,
    env: RuntimeEnv,
    profile: &DbProfile,
    command: MigrationCommand,
) -> Result<(), DbInfraError>
where
    L: BootstrapLock,
{
    let lock_acquire_ms = migrate_lock_timeout_ms(env);
    let start = Instant::now();
    let mut attempts: u32 = 0;

    let guard = loop {
        attempts += 1;

        if command == MigrationCommand::Up && fast_path_schema_check(pool).await? {
            info!("migrate=skipped up_to_date=true");
            return Ok(());
        }

        if let Some(acquired) = lock.try_acquire().await? {
            migration_counters::add_lock_acquire_attempts(attempts as usize);
            migration_counters::lock_acquired();
            trace!(
                lock = "won",
                attempts,
                elapsed_ms = start.elapsed().as_millis() as u64
            );
            break acquired;
        }

        if start.elapsed() >= Duration::from_millis(lock_acquire_ms) {
            migration_counters::lock_acquire_timeout();
            return Err(DbInfraError::lock(format!(
                "migration lock acquisition timeout after {:?} ({attempts} attempts)",
                start.elapsed()
            )));
        }

        let base_delay_ms = (5u64 << attempts.saturating_sub(1).min(4)).min(80);
        let jitter_ms = rand::rng().random_range(0..4u64);
        migration_counters::lock_backoff_event();
        trace!(lock = "backoff", attempts, delay_ms = base_delay_ms + jitter_ms);
        tokio::time::sleep(Duration::from_millis(base_delay_ms + jitter_ms)).await;
    };

    let result = run_guarded(pool, &guard, env, profile, command).await;

    if let Err(release_err) = guard.release().await {
        warn!(error = %release_err, "failed to release migration guard");
    }

    result
}

async fn run_guarded(
    pool: &DatabaseConnection,
    _guard: &Guard,
    env: RuntimeEnv,
    profile: &DbProfile,
    command: MigrationCommand,
) -> Result<(), DbInfraError> {
    let start = Instant::now();

    if matches!(profile, DbProfile::SqliteFile { .. }) {
        setup_sqlite_file_prerequisites(pool).await?;
    }

    match tokio::time::timeout(MIGRATION_BODY_TIMEOUT, migrate(pool, command)).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            migration_counters::migration_failed();
            return Err(DbInfraError::migration(format!(
                "migration execution failed: {e}"
            )));
        }
        Err(_) => {
            migration_counters::migration_failed();
            return Err(DbInfraError::migration(format!(
                "migration body execution timed out after {}ms",
                MIGRATION_BODY_TIMEOUT.as_millis()
            )));
        }
    }

    migration_counters::migrator_ran();

    let expected_count = Migrator::migrations().len();
    let applied_count = migration::count_applied_migrations(pool)
        .await
        .map_err(|e| DbInfraError::migration(format!("failed to count migrations: {e}")))?;

    info!(
        env = ?env,
        command = ?command,
        expected_count,
        applied_count,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "migrator=ran"
    );

    match command {
        MigrationCommand::Reset if applied_count != 0 => {
            migration_counters::postcheck_mismatch();
            Err(DbInfraError::migration(format!(
                "reset should leave 0 migrations applied, but {applied_count} were found"
            )))
        }
        MigrationCommand::Up | MigrationCommand::Fresh | MigrationCommand::Refresh
            if applied_count != expected_count =>
        {
            migration_counters::postcheck_mismatch();
            Err(DbInfraError::migration(format!(
                "expected {expected_count} migrations, but {applied_count} were applied"
            )))
        }
        _ => Ok(()),
    }
}

async fn setup_sqlite_file_prerequisites(pool: &DatabaseConnection) -> Result<(), DbInfraError> {
    let pragma = "PRAGMA journal_mode = WAL;";
    pool.execute(Statement::from_string(DatabaseBackend::Sqlite, pragma))
        .await
        .map_err(|e| DbInfraError::config(format!("failed to apply '{pragma}': {e}")))?;
    Ok(())
}
