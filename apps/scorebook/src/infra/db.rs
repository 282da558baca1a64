use db_infra::infra::db::sqlite_diagnostics;
use db_infra::{build_pool, orchestrate_migration_internal};
use migration::MigrationCommand;
use sea_orm::DatabaseConnection;
use tracing::info;

pub use db_infra::config::db::{DbProfile, PoolPurpose, RuntimeEnv};

use crate::errors::domain::{DomainError, InfraErrorKind};

/// Open the application pool for `profile` and bring its schema up to date.
///
/// This is the single entrypoint for getting a usable connection: the returned
/// pool enforces foreign keys on every connection and has every migration applied.
pub async fn bootstrap_db(
    env: RuntimeEnv,
    profile: &DbProfile,
) -> Result<DatabaseConnection, DomainError> {
    let conn = build_pool(env, profile, PoolPurpose::App).await?;

    orchestrate_migration_internal(&conn, env, profile, MigrationCommand::Up).await?;

    if !sqlite_diagnostics::foreign_keys_enabled(&conn).await? {
        return Err(DomainError::infra(
            InfraErrorKind::Config,
            "foreign key enforcement is off; cascade rules would be ignored",
        ));
    }
    sqlite_diagnostics::log_pragmas(&conn, "bootstrap").await?;

    info!(env = ?env, profile = ?profile, "database ready");
    Ok(conn)
}
