pub use sea_orm_migration::prelude::*;
pub use sea_orm_migration::sea_orm::{ConnectionTrait, DatabaseConnection};
use sea_orm_migration::sea_orm::{DatabaseBackend, Statement};

mod m20240405_000001_init; // keep filename + module name in sync

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20240405_000001_init::Migration)]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationCommand {
    Up,
    Down,
    Fresh,
    Reset,
    Refresh,
    Status,
}

/// Run a migration command against an already-open connection.
/// Used by both the CLI and state bootstrap.
pub async fn migrate(db: &DatabaseConnection, command: MigrationCommand) -> Result<(), DbErr> {
    let before = get_db_diagnostics(db).await?;

    tracing::info!(
        command = ?command,
        backend = %before.backend,
        db = %before.name,
        defined = before.defined_migrations_count,
        applied = before.mig_count,
        "migrate=before"
    );

    let result = match command {
        MigrationCommand::Up => Migrator::up(db, None).await,
        MigrationCommand::Down => Migrator::down(db, None).await,
        MigrationCommand::Fresh => Migrator::fresh(db).await,
        MigrationCommand::Reset => Migrator::reset(db).await,
        MigrationCommand::Refresh => Migrator::refresh(db).await,
        MigrationCommand::Status => Migrator::status(db).await,
    };

    match result {
        Ok(()) => {
            if command != MigrationCommand::Status {
                let after = get_db_diagnostics(db).await?;
                tracing::info!(
                    command = ?command,
                    defined = after.defined_migrations_count,
                    applied = after.mig_count,
                    "migrate=after"
                );
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!(command = ?command, db = %before.name, error = %e, "migrate=failed");
            Err(e)
        }
    }
}

#[derive(Debug)]
struct DbDiagnostics {
    backend: String,
    name: String,
    mig_count: usize,
    defined_migrations_count: usize,
}

async fn get_db_diagnostics(db: &DatabaseConnection) -> Result<DbDiagnostics, DbErr> {
    let backend = db.get_database_backend();

    let name = match backend {
        DatabaseBackend::Sqlite => {
            let stmt = Statement::from_string(
                backend,
                "SELECT file FROM pragma_database_list WHERE name = 'main'",
            );
            match db.query_one(stmt).await? {
                Some(row) => match row.try_get::<String>("", "file") {
                    Ok(file) if file.is_empty() => ":memory:".to_string(),
                    Ok(file) => file,
                    Err(_) => "<unknown>".to_string(),
                },
                None => "<unknown>".to_string(),
            }
        }
        _ => "<unsupported>".to_string(),
    };

    let mig_count = count_applied_migrations(db).await.unwrap_or(0);

    Ok(DbDiagnostics {
        backend: format!("{backend:?}"),
        name,
        mig_count,
        defined_migrations_count: Migrator::migrations().len(),
    })
}

/// Number of migrations applied to the database; 0 when the migration table does not exist yet.
pub async fn count_applied_migrations(db: &DatabaseConnection) -> Result<usize, DbErr> {
    match Migrator::get_applied_migrations(db).await {
        Ok(migrations) => Ok(migrations.len()),
        Err(DbErr::Exec(_)) | Err(DbErr::Query(_)) => Ok(0),
        Err(e) => Err(e),
    }
}

/// Name of the latest applied migration, if any.
pub async fn get_latest_migration_version(
    db: &DatabaseConnection,
) -> Result<Option<String>, DbErr> {
    match Migrator::get_applied_migrations(db).await {
        Ok(migrations) => Ok(migrations.last().map(|m| m.name().to_string())),
        Err(DbErr::Exec(_)) | Err(DbErr::Query(_)) => Ok(None),
        Err(e) => Err(e),
    }
}
