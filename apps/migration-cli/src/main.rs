use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use db_infra::{orchestrate_migration, DbProfile, RuntimeEnv};
use migration::MigrationCommand;
use tracing_subscriber::EnvFilter;

/// Apply scorebook schema migrations to a SQLite database file.
#[derive(Debug, Parser)]
#[command(name = "migration", version)]
struct Cli {
    /// Migration command to run
    #[arg(value_enum)]
    command: Command,

    /// Database file (defaults to $SCOREBOOK_DB_FILE, then scorebook.db)
    #[arg(long)]
    file: Option<String>,

    /// Use test-environment timeouts
    #[arg(long)]
    test: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Command {
    Up,
    Down,
    Fresh,
    Reset,
    Refresh,
    Status,
}

impl From<Command> for MigrationCommand {
    fn from(value: Command) -> Self {
        match value {
            Command::Up => MigrationCommand::Up,
            Command::Down => MigrationCommand::Down,
            Command::Fresh => MigrationCommand::Fresh,
            Command::Reset => MigrationCommand::Reset,
            Command::Refresh => MigrationCommand::Refresh,
            Command::Status => MigrationCommand::Status,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let env = if cli.test {
        RuntimeEnv::Test
    } else {
        RuntimeEnv::Prod
    };
    let profile = DbProfile::SqliteFile { file: cli.file };

    match orchestrate_migration(env, &profile, cli.command.into()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "migration failed");
            ExitCode::FAILURE
        }
    }
}
