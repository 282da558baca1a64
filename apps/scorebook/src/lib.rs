#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

//! Disc golf scorebook: courses, holes, players, rounds and per-hole results
//! persisted in SQLite through SeaORM.

pub mod adapters;
pub mod db;
pub mod entities;
pub mod errors;
pub mod infra;
pub mod repos;
pub mod state;

// Re-exports for public API
pub use db::with_txn;
pub use errors::domain::DomainError;
pub use infra::db::{DbProfile, RuntimeEnv};
pub use infra::state::build_state;
pub use state::app_state::AppState;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    scorebook_test_support::logging::init();
}
