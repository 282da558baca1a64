//! Infrastructure layer - database bootstrap, state building, and error mapping.

pub mod db;
pub mod db_errors;
pub mod state;
