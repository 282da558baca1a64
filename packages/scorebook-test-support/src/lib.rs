//! Shared helpers for scorebook tests: idempotent logging setup and unique test values.

pub mod logging;
pub mod unique_helpers;
