//! SeaORM -> DomainError translation helpers.
//!
//! SQLite reports constraint failures as text ("NOT NULL constraint failed:
//! courses.name"), so classification works on the rendered error message.

use tracing::{error, warn};

use crate::errors::domain::{
    ConflictKind, DomainError, InfraErrorKind, NotFoundKind, ValidationKind,
};

const UNIQUE_FAILED: &str = "UNIQUE constraint failed: ";
const NOT_NULL_FAILED: &str = "NOT NULL constraint failed: ";
const FOREIGN_KEY_FAILED: &str = "FOREIGN KEY constraint failed";
const CHECK_FAILED: &str = "CHECK constraint failed";
const COLUMN_DECODE_FAILED: &str = "error occurred while decoding column";

/// Extract the `table.column` that follows `marker` in a SQLite error message.
fn extract_table_column<'a>(error_msg: &'a str, marker: &str) -> Option<&'a str> {
    let start = error_msg.find(marker)? + marker.len();
    error_msg[start..]
        .split(|c: char| c.is_whitespace() || c == '"' || c == ',' || c == ')')
        .next()
        .filter(|s| !s.is_empty())
}

/// Map a unique violation on `table.column` to a domain conflict.
fn map_unique_to_conflict(table_column: &str) -> (ConflictKind, &'static str) {
    match table_column {
        "courses.name" => (
            ConflictKind::UniqueCourseName,
            "A course with this name already exists",
        ),
        _ => (
            ConflictKind::Other("Unique".into()),
            "Unique constraint violation",
        ),
    }
}

/// Translate a `DbErr` into a `DomainError`.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();

    match &e {
        sea_orm::DbErr::RecordNotFound(msg) => {
            return DomainError::not_found(NotFoundKind::Other("Record".into()), msg.clone());
        }
        sea_orm::DbErr::Type(_) | sea_orm::DbErr::TryIntoErr { .. } => {
            warn!(raw_error = %error_msg, "Column value has the wrong type");
            return DomainError::validation(ValidationKind::TypeMismatch, error_msg);
        }
        // sqlx column decode failures surface as Query/Exec errors
        sea_orm::DbErr::Query(_) | sea_orm::DbErr::Exec(_)
            if error_msg.contains(COLUMN_DECODE_FAILED) =>
        {
            warn!(raw_error = %error_msg, "Stored value does not decode into its column type");
            return DomainError::validation(ValidationKind::TypeMismatch, error_msg);
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(raw_error = %error_msg, "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        _ => {}
    }

    if let Some(table_column) = extract_table_column(&error_msg, UNIQUE_FAILED) {
        warn!(table_column, "Unique constraint violation");
        let (kind, detail) = map_unique_to_conflict(table_column);
        return DomainError::conflict(kind, detail);
    }

    if let Some(table_column) = extract_table_column(&error_msg, NOT_NULL_FAILED) {
        warn!(table_column, "Required column missing");
        return DomainError::validation(
            ValidationKind::MissingField(table_column.to_string()),
            format!("{table_column} is required"),
        );
    }

    if error_msg.contains(FOREIGN_KEY_FAILED) {
        warn!(raw_error = %error_msg, "Foreign key constraint violation");
        return DomainError::validation(
            ValidationKind::ForeignKey,
            "Referenced row does not exist",
        );
    }

    // the schema's only CHECK constraints are column storage-type checks
    if error_msg.contains(CHECK_FAILED) {
        warn!(raw_error = %error_msg, "Column type check violation");
        return DomainError::validation(
            ValidationKind::TypeMismatch,
            "Value has the wrong type for its column",
        );
    }

    if error_msg.contains("database is locked") || error_msg.contains("timed out") {
        warn!(raw_error = %error_msg, "Database busy or pool timeout");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    error!(raw_error = %error_msg, "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}
