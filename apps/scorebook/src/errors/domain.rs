//! Domain-level error type used across repositories and adapters.
//!
//! Adapters return `sea_orm::DbErr`; repositories convert it into
//! `DomainError` through `From<DbErr>`, which delegates to
//! `crate::infra::db_errors::map_db_err`.

use db_infra::DbInfraError;
use thiserror::Error;

/// Which rule a write violated.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    /// A required column was missing; carries `table.column`.
    MissingField(String),
    /// A value of the wrong storage type was written (or could not be decoded).
    TypeMismatch,
    /// A reference points at a row that does not exist.
    ForeignKey,
    /// A name was blank or too long.
    InvalidName,
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Course,
    Hole,
    Player,
    Round,
    RoundSegment,
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    UniqueCourseName,
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    Timeout,
    DbUnavailable,
    Config,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// Constraint or validation failure
    #[error("validation error {0:?}: {1}")]
    Validation(ValidationKind, String),
    /// Uniqueness conflict
    #[error("conflict {0:?}: {1}")]
    Conflict(ConflictKind, String),
    /// Missing row
    #[error("not found {0:?}: {1}")]
    NotFound(NotFoundKind, String),
    /// Infrastructure/operational failures
    #[error("infra {0:?}: {1}")]
    Infra(InfraErrorKind, String),
}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }

    /// `table.column` of the missing required column, if this is a missing-field error.
    pub fn missing_field(&self) -> Option<&str> {
        match self {
            Self::Validation(ValidationKind::MissingField(field), _) => Some(field),
            _ => None,
        }
    }

    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, Self::Validation(ValidationKind::TypeMismatch, _))
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        crate::infra::db_errors::map_db_err(e)
    }
}

impl From<DbInfraError> for DomainError {
    fn from(e: DbInfraError) -> Self {
        let kind = match e {
            DbInfraError::Connect { .. } => InfraErrorKind::DbUnavailable,
            DbInfraError::Lock { .. } => InfraErrorKind::Timeout,
            DbInfraError::Config { .. } => InfraErrorKind::Config,
            DbInfraError::Migration { .. } => InfraErrorKind::Other("Migration".into()),
        };
        DomainError::infra(kind, e.to_string())
    }
}
