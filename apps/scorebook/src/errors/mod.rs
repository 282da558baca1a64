pub mod domain;

pub use domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind, ValidationKind};
