//! Hole repository functions for domain layer.

use sea_orm::ConnectionTrait;
use tracing::info;

use super::courses::Course;
use super::round_segments::RoundSegment;
use crate::adapters::holes_sea::{self as holes_adapter, HoleCreate};
use crate::entities::holes;
use crate::errors::domain::{DomainError, NotFoundKind};

/// Hole domain model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hole {
    pub id: i64,
    pub number: i32,
    pub par: i32,
    pub course_id: Option<i64>,
}

async fn require_model<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    hole_id: i64,
) -> Result<holes::Model, DomainError> {
    holes_adapter::find_by_id(conn, hole_id)
        .await?
        .ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Hole, format!("Hole {hole_id} not found"))
        })
}

/// Create a hole, optionally on a course. A dangling `course_id` is a foreign-key error.
pub async fn create_hole<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    course_id: Option<i64>,
    number: i32,
    par: i32,
) -> Result<Hole, DomainError> {
    let hole = holes_adapter::create_hole(
        conn,
        HoleCreate {
            course_id,
            number,
            par,
        },
    )
    .await?;
    info!(hole_id = hole.id, ?course_id, number, par, "hole created");
    Ok(Hole::from(hole))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    hole_id: i64,
) -> Result<Option<Hole>, DomainError> {
    let hole = holes_adapter::find_by_id(conn, hole_id).await?;
    Ok(hole.map(Hole::from))
}

/// The course this hole belongs to, if any.
pub async fn course_of<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    hole_id: i64,
) -> Result<Option<Course>, DomainError> {
    let hole = require_model(conn, hole_id).await?;
    let course = holes_adapter::find_course(conn, &hole).await?;
    Ok(course.map(Course::from))
}

pub async fn segments_of<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    hole_id: i64,
) -> Result<Vec<RoundSegment>, DomainError> {
    let hole = require_model(conn, hole_id).await?;
    let segments = holes_adapter::find_segments(conn, &hole).await?;
    Ok(segments.into_iter().map(RoundSegment::from).collect())
}

/// Move a hole to another course, or detach it with `None`.
pub async fn assign_course<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    hole_id: i64,
    course_id: Option<i64>,
) -> Result<Hole, DomainError> {
    let hole = require_model(conn, hole_id).await?;
    let updated = holes_adapter::set_course(conn, hole, course_id).await?;
    info!(hole_id, ?course_id, "hole course assigned");
    Ok(Hole::from(updated))
}

/// Delete a hole and the round segments scored on it.
pub async fn delete_hole<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    hole_id: i64,
) -> Result<(), DomainError> {
    let rows = holes_adapter::delete_by_id(conn, hole_id).await?;
    if rows == 0 {
        return Err(DomainError::not_found(
            NotFoundKind::Hole,
            format!("Hole {hole_id} not found"),
        ));
    }
    info!(hole_id, "hole deleted");
    Ok(())
}

pub async fn count<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, DomainError> {
    Ok(holes_adapter::count(conn).await?)
}

impl From<holes::Model> for Hole {
    fn from(model: holes::Model) -> Self {
        Self {
            id: model.id,
            number: model.number,
            par: model.par,
            course_id: model.course_id,
        }
    }
}
