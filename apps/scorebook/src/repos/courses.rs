//! Course repository functions for domain layer (generic over ConnectionTrait).

use sea_orm::ConnectionTrait;
use tracing::info;

use super::holes::Hole;
use super::rounds::Round;
use super::{validate_name, COURSE_NAME_MAX};
use crate::adapters::courses_sea::{self as courses_adapter, CourseCreate};
use crate::entities::courses;
use crate::errors::domain::{DomainError, NotFoundKind};

/// Course domain model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    pub id: i64,
    pub name: String,
    pub num_holes: i32,
    pub par_total: i32,
}

async fn require_model<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    course_id: i64,
) -> Result<courses::Model, DomainError> {
    courses_adapter::find_by_id(conn, course_id)
        .await?
        .ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Course, format!("Course {course_id} not found"))
        })
}

pub async fn create_course<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
    num_holes: i32,
    par_total: i32,
) -> Result<Course, DomainError> {
    let name = validate_name("course name", name, COURSE_NAME_MAX)?;
    let course =
        courses_adapter::create_course(conn, CourseCreate::new(name, num_holes, par_total))
            .await?;
    info!(course_id = course.id, name = %course.name, "course created");
    Ok(Course::from(course))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    course_id: i64,
) -> Result<Option<Course>, DomainError> {
    let course = courses_adapter::find_by_id(conn, course_id).await?;
    Ok(course.map(Course::from))
}

pub async fn find_by_name<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
) -> Result<Option<Course>, DomainError> {
    let course = courses_adapter::find_by_name(conn, name.trim()).await?;
    Ok(course.map(Course::from))
}

/// All courses, ordered by name.
pub async fn list_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Course>, DomainError> {
    let courses = courses_adapter::list_all(conn).await?;
    Ok(courses.into_iter().map(Course::from).collect())
}

/// Holes on the course, ordered by hole number.
pub async fn holes_of<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    course_id: i64,
) -> Result<Vec<Hole>, DomainError> {
    let course = require_model(conn, course_id).await?;
    let holes = courses_adapter::find_holes(conn, &course).await?;
    Ok(holes.into_iter().map(Hole::from).collect())
}

/// Rounds played on the course, oldest first.
pub async fn rounds_of<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    course_id: i64,
) -> Result<Vec<Round>, DomainError> {
    let course = require_model(conn, course_id).await?;
    let rounds = courses_adapter::find_rounds(conn, &course).await?;
    Ok(rounds.into_iter().map(Round::from).collect())
}

/// Delete a course together with its holes (and their segments).
///
/// Rounds played on the course survive with their course reference cleared.
pub async fn delete_course<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    course_id: i64,
) -> Result<(), DomainError> {
    let rows = courses_adapter::delete_by_id(conn, course_id).await?;
    if rows == 0 {
        return Err(DomainError::not_found(
            NotFoundKind::Course,
            format!("Course {course_id} not found"),
        ));
    }
    info!(course_id, "course deleted");
    Ok(())
}

pub async fn count<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, DomainError> {
    Ok(courses_adapter::count(conn).await?)
}

impl From<courses::Model> for Course {
    fn from(model: courses::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            num_holes: model.num_holes,
            par_total: model.par_total,
        }
    }
}
