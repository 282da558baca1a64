//! SeaORM adapter for the courses repository - generic over ConnectionTrait.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, NotSet,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use crate::entities::{courses, holes, rounds};

pub mod dto;

pub use dto::CourseCreate;

pub async fn create_course<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: CourseCreate,
) -> Result<courses::Model, sea_orm::DbErr> {
    let course = courses::ActiveModel {
        id: NotSet,
        name: Set(dto.name),
        num_holes: Set(dto.num_holes),
        par_total: Set(dto.par_total),
    };

    course.insert(conn).await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    course_id: i64,
) -> Result<Option<courses::Model>, sea_orm::DbErr> {
    courses::Entity::find_by_id(course_id).one(conn).await
}

pub async fn find_by_name<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
) -> Result<Option<courses::Model>, sea_orm::DbErr> {
    courses::Entity::find()
        .filter(courses::Column::Name.eq(name))
        .one(conn)
        .await
}

pub async fn list_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<courses::Model>, sea_orm::DbErr> {
    courses::Entity::find()
        .order_by_asc(courses::Column::Name)
        .all(conn)
        .await
}

/// Holes on a course, ordered by hole number
pub async fn find_holes<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    course: &courses::Model,
) -> Result<Vec<holes::Model>, sea_orm::DbErr> {
    course
        .find_related(holes::Entity)
        .order_by_asc(holes::Column::Number)
        .all(conn)
        .await
}

/// Rounds played on a course, oldest first
pub async fn find_rounds<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    course: &courses::Model,
) -> Result<Vec<rounds::Model>, sea_orm::DbErr> {
    course
        .find_related(rounds::Entity)
        .order_by_asc(rounds::Column::Time)
        .all(conn)
        .await
}

/// Delete a course; returns the number of rows removed (0 or 1).
pub async fn delete_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    course_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let res = courses::Entity::delete_by_id(course_id).exec(conn).await?;
    Ok(res.rows_affected)
}

pub async fn count<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, sea_orm::DbErr> {
    courses::Entity::find().count(conn).await
}
