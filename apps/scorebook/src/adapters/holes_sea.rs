//! SeaORM adapter for holes.

use sea_orm::{
    ActiveModelTrait, ConnectionTrait, EntityTrait, ModelTrait, NotSet, PaginatorTrait,
    QueryOrder, Set,
};

use crate::entities::{courses, holes, round_segments};

#[derive(Debug, Clone)]
pub struct HoleCreate {
    pub course_id: Option<i64>,
    pub number: i32,
    pub par: i32,
}

pub async fn create_hole<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: HoleCreate,
) -> Result<holes::Model, sea_orm::DbErr> {
    holes::ActiveModel {
        id: NotSet,
        number: Set(dto.number),
        par: Set(dto.par),
        course_id: Set(dto.course_id),
    }
    .insert(conn)
    .await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    hole_id: i64,
) -> Result<Option<holes::Model>, sea_orm::DbErr> {
    holes::Entity::find_by_id(hole_id).one(conn).await
}

pub async fn find_course<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    hole: &holes::Model,
) -> Result<Option<courses::Model>, sea_orm::DbErr> {
    hole.find_related(courses::Entity).one(conn).await
}

pub async fn find_segments<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    hole: &holes::Model,
) -> Result<Vec<round_segments::Model>, sea_orm::DbErr> {
    hole.find_related(round_segments::Entity)
        .order_by_asc(round_segments::Column::Id)
        .all(conn)
        .await
}

pub async fn set_course<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    hole: holes::Model,
    course_id: Option<i64>,
) -> Result<holes::Model, sea_orm::DbErr> {
    let mut active: holes::ActiveModel = hole.into();
    active.course_id = Set(course_id);
    active.update(conn).await
}

pub async fn delete_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    hole_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let res = holes::Entity::delete_by_id(hole_id).exec(conn).await?;
    Ok(res.rows_affected)
}

pub async fn count<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, sea_orm::DbErr> {
    holes::Entity::find().count(conn).await
}
