//! SeaORM adapter for round segments.

use sea_orm::{
    ActiveModelTrait, ConnectionTrait, EntityTrait, ModelTrait, NotSet, PaginatorTrait, Set,
};

use crate::entities::{holes, round_segments, rounds};

#[derive(Debug, Clone)]
pub struct SegmentCreate {
    pub round_id: i64,
    pub hole_id: Option<i64>,
    pub throws: i32,
}

pub async fn create_segment<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: SegmentCreate,
) -> Result<round_segments::Model, sea_orm::DbErr> {
    round_segments::ActiveModel {
        id: NotSet,
        round_id: Set(dto.round_id),
        hole_id: Set(dto.hole_id),
        throws: Set(dto.throws),
    }
    .insert(conn)
    .await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    segment_id: i64,
) -> Result<Option<round_segments::Model>, sea_orm::DbErr> {
    round_segments::Entity::find_by_id(segment_id).one(conn).await
}

pub async fn find_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    segment: &round_segments::Model,
) -> Result<Option<rounds::Model>, sea_orm::DbErr> {
    segment.find_related(rounds::Entity).one(conn).await
}

pub async fn find_hole<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    segment: &round_segments::Model,
) -> Result<Option<holes::Model>, sea_orm::DbErr> {
    segment.find_related(holes::Entity).one(conn).await
}

pub async fn set_throws<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    segment: round_segments::Model,
    throws: i32,
) -> Result<round_segments::Model, sea_orm::DbErr> {
    let mut active: round_segments::ActiveModel = segment.into();
    active.throws = Set(throws);
    active.update(conn).await
}

pub async fn delete_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    segment_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let res = round_segments::Entity::delete_by_id(segment_id)
        .exec(conn)
        .await?;
    Ok(res.rows_affected)
}

pub async fn count<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, sea_orm::DbErr> {
    round_segments::Entity::find().count(conn).await
}
