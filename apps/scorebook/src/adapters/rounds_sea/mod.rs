//! SeaORM adapter for rounds repository.

use sea_orm::{
    ActiveModelTrait, ConnectionTrait, EntityTrait, ModelTrait, NotSet, PaginatorTrait,
    QueryOrder, Set,
};

use crate::entities::{courses, players, round_segments, rounds};

pub mod dto;

pub use dto::RoundCreate;

pub async fn create_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: RoundCreate,
) -> Result<rounds::Model, sea_orm::DbErr> {
    let round = rounds::ActiveModel {
        id: NotSet,
        player_id: Set(dto.player_id),
        course_id: Set(dto.course_id),
        time: Set(dto.time),
    };

    round.insert(conn).await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Option<rounds::Model>, sea_orm::DbErr> {
    rounds::Entity::find_by_id(round_id).one(conn).await
}

pub async fn find_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round: &rounds::Model,
) -> Result<Option<players::Model>, sea_orm::DbErr> {
    round.find_related(players::Entity).one(conn).await
}

pub async fn find_course<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round: &rounds::Model,
) -> Result<Option<courses::Model>, sea_orm::DbErr> {
    round.find_related(courses::Entity).one(conn).await
}

pub async fn find_segments<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round: &rounds::Model,
) -> Result<Vec<round_segments::Model>, sea_orm::DbErr> {
    round
        .find_related(round_segments::Entity)
        .order_by_asc(round_segments::Column::Id)
        .all(conn)
        .await
}

/// Point the round at a different player (or none). The column is single-valued,
/// so the previous player loses the round.
pub async fn set_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round: rounds::Model,
    player_id: Option<i64>,
) -> Result<rounds::Model, sea_orm::DbErr> {
    let mut active: rounds::ActiveModel = round.into();
    active.player_id = Set(player_id);
    active.update(conn).await
}

pub async fn set_course<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round: rounds::Model,
    course_id: Option<i64>,
) -> Result<rounds::Model, sea_orm::DbErr> {
    let mut active: rounds::ActiveModel = round.into();
    active.course_id = Set(course_id);
    active.update(conn).await
}

pub async fn delete_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let res = rounds::Entity::delete_by_id(round_id).exec(conn).await?;
    Ok(res.rows_affected)
}

pub async fn count<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, sea_orm::DbErr> {
    rounds::Entity::find().count(conn).await
}
