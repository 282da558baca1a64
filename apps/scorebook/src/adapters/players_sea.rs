//! SeaORM adapter for players - generic over ConnectionTrait.

use sea_orm::{
    ActiveModelTrait, ConnectionTrait, EntityTrait, ModelTrait, NotSet, PaginatorTrait,
    QueryOrder, Set,
};

use crate::entities::{players, rounds};

pub async fn create_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: String,
) -> Result<players::Model, sea_orm::DbErr> {
    players::ActiveModel {
        id: NotSet,
        name: Set(name),
    }
    .insert(conn)
    .await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<Option<players::Model>, sea_orm::DbErr> {
    players::Entity::find_by_id(player_id).one(conn).await
}

pub async fn find_rounds<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player: &players::Model,
) -> Result<Vec<rounds::Model>, sea_orm::DbErr> {
    player
        .find_related(rounds::Entity)
        .order_by_asc(rounds::Column::Time)
        .all(conn)
        .await
}

pub async fn delete_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let res = players::Entity::delete_by_id(player_id).exec(conn).await?;
    Ok(res.rows_affected)
}

pub async fn count<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, sea_orm::DbErr> {
    players::Entity::find().count(conn).await
}
