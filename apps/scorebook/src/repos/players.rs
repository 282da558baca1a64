//! Player repository functions for domain layer (generic over ConnectionTrait).

use sea_orm::ConnectionTrait;
use tracing::info;

use super::rounds::Round;
use super::{validate_name, PLAYER_NAME_MAX};
use crate::adapters::players_sea as players_adapter;
use crate::entities::players;
use crate::errors::domain::{DomainError, NotFoundKind};

/// Player domain model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: i64,
    pub name: String,
}

pub async fn create_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
) -> Result<Player, DomainError> {
    let name = validate_name("player name", name, PLAYER_NAME_MAX)?;
    let player = players_adapter::create_player(conn, name).await?;
    info!(player_id = player.id, "player created");
    Ok(Player::from(player))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<Option<Player>, DomainError> {
    let player = players_adapter::find_by_id(conn, player_id).await?;
    Ok(player.map(Player::from))
}

/// Rounds played by this player, oldest first.
pub async fn rounds_of<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<Vec<Round>, DomainError> {
    let player = players_adapter::find_by_id(conn, player_id)
        .await?
        .ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Player, format!("Player {player_id} not found"))
        })?;
    let rounds = players_adapter::find_rounds(conn, &player).await?;
    Ok(rounds.into_iter().map(Round::from).collect())
}

/// Delete a player. Their rounds are kept with the player reference cleared.
pub async fn delete_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<(), DomainError> {
    let rows = players_adapter::delete_by_id(conn, player_id).await?;
    if rows == 0 {
        return Err(DomainError::not_found(
            NotFoundKind::Player,
            format!("Player {player_id} not found"),
        ));
    }
    info!(player_id, "player deleted");
    Ok(())
}

pub async fn count<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, DomainError> {
    Ok(players_adapter::count(conn).await?)
}

impl From<players::Model> for Player {
    fn from(model: players::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}
