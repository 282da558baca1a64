//! Round repository functions for domain layer (generic over ConnectionTrait).

use sea_orm::ConnectionTrait;
use time::{OffsetDateTime, UtcOffset};
use tracing::info;

use super::courses::Course;
use super::players::Player;
use super::round_segments::RoundSegment;
use crate::adapters::rounds_sea as rounds_adapter;
use crate::entities::rounds;
use crate::errors::domain::{DomainError, NotFoundKind};

/// Round domain model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    pub id: i64,
    pub player_id: Option<i64>,
    pub course_id: Option<i64>,
    pub time: OffsetDateTime,
}

/// Input for [`create_round`]. A `None` time means "now"; times are stored in UTC.
#[derive(Debug, Clone, Default)]
pub struct RoundCreate {
    pub player_id: Option<i64>,
    pub course_id: Option<i64>,
    pub time: Option<OffsetDateTime>,
}

impl RoundCreate {
    pub fn new(player_id: i64, course_id: i64) -> Self {
        Self {
            player_id: Some(player_id),
            course_id: Some(course_id),
            time: None,
        }
    }

    pub fn at(mut self, time: OffsetDateTime) -> Self {
        self.time = Some(time);
        self
    }
}

async fn require_model<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<rounds::Model, DomainError> {
    rounds_adapter::find_by_id(conn, round_id)
        .await?
        .ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Round, format!("Round {round_id} not found"))
        })
}

pub async fn create_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    input: RoundCreate,
) -> Result<Round, DomainError> {
    let dto = rounds_adapter::RoundCreate {
        player_id: input.player_id,
        course_id: input.course_id,
        // stored as text, so one offset keeps text order chronological
        time: input
            .time
            .map_or_else(OffsetDateTime::now_utc, |t| t.to_offset(UtcOffset::UTC)),
    };
    let round = rounds_adapter::create_round(conn, dto).await?;
    info!(
        round_id = round.id,
        player_id = ?round.player_id,
        course_id = ?round.course_id,
        "round created"
    );
    Ok(Round::from(round))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Option<Round>, DomainError> {
    let round = rounds_adapter::find_by_id(conn, round_id).await?;
    Ok(round.map(Round::from))
}

pub async fn player_of<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Option<Player>, DomainError> {
    let round = require_model(conn, round_id).await?;
    let player = rounds_adapter::find_player(conn, &round).await?;
    Ok(player.map(Player::from))
}

pub async fn course_of<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Option<Course>, DomainError> {
    let round = require_model(conn, round_id).await?;
    let course = rounds_adapter::find_course(conn, &round).await?;
    Ok(course.map(Course::from))
}

pub async fn segments_of<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Vec<RoundSegment>, DomainError> {
    let round = require_model(conn, round_id).await?;
    let segments = rounds_adapter::find_segments(conn, &round).await?;
    Ok(segments.into_iter().map(RoundSegment::from).collect())
}

/// Point the round at `player_id`, replacing whatever player it had.
pub async fn assign_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
    player_id: Option<i64>,
) -> Result<Round, DomainError> {
    let round = require_model(conn, round_id).await?;
    let previous = round.player_id;
    let updated = rounds_adapter::set_player(conn, round, player_id).await?;
    info!(round_id, ?previous, ?player_id, "round player assigned");
    Ok(Round::from(updated))
}

pub async fn assign_course<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
    course_id: Option<i64>,
) -> Result<Round, DomainError> {
    let round = require_model(conn, round_id).await?;
    let updated = rounds_adapter::set_course(conn, round, course_id).await?;
    info!(round_id, ?course_id, "round course assigned");
    Ok(Round::from(updated))
}

/// Delete a round and all of its segments.
pub async fn delete_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<(), DomainError> {
    let rows = rounds_adapter::delete_by_id(conn, round_id).await?;
    if rows == 0 {
        return Err(DomainError::not_found(
            NotFoundKind::Round,
            format!("Round {round_id} not found"),
        ));
    }
    info!(round_id, "round deleted");
    Ok(())
}

pub async fn count<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, DomainError> {
    Ok(rounds_adapter::count(conn).await?)
}

impl From<rounds::Model> for Round {
    fn from(model: rounds::Model) -> Self {
        Self {
            id: model.id,
            player_id: model.player_id,
            course_id: model.course_id,
            time: model.time,
        }
    }
}
