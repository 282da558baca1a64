//! Round segment repository functions for domain layer.

use sea_orm::ConnectionTrait;
use tracing::info;

use super::holes::Hole;
use super::rounds::Round;
use crate::adapters::round_segments_sea::{self as segments_adapter, SegmentCreate};
use crate::entities::round_segments;
use crate::errors::domain::{DomainError, NotFoundKind};

/// One hole's result within a round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundSegment {
    pub id: i64,
    pub round_id: i64,
    pub hole_id: Option<i64>,
    pub throws: i32,
}

async fn require_model<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    segment_id: i64,
) -> Result<round_segments::Model, DomainError> {
    segments_adapter::find_by_id(conn, segment_id)
        .await?
        .ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::RoundSegment,
                format!("Round segment {segment_id} not found"),
            )
        })
}

pub async fn create_segment<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
    hole_id: Option<i64>,
    throws: i32,
) -> Result<RoundSegment, DomainError> {
    let segment = segments_adapter::create_segment(
        conn,
        SegmentCreate {
            round_id,
            hole_id,
            throws,
        },
    )
    .await?;
    info!(segment_id = segment.id, round_id, ?hole_id, throws, "round segment created");
    Ok(RoundSegment::from(segment))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    segment_id: i64,
) -> Result<Option<RoundSegment>, DomainError> {
    let segment = segments_adapter::find_by_id(conn, segment_id).await?;
    Ok(segment.map(RoundSegment::from))
}

/// The round owning this segment. Every segment has one.
pub async fn round_of<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    segment_id: i64,
) -> Result<Round, DomainError> {
    let segment = require_model(conn, segment_id).await?;
    let round = segments_adapter::find_round(conn, &segment)
        .await?
        .ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::Round,
                format!("Round {} not found", segment.round_id),
            )
        })?;
    Ok(Round::from(round))
}

pub async fn hole_of<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    segment_id: i64,
) -> Result<Option<Hole>, DomainError> {
    let segment = require_model(conn, segment_id).await?;
    let hole = segments_adapter::find_hole(conn, &segment).await?;
    Ok(hole.map(Hole::from))
}

pub async fn update_throws<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    segment_id: i64,
    throws: i32,
) -> Result<RoundSegment, DomainError> {
    let segment = require_model(conn, segment_id).await?;
    let updated = segments_adapter::set_throws(conn, segment, throws).await?;
    info!(segment_id, throws, "round segment throws updated");
    Ok(RoundSegment::from(updated))
}

pub async fn delete_segment<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    segment_id: i64,
) -> Result<(), DomainError> {
    let rows = segments_adapter::delete_by_id(conn, segment_id).await?;
    if rows == 0 {
        return Err(DomainError::not_found(
            NotFoundKind::RoundSegment,
            format!("Round segment {segment_id} not found"),
        ));
    }
    info!(segment_id, "round segment deleted");
    Ok(())
}

pub async fn count<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, DomainError> {
    Ok(segments_adapter::count(conn).await?)
}

impl From<round_segments::Model> for RoundSegment {
    fn from(model: round_segments::Model) -> Self {
        Self {
            id: model.id,
            round_id: model.round_id,
            hole_id: model.hole_id,
            throws: model.throws,
        }
    }
}
