// Deleting a parent removes its dependents; play history survives.

use scorebook::errors::domain::{DomainError, NotFoundKind};
use scorebook::repos::{courses, holes, players, round_segments, rounds};

use crate::support::{fresh_db, seed_graph};

#[tokio::test]
async fn deleting_course_removes_holes_and_their_segments() -> Result<(), Box<dyn std::error::Error>>
{
    let db = fresh_db().await?;
    let graph = seed_graph(&db.state, 3).await?;
    // a second course must be untouched
    let other = seed_graph(&db.state, 2).await?;

    courses::delete_course(db.conn(), graph.course.id).await?;

    assert_eq!(courses::find_by_id(db.conn(), graph.course.id).await?, None);
    for hole in &graph.holes {
        assert_eq!(holes::find_by_id(db.conn(), hole.id).await?, None);
    }
    for segment in &graph.segments {
        assert_eq!(round_segments::find_by_id(db.conn(), segment.id).await?, None);
    }

    // the round is kept, detached from the course
    let round = rounds::find_by_id(db.conn(), graph.round.id)
        .await?
        .expect("round survives course deletion");
    assert_eq!(round.course_id, None);
    assert_eq!(round.player_id, Some(graph.player.id));
    assert!(rounds::segments_of(db.conn(), round.id).await?.is_empty());

    assert_eq!(holes::count(db.conn()).await?, 2);
    assert_eq!(round_segments::count(db.conn()).await?, 2);
    assert_eq!(courses::holes_of(db.conn(), other.course.id).await?.len(), 2);

    Ok(())
}

#[tokio::test]
async fn deleting_round_removes_its_segments() -> Result<(), Box<dyn std::error::Error>> {
    let db = fresh_db().await?;
    let graph = seed_graph(&db.state, 4).await?;

    rounds::delete_round(db.conn(), graph.round.id).await?;

    assert_eq!(rounds::find_by_id(db.conn(), graph.round.id).await?, None);
    assert_eq!(round_segments::count(db.conn()).await?, 0);

    // holes, course and player stay
    assert_eq!(holes::count(db.conn()).await?, 4);
    assert!(courses::find_by_id(db.conn(), graph.course.id).await?.is_some());
    assert!(players::rounds_of(db.conn(), graph.player.id).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn deleting_hole_removes_segments_scored_on_it() -> Result<(), Box<dyn std::error::Error>> {
    let db = fresh_db().await?;
    let graph = seed_graph(&db.state, 3).await?;
    let doomed = &graph.holes[1];

    holes::delete_hole(db.conn(), doomed.id).await?;

    let remaining: Vec<i64> = rounds::segments_of(db.conn(), graph.round.id)
        .await?
        .iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(remaining.len(), 2);
    assert!(!remaining.contains(&graph.segments[1].id));
    assert_eq!(courses::holes_of(db.conn(), graph.course.id).await?.len(), 2);

    Ok(())
}

#[tokio::test]
async fn deleting_player_keeps_rounds() -> Result<(), Box<dyn std::error::Error>> {
    let db = fresh_db().await?;
    let graph = seed_graph(&db.state, 2).await?;

    players::delete_player(db.conn(), graph.player.id).await?;

    let round = rounds::find_by_id(db.conn(), graph.round.id)
        .await?
        .expect("round survives player deletion");
    assert_eq!(round.player_id, None);
    assert_eq!(rounds::player_of(db.conn(), round.id).await?, None);
    assert_eq!(rounds::segments_of(db.conn(), round.id).await?.len(), 2);

    Ok(())
}

#[tokio::test]
async fn deleting_segment_leaves_round_and_hole() -> Result<(), Box<dyn std::error::Error>> {
    let db = fresh_db().await?;
    let graph = seed_graph(&db.state, 2).await?;
    let segment = &graph.segments[0];

    round_segments::delete_segment(db.conn(), segment.id).await?;

    assert_eq!(round_segments::count(db.conn()).await?, 1);
    assert!(rounds::find_by_id(db.conn(), graph.round.id).await?.is_some());
    assert!(holes::find_by_id(db.conn(), graph.holes[0].id).await?.is_some());

    Ok(())
}

#[tokio::test]
async fn deleting_missing_rows_is_not_found() -> Result<(), Box<dyn std::error::Error>> {
    let db = fresh_db().await?;

    let cases = [
        (courses::delete_course(db.conn(), 404).await, NotFoundKind::Course),
        (holes::delete_hole(db.conn(), 404).await, NotFoundKind::Hole),
        (players::delete_player(db.conn(), 404).await, NotFoundKind::Player),
        (rounds::delete_round(db.conn(), 404).await, NotFoundKind::Round),
        (
            round_segments::delete_segment(db.conn(), 404).await,
            NotFoundKind::RoundSegment,
        ),
    ];

    for (result, expected) in cases {
        match result {
            Err(DomainError::NotFound(kind, _)) => assert_eq!(kind, expected),
            other => panic!("expected NotFound({expected:?}), got {other:?}"),
        }
    }

    Ok(())
}
