// Required columns, uniqueness and references are enforced by the database,
// including for writes that bypass the repositories.

use scorebook::entities::{courses as course_rows, holes as hole_rows};
use scorebook::entities::{players as player_rows, round_segments as segment_rows};
use scorebook::errors::domain::{ConflictKind, DomainError, ValidationKind};
use scorebook::repos::rounds::RoundCreate;
use scorebook::repos::{courses, holes, players, round_segments, rounds};
use scorebook::with_txn;
use scorebook_test_support::unique_helpers::unique_course_name;
use sea_orm::{ActiveModelTrait, NotSet, Set};

use crate::support::{fresh_db, seed_course, seed_graph};

fn assert_missing(err: DomainError, column: &str) {
    assert_eq!(err.missing_field(), Some(column), "unexpected error: {err:?}");
}

#[tokio::test]
async fn course_names_are_unique() -> Result<(), Box<dyn std::error::Error>> {
    let db = fresh_db().await?;
    let name = unique_course_name("Pier Park");

    courses::create_course(db.conn(), &name, 18, 54).await?;
    let err = courses::create_course(db.conn(), &name, 9, 27)
        .await
        .unwrap_err();

    assert!(
        matches!(err, DomainError::Conflict(ConflictKind::UniqueCourseName, _)),
        "unexpected error: {err:?}"
    );
    assert_eq!(courses::count(db.conn()).await?, 1);

    Ok(())
}

#[tokio::test]
async fn duplicate_name_rolls_back_the_whole_unit() -> Result<(), Box<dyn std::error::Error>> {
    let db = fresh_db().await?;
    let existing = seed_course(&db.state, 18).await?;

    let name = existing.name.clone();
    let err = with_txn(&db.state, |txn| {
        Box::pin(async move {
            players::create_player(txn, "Simon Lizotte").await?;
            courses::create_course(txn, &name, 9, 27).await
        })
    })
    .await
    .unwrap_err();

    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::UniqueCourseName, _)
    ));
    assert_eq!(players::count(db.conn()).await?, 0);

    Ok(())
}

#[tokio::test]
async fn course_requires_every_column() -> Result<(), Box<dyn std::error::Error>> {
    let db = fresh_db().await?;

    let err = course_rows::ActiveModel {
        id: NotSet,
        name: NotSet,
        num_holes: Set(18),
        par_total: Set(54),
    }
    .insert(db.conn())
    .await
    .unwrap_err();
    assert_missing(err.into(), "courses.name");

    let err = course_rows::ActiveModel {
        id: NotSet,
        name: Set(unique_course_name("No Holes")),
        num_holes: NotSet,
        par_total: Set(54),
    }
    .insert(db.conn())
    .await
    .unwrap_err();
    assert_missing(err.into(), "courses.num_holes");

    let err = course_rows::ActiveModel {
        id: NotSet,
        name: Set(unique_course_name("No Par")),
        num_holes: Set(18),
        par_total: NotSet,
    }
    .insert(db.conn())
    .await
    .unwrap_err();
    assert_missing(err.into(), "courses.par_total");

    assert_eq!(courses::count(db.conn()).await?, 0);
    Ok(())
}

#[tokio::test]
async fn course_names_are_validated_before_insert() -> Result<(), Box<dyn std::error::Error>> {
    let db = fresh_db().await?;

    let too_long = "x".repeat(51);
    for bad in ["", "    ", too_long.as_str()] {
        let err = courses::create_course(db.conn(), bad, 18, 54)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::Validation(ValidationKind::InvalidName, _)
        ));
    }

    // surrounding whitespace is not part of the name
    let course = courses::create_course(db.conn(), "  Beaver Ranch  ", 27, 81).await?;
    assert_eq!(course.name, "Beaver Ranch");
    assert!(courses::find_by_name(db.conn(), "Beaver Ranch").await?.is_some());

    Ok(())
}

#[tokio::test]
async fn hole_requires_number_and_par() -> Result<(), Box<dyn std::error::Error>> {
    let db = fresh_db().await?;
    let course = seed_course(&db.state, 9).await?;

    let err = hole_rows::ActiveModel {
        id: NotSet,
        number: NotSet,
        par: Set(3),
        course_id: Set(Some(course.id)),
    }
    .insert(db.conn())
    .await
    .unwrap_err();
    assert_missing(err.into(), "holes.number");

    let err = hole_rows::ActiveModel {
        id: NotSet,
        number: Set(1),
        par: NotSet,
        course_id: Set(Some(course.id)),
    }
    .insert(db.conn())
    .await
    .unwrap_err();
    assert_missing(err.into(), "holes.par");

    assert_eq!(holes::count(db.conn()).await?, 0);
    Ok(())
}

#[tokio::test]
async fn player_requires_a_name() -> Result<(), Box<dyn std::error::Error>> {
    let db = fresh_db().await?;

    let err = player_rows::ActiveModel {
        id: NotSet,
        name: NotSet,
    }
    .insert(db.conn())
    .await
    .unwrap_err();
    assert_missing(err.into(), "players.name");

    let err = players::create_player(db.conn(), " ").await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::InvalidName, _)
    ));

    let err = players::create_player(db.conn(), &"p".repeat(121))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::InvalidName, _)
    ));

    assert_eq!(players::count(db.conn()).await?, 0);
    Ok(())
}

#[tokio::test]
async fn segment_requires_throws_and_round() -> Result<(), Box<dyn std::error::Error>> {
    let db = fresh_db().await?;
    let graph = seed_graph(&db.state, 1).await?;

    let err = segment_rows::ActiveModel {
        id: NotSet,
        round_id: Set(graph.round.id),
        hole_id: Set(Some(graph.holes[0].id)),
        throws: NotSet,
    }
    .insert(db.conn())
    .await
    .unwrap_err();
    assert_missing(err.into(), "round_segments.throws");

    let err = segment_rows::ActiveModel {
        id: NotSet,
        round_id: NotSet,
        hole_id: Set(Some(graph.holes[0].id)),
        throws: Set(3),
    }
    .insert(db.conn())
    .await
    .unwrap_err();
    assert_missing(err.into(), "round_segments.round_id");

    assert_eq!(round_segments::count(db.conn()).await?, 1);
    Ok(())
}

#[tokio::test]
async fn references_must_point_at_existing_rows() -> Result<(), Box<dyn std::error::Error>> {
    let db = fresh_db().await?;
    let graph = seed_graph(&db.state, 1).await?;

    let dangling = [
        round_segments::create_segment(db.conn(), 9_999, None, 3)
            .await
            .map(|_| ()),
        round_segments::create_segment(db.conn(), graph.round.id, Some(9_999), 3)
            .await
            .map(|_| ()),
        holes::create_hole(db.conn(), Some(9_999), 1, 3)
            .await
            .map(|_| ()),
        rounds::create_round(db.conn(), RoundCreate::new(9_999, graph.course.id))
            .await
            .map(|_| ()),
        rounds::create_round(db.conn(), RoundCreate::new(graph.player.id, 9_999))
            .await
            .map(|_| ()),
    ];

    for result in dangling {
        match result {
            Err(DomainError::Validation(ValidationKind::ForeignKey, _)) => {}
            other => panic!("expected a foreign key violation, got {other:?}"),
        }
    }

    assert_eq!(round_segments::count(db.conn()).await?, 1);
    assert_eq!(holes::count(db.conn()).await?, 1);
    assert_eq!(rounds::count(db.conn()).await?, 1);
    Ok(())
}

#[tokio::test]
async fn rounds_without_player_or_course_are_allowed() -> Result<(), Box<dyn std::error::Error>> {
    let db = fresh_db().await?;

    let round = rounds::create_round(db.conn(), RoundCreate::default()).await?;
    assert_eq!(round.player_id, None);
    assert_eq!(round.course_id, None);
    assert_eq!(rounds::player_of(db.conn(), round.id).await?, None);
    assert_eq!(rounds::course_of(db.conn(), round.id).await?, None);

    Ok(())
}
