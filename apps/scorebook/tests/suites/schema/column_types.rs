// SQLite is dynamically typed; the schema rejects values of the wrong storage type.

use scorebook::errors::domain::DomainError;
use scorebook::repos::{courses, players, round_segments, rounds};
use sea_orm::{ConnectionTrait, DbBackend, DbErr, ExecResult, Statement, Value};

use crate::support::{fresh_db, seed_graph};

async fn raw_insert<C: ConnectionTrait>(
    conn: &C,
    sql: &str,
    values: Vec<Value>,
) -> Result<ExecResult, DbErr> {
    conn.execute(Statement::from_sql_and_values(DbBackend::Sqlite, sql, values))
        .await
}

fn assert_type_mismatch(result: Result<ExecResult, DbErr>) {
    match result {
        Err(e) => {
            let err = DomainError::from(e);
            assert!(err.is_type_mismatch(), "unexpected error: {err:?}");
        }
        Ok(_) => panic!("write with a mistyped value was accepted"),
    }
}

#[tokio::test]
async fn round_time_rejects_epoch_numbers() -> Result<(), Box<dyn std::error::Error>> {
    let db = fresh_db().await?;
    let graph = seed_graph(&db.state, 1).await?;
    let sql = "INSERT INTO rounds (player_id, course_id, time) VALUES (?, ?, ?)";

    let epoch_seconds: i64 = 1_712_313_000;
    assert_type_mismatch(
        raw_insert(
            db.conn(),
            sql,
            vec![graph.player.id.into(), graph.course.id.into(), epoch_seconds.into()],
        )
        .await,
    );

    assert_type_mismatch(
        raw_insert(
            db.conn(),
            sql,
            vec![graph.player.id.into(), graph.course.id.into(), 1_712_313_000.25f64.into()],
        )
        .await,
    );

    assert_eq!(rounds::count(db.conn()).await?, 1);
    Ok(())
}

#[tokio::test]
async fn round_time_rejects_text_that_is_not_a_date() -> Result<(), Box<dyn std::error::Error>> {
    let db = fresh_db().await?;
    let graph = seed_graph(&db.state, 1).await?;
    let sql = "INSERT INTO rounds (player_id, course_id, time) VALUES (?, ?, ?)";

    for bad in ["yesterday", "", "2024-13-45 99:99:99"] {
        assert_type_mismatch(
            raw_insert(
                db.conn(),
                sql,
                vec![graph.player.id.into(), graph.course.id.into(), bad.into()],
            )
            .await,
        );
    }

    // reads over the player's and course's rounds still work
    assert_eq!(players::rounds_of(db.conn(), graph.player.id).await?.len(), 1);
    assert_eq!(courses::rounds_of(db.conn(), graph.course.id).await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn throws_rejects_text_and_fractions() -> Result<(), Box<dyn std::error::Error>> {
    let db = fresh_db().await?;
    let graph = seed_graph(&db.state, 1).await?;
    let sql = "INSERT INTO round_segments (round_id, hole_id, throws) VALUES (?, ?, ?)";

    assert_type_mismatch(
        raw_insert(
            db.conn(),
            sql,
            vec![graph.round.id.into(), graph.holes[0].id.into(), "3 throws".into()],
        )
        .await,
    );

    assert_type_mismatch(
        raw_insert(
            db.conn(),
            sql,
            vec![graph.round.id.into(), graph.holes[0].id.into(), 2.5f64.into()],
        )
        .await,
    );

    assert_eq!(round_segments::count(db.conn()).await?, 1);
    Ok(())
}

#[tokio::test]
async fn course_and_hole_numbers_must_be_integers() -> Result<(), Box<dyn std::error::Error>> {
    let db = fresh_db().await?;

    assert_type_mismatch(
        raw_insert(
            db.conn(),
            "INSERT INTO courses (name, num_holes, par_total) VALUES (?, ?, ?)",
            vec!["Fractional Fields".into(), "eighteen".into(), 54i32.into()],
        )
        .await,
    );

    assert_type_mismatch(
        raw_insert(
            db.conn(),
            "INSERT INTO holes (number, par, course_id) VALUES (?, ?, NULL)",
            vec![1i32.into(), 3.5f64.into()],
        )
        .await,
    );

    Ok(())
}

#[tokio::test]
async fn integer_looking_text_is_stored_as_integer() -> Result<(), Box<dyn std::error::Error>> {
    let db = fresh_db().await?;
    let graph = seed_graph(&db.state, 1).await?;

    // INTEGER affinity converts well-formed numeric text before the check runs
    let res = raw_insert(
        db.conn(),
        "INSERT INTO round_segments (round_id, hole_id, throws) VALUES (?, ?, ?)",
        vec![graph.round.id.into(), graph.holes[0].id.into(), "4".into()],
    )
    .await?;

    let id = i64::try_from(res.last_insert_id())?;
    let segment = round_segments::find_by_id(db.conn(), id)
        .await?
        .expect("segment inserted");
    assert_eq!(segment.throws, 4);

    Ok(())
}
