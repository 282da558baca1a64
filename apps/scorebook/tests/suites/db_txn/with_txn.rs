use scorebook::db::txn_policy::{self, TxnPolicy};
use scorebook::errors::domain::{DomainError, ValidationKind};
use scorebook::repos::{courses, holes, players};
use scorebook::with_txn;

use crate::support::fresh_db;

#[tokio::test]
async fn default_policy_commits() -> Result<(), Box<dyn std::error::Error>> {
    assert_eq!(txn_policy::current(), TxnPolicy::CommitOnOk);

    let db = fresh_db().await?;
    let course = with_txn(&db.state, |txn| {
        Box::pin(async move {
            let course = courses::create_course(txn, "Hornet's Nest", 2, 6).await?;
            holes::create_hole(txn, Some(course.id), 1, 3).await?;
            holes::create_hole(txn, Some(course.id), 2, 3).await?;
            Ok(course)
        })
    })
    .await?;

    assert_eq!(courses::holes_of(db.conn(), course.id).await?.len(), 2);
    Ok(())
}

#[tokio::test]
async fn error_rolls_back_every_write() -> Result<(), Box<dyn std::error::Error>> {
    let db = fresh_db().await?;

    let result: Result<(), DomainError> = with_txn(&db.state, |txn| {
        Box::pin(async move {
            let course = courses::create_course(txn, "Half Built", 1, 3).await?;
            holes::create_hole(txn, Some(course.id), 1, 3).await?;
            players::create_player(txn, "Eagle McMahon").await?;
            Err(DomainError::validation(
                ValidationKind::Other("abort".into()),
                "scorecard rejected",
            ))
        })
    })
    .await;

    match result {
        Err(DomainError::Validation(ValidationKind::Other(tag), detail)) => {
            assert_eq!(tag, "abort");
            assert_eq!(detail, "scorecard rejected");
        }
        other => panic!("closure error must come back unchanged, got {other:?}"),
    }

    assert_eq!(courses::count(db.conn()).await?, 0);
    assert_eq!(holes::count(db.conn()).await?, 0);
    assert_eq!(players::count(db.conn()).await?, 0);
    Ok(())
}

#[tokio::test]
async fn database_error_mid_unit_rolls_back() -> Result<(), Box<dyn std::error::Error>> {
    let db = fresh_db().await?;

    let err = with_txn(&db.state, |txn| {
        Box::pin(async move {
            let course = courses::create_course(txn, "Dangling", 1, 3).await?;
            holes::create_hole(txn, Some(course.id), 1, 3).await?;
            // no such course
            holes::create_hole(txn, Some(course.id + 100), 2, 3).await
        })
    })
    .await
    .unwrap_err();

    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::ForeignKey, _)
    ));
    assert_eq!(courses::count(db.conn()).await?, 0);
    assert_eq!(holes::count(db.conn()).await?, 0);
    Ok(())
}
