use std::future::Future;
use std::pin::Pin;

use sea_orm::{DatabaseTransaction, TransactionTrait};
use tracing::debug;

use super::txn_policy::{self, TxnPolicy};
use crate::errors::domain::DomainError;
use crate::state::app_state::AppState;

/// Boxed future borrowing the transaction for `'c`.
pub type TxnFuture<'c, R> = Pin<Box<dyn Future<Output = Result<R, DomainError>> + Send + 'c>>;

/// Run `f` as one unit of work.
///
/// Begins a transaction, runs the closure, then applies the process policy on `Ok`
/// (commit by default) or rolls back on `Err`, returning the closure's error unchanged.
pub async fn with_txn<R, F>(state: &AppState, f: F) -> Result<R, DomainError>
where
    F: for<'c> FnOnce(&'c DatabaseTransaction) -> TxnFuture<'c, R>,
{
    let txn = state.db().begin().await?;
    let out = f(&txn).await;

    match out {
        Ok(val) => match txn_policy::current() {
            TxnPolicy::CommitOnOk => {
                txn.commit().await?;
                Ok(val)
            }
            TxnPolicy::RollbackOnOk => {
                txn.rollback().await?;
                Ok(val)
            }
        },
        Err(err) => {
            debug!(error = %err, "rolling back unit of work");
            // best-effort rollback; the closure's error wins
            let _ = txn.rollback().await;
            Err(err)
        }
    }
}
