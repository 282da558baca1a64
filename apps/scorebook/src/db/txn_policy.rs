use std::sync::OnceLock;

/// Whether a successful unit of work is committed or rolled back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxnPolicy {
    /// Commit the transaction when the closure succeeds (default)
    CommitOnOk,
    /// Roll back even on success, leaving no side effects
    RollbackOnOk,
}

static POLICY: OnceLock<TxnPolicy> = OnceLock::new();

/// Current process policy; `CommitOnOk` until one is set.
pub fn current() -> TxnPolicy {
    POLICY.get().copied().unwrap_or(TxnPolicy::CommitOnOk)
}

/// Set the transaction policy for the process.
///
/// Only the first call has any effect.
pub fn set_txn_policy(policy: TxnPolicy) {
    let _ = POLICY.set(policy);
}
