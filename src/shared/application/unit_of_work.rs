//! Transactional scope coordinating multiple repository writes atomically.

use std::future::Future;

use async_trait::async_trait;

use crate::shared::errors::{AppError, AppResult};

/// Lifecycle of a unit of work: `Idle -> Active -> {Committed, RolledBack}`.
/// Only `Active` participates in the shared transaction; a terminal state
/// requires a fresh `start()` before further work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionState {
    Idle,
    Active,
    Committed,
    RolledBack,
}

impl TransactionState {
    /// Transition into `Active`. Starting while already active is a
    /// programming error; starting again after a terminal state is allowed.
    pub fn begin(&mut self) -> AppResult<()> {
        if *self == TransactionState::Active {
            return Err(AppError::TransactionState(
                "transaction already active".to_string(),
            ));
        }
        *self = TransactionState::Active;
        Ok(())
    }

    /// Transition into `Committed`; only valid from `Active`.
    pub fn commit(&mut self) -> AppResult<()> {
        if *self != TransactionState::Active {
            return Err(AppError::TransactionState(
                "commit without an active transaction".to_string(),
            ));
        }
        *self = TransactionState::Committed;
        Ok(())
    }

    /// Transition into `RolledBack` if active. Returns whether there was an
    /// active transaction to discard; any other state is a no-op.
    pub fn rollback(&mut self) -> bool {
        if *self == TransactionState::Active {
            *self = TransactionState::RolledBack;
            true
        } else {
            false
        }
    }

    pub fn is_active(&self) -> bool {
        *self == TransactionState::Active
    }
}

/// Coordinates repository operations inside one atomic transaction.
///
/// Repositories enlist through the implementation's transaction handle at
/// construction time; the handle is exclusively owned by the unit of work
/// that created it and must never be shared across concurrently active
/// units of work.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Open a new transactional context.
    async fn start(&self) -> AppResult<()>;

    /// Finalize all writes made through enlisted repositories since
    /// `start()`. Terminal; further work needs a new `start()`.
    async fn commit(&self) -> AppResult<()>;

    /// Discard all writes since `start()`. Safe to call from any state;
    /// a no-op unless a transaction is active.
    async fn rollback(&self) -> AppResult<()>;

    fn state(&self) -> TransactionState;
}

/// Scoped-acquisition helper and the only sanctioned way application code
/// drives a unit of work: starts, runs the work, commits on success and
/// returns its value; on failure rolls back and re-raises the original error
/// unchanged, so the transaction is finalized on every exit path.
pub async fn within<T, Fut>(
    uow: &dyn UnitOfWork,
    work: impl FnOnce() -> Fut + Send,
) -> AppResult<T>
where
    Fut: Future<Output = AppResult<T>> + Send,
{
    uow.start().await?;
    match work().await {
        Ok(value) => {
            uow.commit().await?;
            Ok(value)
        }
        Err(err) => {
            uow.rollback().await?;
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_rejects_an_active_transaction() {
        let mut state = TransactionState::Idle;
        state.begin().unwrap();
        assert!(matches!(
            state.begin(),
            Err(AppError::TransactionState(_))
        ));
    }

    #[test]
    fn begin_is_allowed_again_after_a_terminal_state() {
        let mut state = TransactionState::Idle;
        state.begin().unwrap();
        state.commit().unwrap();
        state.begin().unwrap();
        assert!(state.is_active());
    }

    #[test]
    fn commit_requires_an_active_transaction() {
        let mut state = TransactionState::Idle;
        assert!(matches!(
            state.commit(),
            Err(AppError::TransactionState(_))
        ));

        state.begin().unwrap();
        state.commit().unwrap();
        assert!(matches!(
            state.commit(),
            Err(AppError::TransactionState(_))
        ));
    }

    #[test]
    fn rollback_is_a_no_op_outside_active() {
        let mut state = TransactionState::Idle;
        assert!(!state.rollback());

        state.begin().unwrap();
        assert!(state.rollback());
        assert_eq!(state, TransactionState::RolledBack);
        assert!(!state.rollback());
    }
}
