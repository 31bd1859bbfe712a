//! Postgres transaction plumbing shared by every diesel repository: a
//! connection source that either borrows from the pool (auto-commit) or runs
//! on the connection enlisted in a unit of work.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use diesel::connection::{AnsiTransactionManager, TransactionManager};
use diesel::pg::PgConnection;
use tokio::task;

use crate::log_debug;
use crate::shared::application::unit_of_work::{TransactionState, UnitOfWork};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::infrastructure::database::{Database, DbConnection};

/// The transactional context of one [`PgUnitOfWork`]: the pooled connection
/// every enlisted repository call runs on. Exclusively owned by the unit of
/// work that created it; calls serialize on the lock, giving the single
/// linear transaction order the contract requires.
pub type PgTransactionHandle = Arc<Mutex<Option<DbConnection>>>;

/// Where a repository gets its connection from.
#[derive(Clone)]
pub enum ConnectionSource {
    /// One pooled connection per call, auto-commit.
    Pool(Arc<Database>),
    /// The connection enlisted in a unit of work's open transaction.
    Transaction(PgTransactionHandle),
}

impl ConnectionSource {
    /// Run a blocking diesel operation on this source. All database work goes
    /// through here so it always lands on the blocking thread pool.
    pub async fn run<R, F>(&self, op: F) -> AppResult<R>
    where
        R: Send + 'static,
        F: FnOnce(&mut PgConnection) -> AppResult<R> + Send + 'static,
    {
        match self {
            ConnectionSource::Pool(db) => {
                let db = Arc::clone(db);
                task::spawn_blocking(move || {
                    let mut conn = db.get_connection()?;
                    op(&mut conn)
                })
                .await?
            }
            ConnectionSource::Transaction(handle) => {
                let handle = Arc::clone(handle);
                task::spawn_blocking(move || {
                    let mut guard = handle.lock().expect("transaction handle lock poisoned");
                    let conn = guard.as_mut().ok_or_else(|| {
                        AppError::TransactionState(
                            "repository enlisted in a unit of work that is not active".to_string(),
                        )
                    })?;
                    op(&mut *conn)
                })
                .await?
            }
        }
    }
}

/// Unit of work over one Postgres connection.
///
/// `start()` pins a pooled connection and opens a transaction on it;
/// repositories constructed from [`PgUnitOfWork::source`] run on that
/// connection until `commit()` or `rollback()` releases it back to the pool.
pub struct PgUnitOfWork {
    db: Arc<Database>,
    handle: PgTransactionHandle,
    state: Mutex<TransactionState>,
}

impl PgUnitOfWork {
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            db,
            handle: Arc::new(Mutex::new(None)),
            state: Mutex::new(TransactionState::Idle),
        }
    }

    /// Expose the underlying transactional context so repositories can enlist.
    pub fn transaction(&self) -> PgTransactionHandle {
        Arc::clone(&self.handle)
    }

    /// Connection source for repositories participating in this unit of work.
    pub fn source(&self) -> ConnectionSource {
        ConnectionSource::Transaction(self.transaction())
    }

    fn set_state(&self, state: TransactionState) {
        *self.state.lock().expect("state lock poisoned") = state;
    }
}

#[async_trait]
impl UnitOfWork for PgUnitOfWork {
    async fn start(&self) -> AppResult<()> {
        self.state.lock().expect("state lock poisoned").begin()?;

        let db = Arc::clone(&self.db);
        let handle = Arc::clone(&self.handle);
        let opened = task::spawn_blocking(move || -> AppResult<()> {
            let mut conn = db.get_connection()?;
            AnsiTransactionManager::begin_transaction(&mut *conn)?;
            *handle.lock().expect("transaction handle lock poisoned") = Some(conn);
            Ok(())
        })
        .await
        .unwrap_or_else(|join_err| Err(join_err.into()));

        if let Err(err) = opened {
            // Nothing was opened, return to idle so the caller may retry.
            self.set_state(TransactionState::Idle);
            return Err(err);
        }

        log_debug!("Started database transaction");
        Ok(())
    }

    async fn commit(&self) -> AppResult<()> {
        self.state.lock().expect("state lock poisoned").commit()?;

        let handle = Arc::clone(&self.handle);
        task::spawn_blocking(move || -> AppResult<()> {
            let conn = handle
                .lock()
                .expect("transaction handle lock poisoned")
                .take();
            let mut conn = conn.ok_or_else(|| {
                AppError::TransactionState("commit without an enlisted connection".to_string())
            })?;
            AnsiTransactionManager::commit_transaction(&mut *conn)?;
            // Dropping the connection returns it to the pool.
            Ok(())
        })
        .await??;

        log_debug!("Committed database transaction");
        Ok(())
    }

    async fn rollback(&self) -> AppResult<()> {
        let discarded = self.state.lock().expect("state lock poisoned").rollback();
        if !discarded {
            return Ok(());
        }

        let handle = Arc::clone(&self.handle);
        task::spawn_blocking(move || -> AppResult<()> {
            if let Some(mut conn) = handle
                .lock()
                .expect("transaction handle lock poisoned")
                .take()
            {
                AnsiTransactionManager::rollback_transaction(&mut *conn)?;
            }
            Ok(())
        })
        .await??;

        log_debug!("Rolled back database transaction");
        Ok(())
    }

    fn state(&self) -> TransactionState {
        *self.state.lock().expect("state lock poisoned")
    }
}
