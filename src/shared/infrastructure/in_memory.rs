//! In-memory storage adapter: one generic repository reused by every
//! aggregate, plus a unit of work giving tests the same transactional
//! surface as the Postgres implementation.

use std::sync::{Arc, Mutex, RwLock};

use async_trait::async_trait;

use crate::shared::application::unit_of_work::{TransactionState, UnitOfWork};
use crate::shared::domain::identifier::Identifier;
use crate::shared::domain::repository::{AggregateRoot, ExistsResult, Repository};
use crate::shared::domain::search::{SearchParams, SearchResult, SortDirection};
use crate::shared::errors::{AppError, AppResult};

/// A store that can enlist in an [`InMemoryUnitOfWork`] by snapshotting its
/// state on start and restoring it on rollback.
pub trait TransactionParticipant: Send + Sync {
    fn snapshot(&self);
    fn restore(&self);
    fn discard(&self);
}

/// Generic in-memory repository backing fast tests.
///
/// Insertion order is preserved, which is what breaks sorting ties during
/// search. All critical sections are short and never held across awaits.
pub struct InMemoryRepository<A: AggregateRoot> {
    store: RwLock<Vec<A>>,
    saved: Mutex<Option<Vec<A>>>,
}

impl<A: AggregateRoot> InMemoryRepository<A> {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Vec::new()),
            saved: Mutex::new(None),
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<A>> {
        self.store.read().expect("store lock poisoned")
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Vec<A>> {
        self.store.write().expect("store lock poisoned")
    }
}

impl<A: AggregateRoot> Default for InMemoryRepository<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: AggregateRoot> TransactionParticipant for InMemoryRepository<A> {
    fn snapshot(&self) {
        let current = self.read().clone();
        *self.saved.lock().expect("snapshot lock poisoned") = Some(current);
    }

    fn restore(&self) {
        if let Some(saved) = self.saved.lock().expect("snapshot lock poisoned").take() {
            *self.write() = saved;
        }
    }

    fn discard(&self) {
        self.saved.lock().expect("snapshot lock poisoned").take();
    }
}

#[async_trait]
impl<A: AggregateRoot> Repository<A> for InMemoryRepository<A> {
    async fn insert(&self, aggregate: &A) -> AppResult<()> {
        let mut store = self.write();
        if store.iter().any(|item| item.id() == aggregate.id()) {
            return Err(AppError::Persistence(format!(
                "{} with id {} already exists",
                A::NAME,
                aggregate.id()
            )));
        }
        store.push(aggregate.clone());
        Ok(())
    }

    async fn bulk_insert(&self, aggregates: &[A]) -> AppResult<()> {
        let mut store = self.write();
        // Validate the whole batch before touching the store, so the write
        // stays all-or-nothing.
        for (index, aggregate) in aggregates.iter().enumerate() {
            let duplicate_in_store = store.iter().any(|item| item.id() == aggregate.id());
            let duplicate_in_batch = aggregates[..index]
                .iter()
                .any(|item| item.id() == aggregate.id());
            if duplicate_in_store || duplicate_in_batch {
                return Err(AppError::Persistence(format!(
                    "{} with id {} already exists",
                    A::NAME,
                    aggregate.id()
                )));
            }
        }
        store.extend(aggregates.iter().cloned());
        Ok(())
    }

    async fn find_by_id(&self, id: &Identifier) -> AppResult<Option<A>> {
        Ok(self.read().iter().find(|item| item.id() == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[Identifier]) -> AppResult<Vec<A>> {
        Ok(self
            .read()
            .iter()
            .filter(|item| ids.contains(item.id()))
            .cloned()
            .collect())
    }

    async fn exists_by_id(&self, ids: &[Identifier]) -> AppResult<ExistsResult> {
        if ids.is_empty() {
            return Ok(ExistsResult::default());
        }
        let store = self.read();
        let found: Vec<Identifier> = store
            .iter()
            .filter(|item| ids.contains(item.id()))
            .map(|item| *item.id())
            .collect();
        Ok(ExistsResult::partition(ids, &found))
    }

    async fn update(&self, aggregate: &A) -> AppResult<()> {
        let mut store = self.write();
        match store.iter_mut().find(|item| item.id() == aggregate.id()) {
            Some(slot) => {
                *slot = aggregate.clone();
                Ok(())
            }
            None => Err(AppError::not_found(*aggregate.id(), A::NAME)),
        }
    }

    async fn delete(&self, id: &Identifier) -> AppResult<()> {
        let mut store = self.write();
        match store.iter().position(|item| item.id() == id) {
            Some(index) => {
                store.remove(index);
                Ok(())
            }
            None => Err(AppError::not_found(*id, A::NAME)),
        }
    }

    async fn search(&self, params: SearchParams<A::Filter>) -> AppResult<SearchResult<A>> {
        let store = self.read();

        let mut filtered: Vec<A> = match params.filter() {
            Some(filter) => store
                .iter()
                .filter(|item| item.matches(filter))
                .cloned()
                .collect(),
            None => store.clone(),
        };
        drop(store);

        if let Some(field) = params.sort() {
            // Stable sort on the field alone, so equal keys keep insertion order.
            match params.sort_dir() {
                SortDirection::Asc => {
                    filtered.sort_by(|a, b| a.sort_value(field).cmp(&b.sort_value(field)));
                }
                SortDirection::Desc => {
                    filtered.sort_by(|a, b| b.sort_value(field).cmp(&a.sort_value(field)));
                }
            }
        }

        let total = filtered.len() as u64;
        let items: Vec<A> = filtered
            .into_iter()
            .skip(params.offset() as usize)
            .take(params.limit() as usize)
            .collect();

        Ok(SearchResult::new(
            items,
            total,
            params.page(),
            params.per_page(),
        ))
    }
}

/// Unit of work over in-memory stores.
///
/// There is no real isolation to provide; the same interface is honored by
/// snapshotting every registered participant on `start()` and restoring on
/// `rollback()`, preserving substitutability with the Postgres unit of work.
pub struct InMemoryUnitOfWork {
    participants: Vec<Arc<dyn TransactionParticipant>>,
    state: Mutex<TransactionState>,
}

/// Placeholder transaction handle for stores with nothing to enlist.
#[derive(Debug, Clone, Copy)]
pub struct NoopTransaction;

impl InMemoryUnitOfWork {
    pub fn new(participants: Vec<Arc<dyn TransactionParticipant>>) -> Self {
        Self {
            participants,
            state: Mutex::new(TransactionState::Idle),
        }
    }

    /// The in-memory stand-in for the Postgres transaction handle.
    pub fn transaction(&self) -> NoopTransaction {
        NoopTransaction
    }
}

#[async_trait]
impl UnitOfWork for InMemoryUnitOfWork {
    async fn start(&self) -> AppResult<()> {
        self.state.lock().expect("state lock poisoned").begin()?;
        for participant in &self.participants {
            participant.snapshot();
        }
        Ok(())
    }

    async fn commit(&self) -> AppResult<()> {
        self.state.lock().expect("state lock poisoned").commit()?;
        for participant in &self.participants {
            participant.discard();
        }
        Ok(())
    }

    async fn rollback(&self) -> AppResult<()> {
        let discarded = self.state.lock().expect("state lock poisoned").rollback();
        if discarded {
            for participant in &self.participants {
                participant.restore();
            }
        }
        Ok(())
    }

    fn state(&self) -> TransactionState {
        *self.state.lock().expect("state lock poisoned")
    }
}
