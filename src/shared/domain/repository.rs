use async_trait::async_trait;

use crate::shared::domain::identifier::Identifier;
use crate::shared::domain::search::{SearchParams, SearchResult};
use crate::shared::errors::AppResult;

/// A domain entity with identity, addressable through a [`Repository`].
///
/// `Filter` is the aggregate-specific search filter shape. The predicate
/// methods express filter matching and sort-field access once, in the domain,
/// so the in-memory store applies exactly the semantics the storage adapter
/// implements in SQL.
pub trait AggregateRoot: Clone + Send + Sync + 'static {
    /// Human-readable aggregate name used in not-found reporting.
    const NAME: &'static str;

    type Filter: Clone + Send + Sync + 'static;

    fn id(&self) -> &Identifier;

    /// Whether this aggregate matches the given search filter.
    fn matches(&self, filter: &Self::Filter) -> bool;

    /// Comparable value of the named sort field, if the field is sortable.
    fn sort_value(&self, field: &str) -> Option<String>;
}

/// Partition of a requested id set into the ids present in storage and the
/// ids absent from it. Exhaustive and disjoint by construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExistsResult {
    pub exists: Vec<Identifier>,
    pub not_exists: Vec<Identifier>,
}

impl ExistsResult {
    /// Partition `requested` given the subset of ids found in storage,
    /// preserving the requested order in both branches.
    pub fn partition(requested: &[Identifier], found: &[Identifier]) -> Self {
        let mut exists = Vec::new();
        let mut not_exists = Vec::new();
        for id in requested {
            if found.contains(id) {
                exists.push(*id);
            } else {
                not_exists.push(*id);
            }
        }
        Self { exists, not_exists }
    }
}

/// Storage-access capability set shared by every aggregate.
///
/// One interface reused by all four aggregates gives every use case the same
/// pagination/sorting semantics and the same existence-check idiom for
/// cross-aggregate validation.
#[async_trait]
pub trait Repository<A: AggregateRoot>: Send + Sync {
    /// Persist a new aggregate. Inserting an id that already exists is an
    /// error; idempotency is not guaranteed.
    async fn insert(&self, aggregate: &A) -> AppResult<()>;

    /// Persist a batch, all-or-nothing. Implementations without an atomic
    /// bulk write must run under a unit of work.
    async fn bulk_insert(&self, aggregates: &[A]) -> AppResult<()>;

    /// Absence is a normal outcome, not an error.
    async fn find_by_id(&self, id: &Identifier) -> AppResult<Option<A>>;

    /// Returns only the subset found; missing ids are silently omitted.
    /// Callers needing strict existence use [`Repository::exists_by_id`].
    async fn find_by_ids(&self, ids: &[Identifier]) -> AppResult<Vec<A>>;

    /// Single round trip partitioning the requested ids. Never fails merely
    /// because some ids are absent.
    async fn exists_by_id(&self, ids: &[Identifier]) -> AppResult<ExistsResult>;

    /// Fails with a not-found error if the aggregate's id does not exist.
    async fn update(&self, aggregate: &A) -> AppResult<()>;

    /// Fails with a not-found error if the id does not exist.
    async fn delete(&self, id: &Identifier) -> AppResult<()>;

    /// Filter, then stable sort (ties broken by insertion/creation order),
    /// then paginate. `total` covers the filtered pre-pagination set.
    async fn search(&self, params: SearchParams<A::Filter>) -> AppResult<SearchResult<A>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partition_is_exhaustive_and_disjoint() {
        let a = Identifier::new();
        let b = Identifier::new();
        let c = Identifier::new();

        let result = ExistsResult::partition(&[a, b, c], &[c, a]);
        assert_eq!(result.exists, vec![a, c]);
        assert_eq!(result.not_exists, vec![b]);

        let total = result.exists.len() + result.not_exists.len();
        assert_eq!(total, 3);
        assert!(result.exists.iter().all(|id| !result.not_exists.contains(id)));
    }

    #[test]
    fn empty_request_partitions_to_empty_sets() {
        let result = ExistsResult::partition(&[], &[]);
        assert!(result.exists.is_empty());
        assert!(result.not_exists.is_empty());
    }
}
