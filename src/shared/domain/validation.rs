use std::str::FromStr;
use std::sync::Arc;

use crate::shared::domain::either::Either;
use crate::shared::domain::identifier::Identifier;
use crate::shared::domain::repository::{AggregateRoot, Repository};
use crate::shared::errors::{AppResult, NotFoundError};

/// Checks that a set of foreign aggregate ids exists in that aggregate's
/// storage before another aggregate is allowed to reference them.
///
/// One instance per foreign-aggregate kind; a Video creation use case runs
/// one validator each for categories, genres and cast members and combines
/// the results, so the caller sees the complete list of broken references.
pub struct ExistenceValidator<A: AggregateRoot> {
    repository: Arc<dyn Repository<A>>,
}

impl<A: AggregateRoot> ExistenceValidator<A> {
    pub fn new(repository: Arc<dyn Repository<A>>) -> Self {
        Self { repository }
    }

    /// Validate raw id strings against storage.
    ///
    /// A malformed id fails the whole call with a validation error (caller
    /// input, not a referential-integrity failure). Otherwise a single
    /// batched existence check partitions the set: any absent id puts the
    /// full list of misses in the failure branch; the success branch carries
    /// every typed id in input order.
    pub async fn validate(
        &self,
        raw_ids: &[String],
    ) -> AppResult<Either<Vec<NotFoundError>, Vec<Identifier>>> {
        let ids = raw_ids
            .iter()
            .map(|raw| Identifier::from_str(raw))
            .collect::<AppResult<Vec<_>>>()?;

        // Nothing referenced, nothing to check against storage.
        if ids.is_empty() {
            return Ok(Either::ok(Vec::new()));
        }

        let result = self.repository.exists_by_id(&ids).await?;
        if result.not_exists.is_empty() {
            Ok(Either::ok(ids))
        } else {
            Ok(Either::fail(
                result
                    .not_exists
                    .into_iter()
                    .map(|id| NotFoundError::new(id, A::NAME))
                    .collect(),
            ))
        }
    }

    /// Validate already-typed identifiers, same partitioning semantics.
    pub async fn validate_ids(
        &self,
        ids: &[Identifier],
    ) -> AppResult<Either<Vec<NotFoundError>, Vec<Identifier>>> {
        if ids.is_empty() {
            return Ok(Either::ok(Vec::new()));
        }

        let result = self.repository.exists_by_id(ids).await?;
        if result.not_exists.is_empty() {
            Ok(Either::ok(ids.to_vec()))
        } else {
            Ok(Either::fail(
                result
                    .not_exists
                    .into_iter()
                    .map(|id| NotFoundError::new(id, A::NAME))
                    .collect(),
            ))
        }
    }
}
