use async_trait::async_trait;
use std::sync::Arc;

use crate::log_debug;
use crate::modules::category::domain::Category;
use crate::modules::genre::domain::Genre;
use crate::shared::application::unit_of_work::{within, UnitOfWork};
use crate::shared::application::use_case::UseCase;
use crate::shared::domain::repository::Repository;
use crate::shared::domain::validation::ExistenceValidator;
use crate::shared::errors::{AppError, AppResult};

use super::{command::CreateGenreCommand, result::CreateGenreResult};

/// Use case handler for creating a new genre.
///
/// Referenced categories are checked for existence and the genre is
/// persisted inside one unit of work, so a broken reference leaves no
/// partial state behind.
pub struct CreateGenreHandler {
    genre_repository: Arc<dyn Repository<Genre>>,
    category_validator: ExistenceValidator<Category>,
    uow: Arc<dyn UnitOfWork>,
}

impl CreateGenreHandler {
    pub fn new(
        genre_repository: Arc<dyn Repository<Genre>>,
        category_repository: Arc<dyn Repository<Category>>,
        uow: Arc<dyn UnitOfWork>,
    ) -> Self {
        Self {
            genre_repository,
            category_validator: ExistenceValidator::new(category_repository),
            uow,
        }
    }
}

#[async_trait]
impl UseCase<CreateGenreCommand, CreateGenreResult> for CreateGenreHandler {
    async fn execute(&self, command: CreateGenreCommand) -> AppResult<CreateGenreResult> {
        within(self.uow.as_ref(), || async {
            let outcome = self
                .category_validator
                .validate(&command.category_ids)
                .await?;
            if outcome.is_fail() {
                return Err(AppError::related_not_found(outcome.into_fail()?));
            }
            let category_ids = outcome.into_ok()?;

            let genre = Genre::new(command.name, category_ids)?;
            log_debug!("Creating genre '{}' ({})", genre.name, genre.id);
            self.genre_repository.insert(&genre).await?;

            Ok(CreateGenreResult::new(genre.id, genre.name))
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::errors::AppError;
    use crate::shared::infrastructure::in_memory::{
        InMemoryRepository, InMemoryUnitOfWork, TransactionParticipant,
    };

    fn handler() -> (
        Arc<InMemoryRepository<Genre>>,
        Arc<InMemoryRepository<Category>>,
        CreateGenreHandler,
    ) {
        let genres = Arc::new(InMemoryRepository::<Genre>::new());
        let categories = Arc::new(InMemoryRepository::<Category>::new());
        let uow = Arc::new(InMemoryUnitOfWork::new(vec![
            genres.clone() as Arc<dyn TransactionParticipant>,
            categories.clone() as Arc<dyn TransactionParticipant>,
        ]));
        let handler = CreateGenreHandler::new(genres.clone(), categories.clone(), uow);
        (genres, categories, handler)
    }

    #[tokio::test]
    async fn creates_a_genre_linked_to_existing_categories() {
        let (genres, categories, handler) = handler();
        let category = Category::new("Movies".to_string(), None).unwrap();
        categories.insert(&category).await.unwrap();

        let result = handler
            .execute(CreateGenreCommand::new(
                "Drama".to_string(),
                vec![category.id.to_string()],
            ))
            .await
            .unwrap();

        let stored = genres.find_by_id(&result.genre_id).await.unwrap().unwrap();
        assert_eq!(stored.category_ids, vec![category.id]);
    }

    #[tokio::test]
    async fn missing_category_fails_and_persists_nothing() {
        let (genres, _categories, handler) = handler();
        let missing = crate::shared::domain::identifier::Identifier::new();

        let err = handler
            .execute(CreateGenreCommand::new(
                "Drama".to_string(),
                vec![missing.to_string()],
            ))
            .await
            .unwrap_err();

        match err {
            AppError::RelatedNotFound(misses) => {
                assert_eq!(misses.len(), 1);
                assert_eq!(misses[0].id, missing);
                assert_eq!(misses[0].aggregate, "Category");
            }
            other => panic!("expected related-not-found error, got {:?}", other),
        }
        let page = genres
            .search(Default::default())
            .await
            .unwrap();
        assert_eq!(page.total, 0);
    }
}
