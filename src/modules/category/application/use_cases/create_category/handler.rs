use async_trait::async_trait;
use std::sync::Arc;

use crate::log_debug;
use crate::modules::category::domain::Category;
use crate::shared::application::use_case::UseCase;
use crate::shared::domain::repository::Repository;
use crate::shared::errors::AppResult;

use super::{command::CreateCategoryCommand, result::CreateCategoryResult};

/// Use case handler for creating a new category
pub struct CreateCategoryHandler {
    category_repository: Arc<dyn Repository<Category>>,
}

impl CreateCategoryHandler {
    pub fn new(category_repository: Arc<dyn Repository<Category>>) -> Self {
        Self {
            category_repository,
        }
    }
}

#[async_trait]
impl UseCase<CreateCategoryCommand, CreateCategoryResult> for CreateCategoryHandler {
    async fn execute(&self, command: CreateCategoryCommand) -> AppResult<CreateCategoryResult> {
        let category = Category::new(command.name, command.description)?;

        log_debug!("Creating category '{}' ({})", category.name, category.id);
        self.category_repository.insert(&category).await?;

        Ok(CreateCategoryResult::new(category.id, category.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::errors::AppError;
    use crate::shared::infrastructure::in_memory::InMemoryRepository;

    #[tokio::test]
    async fn creates_and_persists_a_category() {
        let repo = Arc::new(InMemoryRepository::<Category>::new());
        let handler = CreateCategoryHandler::new(repo.clone());

        let result = handler
            .execute(CreateCategoryCommand::new(
                "Movies".to_string(),
                Some("Feature films".to_string()),
            ))
            .await
            .unwrap();

        let stored = repo.find_by_id(&result.category_id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Movies");
        assert!(stored.is_active);
    }

    #[tokio::test]
    async fn invalid_name_is_rejected_before_persistence() {
        let repo = Arc::new(InMemoryRepository::<Category>::new());
        let handler = CreateCategoryHandler::new(repo.clone());

        let err = handler
            .execute(CreateCategoryCommand::new("".to_string(), None))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
