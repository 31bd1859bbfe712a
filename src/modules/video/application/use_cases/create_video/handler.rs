use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;

use crate::log_debug;
use crate::modules::cast_member::domain::CastMember;
use crate::modules::category::domain::Category;
use crate::modules::genre::domain::Genre;
use crate::modules::video::domain::{Rating, Video};
use crate::shared::application::unit_of_work::{within, UnitOfWork};
use crate::shared::application::use_case::UseCase;
use crate::shared::domain::either::Either;
use crate::shared::domain::identifier::Identifier;
use crate::shared::domain::repository::Repository;
use crate::shared::domain::validation::ExistenceValidator;
use crate::shared::errors::{AppError, AppResult, NotFoundError};

use super::{command::CreateVideoCommand, result::CreateVideoResult};

/// Use case handler for creating a new video.
///
/// All three referenced aggregate kinds are validated before anything is
/// written, and the failures are combined so the caller learns about every
/// broken reference in one pass. The whole operation runs inside a unit of
/// work; any failure rolls everything back.
pub struct CreateVideoHandler {
    video_repository: Arc<dyn Repository<Video>>,
    category_validator: ExistenceValidator<Category>,
    genre_validator: ExistenceValidator<Genre>,
    cast_member_validator: ExistenceValidator<CastMember>,
    uow: Arc<dyn UnitOfWork>,
}

impl CreateVideoHandler {
    pub fn new(
        video_repository: Arc<dyn Repository<Video>>,
        category_repository: Arc<dyn Repository<Category>>,
        genre_repository: Arc<dyn Repository<Genre>>,
        cast_member_repository: Arc<dyn Repository<CastMember>>,
        uow: Arc<dyn UnitOfWork>,
    ) -> Self {
        Self {
            video_repository,
            category_validator: ExistenceValidator::new(category_repository),
            genre_validator: ExistenceValidator::new(genre_repository),
            cast_member_validator: ExistenceValidator::new(cast_member_repository),
            uow,
        }
    }
}

/// Fold one validator outcome into the running failure list, yielding the
/// typed ids when the outcome was clean.
fn collect(
    outcome: Either<Vec<NotFoundError>, Vec<Identifier>>,
    failures: &mut Vec<NotFoundError>,
) -> AppResult<Vec<Identifier>> {
    if outcome.is_fail() {
        failures.extend(outcome.into_fail()?);
        Ok(Vec::new())
    } else {
        outcome.into_ok()
    }
}

#[async_trait]
impl UseCase<CreateVideoCommand, CreateVideoResult> for CreateVideoHandler {
    async fn execute(&self, command: CreateVideoCommand) -> AppResult<CreateVideoResult> {
        let rating = Rating::from_str(&command.rating)?;

        within(self.uow.as_ref(), || async {
            let mut failures = Vec::new();
            let category_ids = collect(
                self.category_validator.validate(&command.category_ids).await?,
                &mut failures,
            )?;
            let genre_ids = collect(
                self.genre_validator.validate(&command.genre_ids).await?,
                &mut failures,
            )?;
            let cast_member_ids = collect(
                self.cast_member_validator
                    .validate(&command.cast_member_ids)
                    .await?,
                &mut failures,
            )?;
            if !failures.is_empty() {
                return Err(AppError::related_not_found(failures));
            }

            let video = Video::new(
                command.title,
                command.description,
                command.launch_year,
                command.duration,
                rating,
                category_ids,
                genre_ids,
                cast_member_ids,
            )?;
            log_debug!("Creating video '{}' ({})", video.title, video.id);
            self.video_repository.insert(&video).await?;

            Ok(CreateVideoResult::new(video.id, video.title))
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::infrastructure::in_memory::{
        InMemoryRepository, InMemoryUnitOfWork, TransactionParticipant,
    };

    struct Fixture {
        videos: Arc<InMemoryRepository<Video>>,
        categories: Arc<InMemoryRepository<Category>>,
        genres: Arc<InMemoryRepository<Genre>>,
        cast_members: Arc<InMemoryRepository<CastMember>>,
        handler: CreateVideoHandler,
    }

    fn fixture() -> Fixture {
        let videos = Arc::new(InMemoryRepository::<Video>::new());
        let categories = Arc::new(InMemoryRepository::<Category>::new());
        let genres = Arc::new(InMemoryRepository::<Genre>::new());
        let cast_members = Arc::new(InMemoryRepository::<CastMember>::new());
        let uow = Arc::new(InMemoryUnitOfWork::new(vec![
            videos.clone() as Arc<dyn TransactionParticipant>,
            categories.clone() as Arc<dyn TransactionParticipant>,
            genres.clone() as Arc<dyn TransactionParticipant>,
            cast_members.clone() as Arc<dyn TransactionParticipant>,
        ]));
        let handler = CreateVideoHandler::new(
            videos.clone(),
            categories.clone(),
            genres.clone(),
            cast_members.clone(),
            uow,
        );
        Fixture {
            videos,
            categories,
            genres,
            cast_members,
            handler,
        }
    }

    fn command(
        category_ids: Vec<String>,
        genre_ids: Vec<String>,
        cast_member_ids: Vec<String>,
    ) -> CreateVideoCommand {
        CreateVideoCommand {
            title: "Heat".to_string(),
            description: "A film".to_string(),
            launch_year: 1995,
            duration: Some(170),
            rating: "16".to_string(),
            category_ids,
            genre_ids,
            cast_member_ids,
        }
    }

    #[tokio::test]
    async fn creates_a_video_when_all_references_exist() {
        let f = fixture();
        let category = Category::new("Movies".to_string(), None).unwrap();
        f.categories.insert(&category).await.unwrap();
        let genre = Genre::new("Crime".to_string(), vec![category.id]).unwrap();
        f.genres.insert(&genre).await.unwrap();
        let actor =
            CastMember::new("Al Pacino".to_string(), crate::modules::cast_member::CastMemberKind::Actor)
                .unwrap();
        f.cast_members.insert(&actor).await.unwrap();

        let result = f
            .handler
            .execute(command(
                vec![category.id.to_string()],
                vec![genre.id.to_string()],
                vec![actor.id.to_string()],
            ))
            .await
            .unwrap();

        let stored = f.videos.find_by_id(&result.video_id).await.unwrap().unwrap();
        assert_eq!(stored.category_ids, vec![category.id]);
        assert_eq!(stored.genre_ids, vec![genre.id]);
        assert_eq!(stored.cast_member_ids, vec![actor.id]);
    }

    #[tokio::test]
    async fn reports_every_broken_reference_at_once() {
        let f = fixture();
        let missing_genre = Identifier::new();
        let missing_actor = Identifier::new();

        let err = f
            .handler
            .execute(command(
                vec![],
                vec![missing_genre.to_string()],
                vec![missing_actor.to_string()],
            ))
            .await
            .unwrap_err();

        match err {
            AppError::RelatedNotFound(misses) => {
                let ids: Vec<Identifier> = misses.iter().map(|miss| miss.id).collect();
                assert!(ids.contains(&missing_genre));
                assert!(ids.contains(&missing_actor));
            }
            other => panic!("expected related-not-found error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn broken_reference_persists_nothing() {
        let f = fixture();
        let category = Category::new("Movies".to_string(), None).unwrap();
        f.categories.insert(&category).await.unwrap();

        let err = f
            .handler
            .execute(command(
                vec![category.id.to_string()],
                vec![Identifier::new().to_string()],
                vec![],
            ))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::RelatedNotFound(_)));
        let page = f.videos.search(Default::default()).await.unwrap();
        assert_eq!(page.total, 0);
    }

    #[tokio::test]
    async fn unknown_rating_fails_before_any_lookup() {
        let f = fixture();
        let mut cmd = command(vec![], vec![], vec![]);
        cmd.rating = "PG-13".to_string();

        let err = f.handler.execute(cmd).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
