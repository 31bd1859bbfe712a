use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;

use crate::modules::video::application::ports::{FileStorage, RawFile};
use crate::{log_debug, log_warn};
use crate::modules::video::domain::Video;
use crate::shared::application::use_case::UseCase;
use crate::shared::domain::identifier::Identifier;
use crate::shared::domain::repository::Repository;
use crate::shared::errors::{AppError, AppResult};

use super::{
    command::{MediaKind, UploadMediaCommand},
    result::UploadMediaResult,
};

/// Use case handler for uploading one media file of a video.
///
/// The bytes go through the file storage port; the catalog records only the
/// reference id in the target slot. If recording the reference fails, the
/// stored file is removed again so storage holds no unreferenced uploads.
pub struct UploadMediaHandler {
    video_repository: Arc<dyn Repository<Video>>,
    file_storage: Arc<dyn FileStorage>,
}

impl UploadMediaHandler {
    pub fn new(
        video_repository: Arc<dyn Repository<Video>>,
        file_storage: Arc<dyn FileStorage>,
    ) -> Self {
        Self {
            video_repository,
            file_storage,
        }
    }
}

#[async_trait]
impl UseCase<UploadMediaCommand, UploadMediaResult> for UploadMediaHandler {
    async fn execute(&self, command: UploadMediaCommand) -> AppResult<UploadMediaResult> {
        let video_id = Identifier::from_str(&command.video_id)?;
        let mut video = self
            .video_repository
            .find_by_id(&video_id)
            .await?
            .ok_or_else(|| AppError::not_found(video_id, "Video"))?;

        let file_id = format!("videos/{}/{}", video_id, command.kind);
        log_debug!("Storing {} media for video {}", command.kind, video_id);
        self.file_storage
            .store(RawFile::new(
                file_id.clone(),
                command.mime_type,
                command.data,
            ))
            .await?;

        match command.kind {
            MediaKind::Banner => video.set_banner(file_id.clone()),
            MediaKind::Thumbnail => video.set_thumbnail(file_id.clone()),
            MediaKind::Trailer => video.set_trailer(file_id.clone()),
            MediaKind::Video => video.set_media(file_id.clone()),
        }

        if let Err(err) = self.video_repository.update(&video).await {
            // Surface the update failure; the cleanup result must not mask it.
            if let Err(cleanup_err) = self.file_storage.delete(&file_id).await {
                log_warn!(
                    "Failed to remove orphaned file {} after update failure: {}",
                    file_id,
                    cleanup_err
                );
            }
            return Err(err);
        }

        Ok(UploadMediaResult {
            video_id,
            kind: command.kind,
            file_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::mock;
    use mockall::predicate::always;

    use crate::modules::video::domain::{Rating, VideoFilter};
    use crate::modules::video::infrastructure::InMemoryFileStorage;
    use crate::shared::domain::repository::ExistsResult;
    use crate::shared::domain::search::{SearchParams, SearchResult};
    use crate::shared::infrastructure::in_memory::InMemoryRepository;

    mock! {
        FileStore {}

        #[async_trait]
        impl FileStorage for FileStore {
            async fn store(&self, file: RawFile) -> AppResult<()>;
            async fn get(&self, id: &str) -> AppResult<Option<RawFile>>;
            async fn delete(&self, id: &str) -> AppResult<()>;
        }
    }

    mock! {
        VideoRepo {}

        #[async_trait]
        impl Repository<Video> for VideoRepo {
            async fn insert(&self, aggregate: &Video) -> AppResult<()>;
            async fn bulk_insert(&self, aggregates: &[Video]) -> AppResult<()>;
            async fn find_by_id(&self, id: &Identifier) -> AppResult<Option<Video>>;
            async fn find_by_ids(&self, ids: &[Identifier]) -> AppResult<Vec<Video>>;
            async fn exists_by_id(&self, ids: &[Identifier]) -> AppResult<ExistsResult>;
            async fn update(&self, aggregate: &Video) -> AppResult<()>;
            async fn delete(&self, id: &Identifier) -> AppResult<()>;
            async fn search(&self, params: SearchParams<VideoFilter>) -> AppResult<SearchResult<Video>>;
        }
    }

    fn setup() -> (
        Arc<InMemoryRepository<Video>>,
        Arc<InMemoryFileStorage>,
        UploadMediaHandler,
    ) {
        let videos = Arc::new(InMemoryRepository::<Video>::new());
        let storage = Arc::new(InMemoryFileStorage::new());
        let handler = UploadMediaHandler::new(videos.clone(), storage.clone());
        (videos, storage, handler)
    }

    fn video() -> Video {
        Video::new(
            "Heat".to_string(),
            "A film".to_string(),
            1995,
            Some(170),
            Rating::Age16,
            vec![],
            vec![],
            vec![],
        )
        .unwrap()
    }

    #[tokio::test]
    async fn stores_the_file_and_records_the_reference() {
        let (videos, storage, handler) = setup();
        let video = video();
        videos.insert(&video).await.unwrap();

        let result = handler
            .execute(UploadMediaCommand {
                video_id: video.id.to_string(),
                kind: MediaKind::Thumbnail,
                mime_type: "image/jpeg".to_string(),
                data: vec![0xff, 0xd8],
            })
            .await
            .unwrap();

        let stored = videos.find_by_id(&video.id).await.unwrap().unwrap();
        assert_eq!(stored.thumbnail_file_id.as_deref(), Some(result.file_id.as_str()));
        let file = storage.get(&result.file_id).await.unwrap().unwrap();
        assert_eq!(file.mime_type, "image/jpeg");
    }

    #[tokio::test]
    async fn unknown_video_stores_nothing() {
        let (_videos, storage, handler) = setup();

        let err = handler
            .execute(UploadMediaCommand {
                video_id: Identifier::new().to_string(),
                kind: MediaKind::Banner,
                mime_type: "image/png".to_string(),
                data: vec![1],
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound { .. }));
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn failed_reference_update_removes_the_stored_file() {
        let existing = video();
        let mut repo = MockVideoRepo::new();
        let found = existing.clone();
        repo.expect_find_by_id()
            .with(always())
            .returning(move |_| Ok(Some(found.clone())));
        repo.expect_update()
            .with(always())
            .returning(|_| Err(AppError::Persistence("connection lost".to_string())));

        let storage = Arc::new(InMemoryFileStorage::new());
        let handler = UploadMediaHandler::new(Arc::new(repo), storage.clone());

        let err = handler
            .execute(UploadMediaCommand {
                video_id: existing.id.to_string(),
                kind: MediaKind::Video,
                mime_type: "video/mp4".to_string(),
                data: vec![0, 0, 0, 1],
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Persistence(_)));
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn failed_cleanup_does_not_mask_the_update_error() {
        let existing = video();
        let mut repo = MockVideoRepo::new();
        let found = existing.clone();
        repo.expect_find_by_id()
            .with(always())
            .returning(move |_| Ok(Some(found.clone())));
        repo.expect_update()
            .with(always())
            .returning(|_| Err(AppError::Persistence("connection lost".to_string())));

        let mut storage = MockFileStore::new();
        storage.expect_store().with(always()).returning(|_| Ok(()));
        storage
            .expect_delete()
            .with(always())
            .returning(|_| Err(AppError::Persistence("storage offline".to_string())));

        let handler = UploadMediaHandler::new(Arc::new(repo), Arc::new(storage));

        let err = handler
            .execute(UploadMediaCommand {
                video_id: existing.id.to_string(),
                kind: MediaKind::Banner,
                mime_type: "image/png".to_string(),
                data: vec![1, 2],
            })
            .await
            .unwrap_err();

        assert_eq!(
            err,
            AppError::Persistence("connection lost".to_string())
        );
    }
}
