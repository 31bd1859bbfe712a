use async_trait::async_trait;

use crate::shared::errors::AppResult;

/// File contents travelling through the storage boundary. The catalog never
/// inspects the bytes; only the reference id is recorded on aggregates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFile {
    pub id: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl RawFile {
    pub fn new(id: impl Into<String>, mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            id: id.into(),
            mime_type: mime_type.into(),
            data,
        }
    }
}

/// Storage boundary for media files.
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Persist the file under its id, replacing any previous contents.
    async fn store(&self, file: RawFile) -> AppResult<()>;

    /// Fetch a stored file; `NotFound` is represented as `None`.
    async fn get(&self, id: &str) -> AppResult<Option<RawFile>>;

    /// Remove a stored file; removing an absent id is a no-op.
    async fn delete(&self, id: &str) -> AppResult<()>;
}
