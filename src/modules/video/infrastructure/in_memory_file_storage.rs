use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::modules::video::application::ports::{FileStorage, RawFile};
use crate::shared::errors::AppResult;

/// Map-backed file storage for tests and local development.
#[derive(Default)]
pub struct InMemoryFileStorage {
    files: RwLock<HashMap<String, RawFile>>,
}

impl InMemoryFileStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.files.read().expect("file store lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl FileStorage for InMemoryFileStorage {
    async fn store(&self, file: RawFile) -> AppResult<()> {
        self.files
            .write()
            .expect("file store lock poisoned")
            .insert(file.id.clone(), file);
        Ok(())
    }

    async fn get(&self, id: &str) -> AppResult<Option<RawFile>> {
        Ok(self
            .files
            .read()
            .expect("file store lock poisoned")
            .get(id)
            .cloned())
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        self.files
            .write()
            .expect("file store lock poisoned")
            .remove(id);
        Ok(())
    }
}
