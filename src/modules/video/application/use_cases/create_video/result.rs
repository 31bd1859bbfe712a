use crate::shared::domain::identifier::Identifier;

/// Result of creating a new video
#[derive(Debug, Clone)]
pub struct CreateVideoResult {
    pub video_id: Identifier,
    pub title: String,
}

impl CreateVideoResult {
    pub fn new(video_id: Identifier, title: String) -> Self {
        Self { video_id, title }
    }
}
