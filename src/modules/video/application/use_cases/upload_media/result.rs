use crate::shared::domain::identifier::Identifier;

use super::command::MediaKind;

/// Result of uploading a media file
#[derive(Debug, Clone)]
pub struct UploadMediaResult {
    pub video_id: Identifier,
    pub kind: MediaKind,
    /// Reference id recorded on the video, resolvable through file storage.
    pub file_id: String,
}
