use std::fmt;

/// Which media slot of a video an upload targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Banner,
    Thumbnail,
    Trailer,
    Video,
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Banner => write!(f, "banner"),
            MediaKind::Thumbnail => write!(f, "thumbnail"),
            MediaKind::Trailer => write!(f, "trailer"),
            MediaKind::Video => write!(f, "video"),
        }
    }
}

/// Command for uploading a media file and attaching it to a video
#[derive(Debug, Clone)]
pub struct UploadMediaCommand {
    pub video_id: String,
    pub kind: MediaKind,
    pub mime_type: String,
    pub data: Vec<u8>,
}
