pub mod create_video;
pub mod upload_media;

pub use create_video::{CreateVideoCommand, CreateVideoHandler, CreateVideoResult};
pub use upload_media::{MediaKind, UploadMediaCommand, UploadMediaHandler, UploadMediaResult};
