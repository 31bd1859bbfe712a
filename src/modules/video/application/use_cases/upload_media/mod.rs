mod command;
mod handler;
mod result;

pub use command::{MediaKind, UploadMediaCommand};
pub use handler::UploadMediaHandler;
pub use result::UploadMediaResult;
