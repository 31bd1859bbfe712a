pub mod ports;
pub mod use_cases;

pub use ports::{FileStorage, RawFile};
pub use use_cases::{
    CreateVideoCommand, CreateVideoHandler, CreateVideoResult, MediaKind, UploadMediaCommand,
    UploadMediaHandler, UploadMediaResult,
};
