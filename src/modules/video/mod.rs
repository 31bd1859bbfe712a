pub mod application;
pub mod domain;
pub mod infrastructure;

pub use domain::{Rating, Video, VideoFilter};
pub use infrastructure::{InMemoryFileStorage, VideoRepositoryImpl};
