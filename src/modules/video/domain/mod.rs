pub mod entity;

pub use entity::{Rating, Video, VideoFilter};
