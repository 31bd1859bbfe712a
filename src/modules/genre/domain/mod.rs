pub mod entity;

pub use entity::{Genre, GenreFilter};
