pub mod create_genre;

pub use create_genre::{CreateGenreCommand, CreateGenreHandler, CreateGenreResult};
