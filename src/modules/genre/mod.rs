pub mod application;
pub mod domain;
pub mod infrastructure;

pub use domain::{Genre, GenreFilter};
pub use infrastructure::GenreRepositoryImpl;
