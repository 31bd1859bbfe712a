pub mod genre_repository_impl;
pub mod models;

pub use genre_repository_impl::GenreRepositoryImpl;
