pub mod in_memory_file_storage;
pub mod models;
pub mod video_repository_impl;

pub use in_memory_file_storage::InMemoryFileStorage;
pub use video_repository_impl::VideoRepositoryImpl;
