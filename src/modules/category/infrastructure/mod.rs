pub mod category_repository_impl;
pub mod models;

pub use category_repository_impl::CategoryRepositoryImpl;
