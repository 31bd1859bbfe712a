pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-exports for easy external access
pub use domain::{Category, CategoryFilter};
pub use infrastructure::CategoryRepositoryImpl;
