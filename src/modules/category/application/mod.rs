pub mod use_cases;

pub use use_cases::{CreateCategoryCommand, CreateCategoryHandler, CreateCategoryResult};
