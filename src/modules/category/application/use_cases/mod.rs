pub mod create_category;

pub use create_category::{CreateCategoryCommand, CreateCategoryHandler, CreateCategoryResult};
