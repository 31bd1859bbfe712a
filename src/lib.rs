pub mod modules;
mod schema;
pub mod shared;

pub use shared::errors::{AppError, AppResult};
