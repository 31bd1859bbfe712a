/// Shared application layer patterns
///
/// This module contains application-level abstractions used across
/// multiple bounded contexts.
pub mod unit_of_work;
pub mod use_case;

pub use unit_of_work::{within, TransactionState, UnitOfWork};
pub use use_case::UseCase;
