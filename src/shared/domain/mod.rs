//! Shared domain concepts reused by every bounded context: identifiers,
//! the repository/search contract, the two-branch validation result and the
//! existence validator.

pub mod either;
pub mod identifier;
pub mod repository;
pub mod search;
pub mod validation;

pub use either::Either;
pub use identifier::Identifier;
pub use repository::{AggregateRoot, ExistsResult, Repository};
pub use search::{SearchParams, SearchResult, SortDirection, DEFAULT_PER_PAGE};
pub use validation::ExistenceValidator;
