// Shared Kernel - Domain Driven Design
// Following Clean Architecture + Hexagonal Architecture patterns

pub mod application; // Shared application layer patterns
pub mod domain; // Shared domain concepts (identifiers, repository contract, validation)
pub mod errors; // Shared error types
pub mod infrastructure; // Shared infrastructure (database, in-memory store, unit of work)
pub mod utils; // Shared utilities

// Re-exports for convenience
pub use infrastructure::database::Database;
