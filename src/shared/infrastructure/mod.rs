pub mod database;
pub mod in_memory;
pub mod postgres;

pub use database::{Database, DbConnection, DbPool};
pub use in_memory::{InMemoryRepository, InMemoryUnitOfWork, TransactionParticipant};
pub use postgres::{ConnectionSource, PgTransactionHandle, PgUnitOfWork};
