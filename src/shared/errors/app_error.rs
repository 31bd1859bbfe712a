use serde::Serialize;
use thiserror::Error;

use crate::shared::domain::identifier::Identifier;

#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{aggregate} with id {id} not found")]
    NotFound {
        id: Identifier,
        aggregate: &'static str,
    },

    /// Referenced foreign aggregates missing from storage, aggregated so the
    /// caller learns about every broken reference at once. Distinct from
    /// `Validation`: the input was well formed, the references are dangling.
    #[error("{}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join(", "))]
    RelatedNotFound(Vec<NotFoundError>),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Transaction state error: {0}")]
    TransactionState(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl AppError {
    pub fn not_found(id: Identifier, aggregate: &'static str) -> Self {
        AppError::NotFound { id, aggregate }
    }

    /// Fold the broken references collected by existence validation into a
    /// single error carrying every missing id.
    pub fn related_not_found(errors: Vec<NotFoundError>) -> Self {
        AppError::RelatedNotFound(errors)
    }
}

impl From<diesel::result::Error> for AppError {
    fn from(err: diesel::result::Error) -> Self {
        AppError::Persistence(err.to_string())
    }
}

impl From<diesel::r2d2::PoolError> for AppError {
    fn from(err: diesel::r2d2::PoolError) -> Self {
        AppError::Persistence(format!("Database pool error: {}", err))
    }
}

impl From<uuid::Error> for AppError {
    fn from(err: uuid::Error) -> Self {
        AppError::Validation(format!("Invalid UUID: {}", err))
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Persistence(format!("Blocking task failed: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Persistence(format!("Serialization error: {}", err))
    }
}

/// Referenced entity missing from storage.
///
/// Carried in the failure branch of the existence validator so a caller can
/// report every broken reference at once instead of just the first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotFoundError {
    pub id: Identifier,
    pub aggregate: &'static str,
}

impl NotFoundError {
    pub fn new(id: Identifier, aggregate: &'static str) -> Self {
        Self { id, aggregate }
    }
}

impl std::fmt::Display for NotFoundError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} with id {} not found", self.aggregate, self.id)
    }
}

impl From<NotFoundError> for AppError {
    fn from(err: NotFoundError) -> Self {
        AppError::NotFound {
            id: err.id,
            aggregate: err.aggregate,
        }
    }
}

// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
