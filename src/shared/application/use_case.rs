use crate::shared::errors::AppResult;
use async_trait::async_trait;

/// Base trait for use cases (command handlers).
///
/// Every application operation is a handler taking one command and producing
/// one result, so wiring and testing stay uniform across bounded contexts.
#[async_trait]
pub trait UseCase<TCommand, TResult>: Send + Sync {
    /// Execute the use case with the given command.
    async fn execute(&self, command: TCommand) -> AppResult<TResult>;
}
