use crate::shared::errors::{AppError, AppResult};

/// Two-branch result container used for railway-style aggregate validation.
///
/// Exactly one branch is populated. Unlike `Result`, the failure branch
/// conventionally carries a non-empty list of error records so multiple
/// validation failures can be reported in one pass instead of stopping at
/// the first.
#[derive(Debug, Clone, PartialEq)]
pub enum Either<F, T> {
    Ok(T),
    Fail(F),
}

impl<F, T> Either<F, T> {
    /// Success branch.
    pub fn ok(value: T) -> Self {
        Either::Ok(value)
    }

    /// Failure branch.
    pub fn fail(errors: F) -> Self {
        Either::Fail(errors)
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Either::Ok(_))
    }

    pub fn is_fail(&self) -> bool {
        matches!(self, Either::Fail(_))
    }

    /// Consume the success branch; accessing a failure is an invalid-state
    /// error, never a panic.
    pub fn into_ok(self) -> AppResult<T> {
        match self {
            Either::Ok(value) => Ok(value),
            Either::Fail(_) => Err(AppError::InvalidState(
                "called into_ok on a failure branch".to_string(),
            )),
        }
    }

    /// Consume the failure branch; symmetric to [`Either::into_ok`].
    pub fn into_fail(self) -> AppResult<F> {
        match self {
            Either::Fail(errors) => Ok(errors),
            Either::Ok(_) => Err(AppError::InvalidState(
                "called into_fail on a success branch".to_string(),
            )),
        }
    }

    pub fn as_ok(&self) -> Option<&T> {
        match self {
            Either::Ok(value) => Some(value),
            Either::Fail(_) => None,
        }
    }

    pub fn as_fail(&self) -> Option<&F> {
        match self {
            Either::Fail(errors) => Some(errors),
            Either::Ok(_) => None,
        }
    }

    pub fn map_ok<U>(self, f: impl FnOnce(T) -> U) -> Either<F, U> {
        match self {
            Either::Ok(value) => Either::Ok(f(value)),
            Either::Fail(errors) => Either::Fail(errors),
        }
    }
}
