use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::errors::AppError;

/// Unique identifier for an aggregate, wrapping a version-4 UUID.
///
/// Two identifiers are equal iff their underlying values match. Created once
/// at aggregate-creation time and never reassigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier(Uuid);

impl Identifier {
    /// Generate a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for Identifier {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for Identifier {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl FromStr for Identifier {
    type Err = AppError;

    /// Parse a raw string into an identifier. A malformed value is a caller
    /// input error, distinct from a missing reference.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let uuid = Uuid::parse_str(raw)
            .map_err(|e| AppError::Validation(format!("Invalid identifier '{}': {}", raw, e)))?;
        Ok(Self(uuid))
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_are_equal_by_value() {
        let uuid = Uuid::new_v4();
        let a = Identifier::from(uuid);
        let b = Identifier::from(uuid);
        assert_eq!(a, b);
        assert_ne!(Identifier::new(), Identifier::new());
    }

    #[test]
    fn parses_valid_uuid_string() {
        let id = Identifier::new();
        let parsed: Identifier = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn malformed_string_is_a_validation_error() {
        let err = "not-a-uuid".parse::<Identifier>().unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
