use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::shared::domain::identifier::Identifier;
use crate::shared::domain::repository::AggregateRoot;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::Validator;

/// Search filter for cast members: a term matched against the name.
pub type CastMemberFilter = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CastMemberKind {
    Director,
    Actor,
}

impl fmt::Display for CastMemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CastMemberKind::Director => write!(f, "director"),
            CastMemberKind::Actor => write!(f, "actor"),
        }
    }
}

impl FromStr for CastMemberKind {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "director" => Ok(CastMemberKind::Director),
            "actor" => Ok(CastMemberKind::Actor),
            other => Err(AppError::Validation(format!(
                "Unknown cast member kind: {}",
                other
            ))),
        }
    }
}

/// Cast member aggregate: a person credited on videos as director or actor.
#[derive(Debug, Clone, Serialize)]
pub struct CastMember {
    pub id: Identifier,
    pub name: String,
    pub kind: CastMemberKind,
    pub created_at: DateTime<Utc>,
}

impl CastMember {
    pub fn new(name: String, kind: CastMemberKind) -> AppResult<Self> {
        Validator::validate_name("Cast member name", &name)?;
        Ok(Self {
            id: Identifier::new(),
            name,
            kind,
            created_at: Utc::now(),
        })
    }

    /// Rebuild from storage; fields were validated when first created.
    pub fn restore(
        id: Identifier,
        name: String,
        kind: CastMemberKind,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            kind,
            created_at,
        }
    }

    pub fn rename(&mut self, name: String) -> AppResult<()> {
        Validator::validate_name("Cast member name", &name)?;
        self.name = name;
        Ok(())
    }

    pub fn change_kind(&mut self, kind: CastMemberKind) {
        self.kind = kind;
    }
}

impl AggregateRoot for CastMember {
    const NAME: &'static str = "CastMember";
    type Filter = CastMemberFilter;

    fn id(&self) -> &Identifier {
        &self.id
    }

    fn matches(&self, filter: &CastMemberFilter) -> bool {
        self.name.to_lowercase().contains(&filter.to_lowercase())
    }

    fn sort_value(&self, field: &str) -> Option<String> {
        match field {
            "name" => Some(self.name.clone()),
            "created_at" => Some(self.created_at.to_rfc3339()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_through_its_string_form() {
        assert_eq!(
            CastMemberKind::from_str("director").unwrap(),
            CastMemberKind::Director
        );
        assert_eq!(CastMemberKind::Actor.to_string(), "actor");
    }

    #[test]
    fn unknown_kind_is_rejected() {
        assert!(matches!(
            CastMemberKind::from_str("producer"),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn new_cast_member_validates_the_name() {
        assert!(CastMember::new("".to_string(), CastMemberKind::Actor).is_err());
        let member = CastMember::new("Alice".to_string(), CastMemberKind::Director).unwrap();
        assert_eq!(member.kind, CastMemberKind::Director);
    }
}
