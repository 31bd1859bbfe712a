use std::str::FromStr;

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::modules::cast_member::domain::{CastMember, CastMemberKind};
use crate::schema::cast_members;
use crate::shared::domain::identifier::Identifier;
use crate::shared::errors::AppResult;

/// Cast member database row; the kind is stored in its string form.
#[derive(Queryable, Identifiable, Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = cast_members)]
pub struct CastMemberRow {
    pub id: Uuid,
    pub name: String,
    pub kind: String,
    pub created_at: DateTime<Utc>,
}

impl From<&CastMember> for CastMemberRow {
    fn from(entity: &CastMember) -> Self {
        Self {
            id: entity.id.as_uuid(),
            name: entity.name.clone(),
            kind: entity.kind.to_string(),
            created_at: entity.created_at,
        }
    }
}

impl CastMemberRow {
    /// A row with an unknown kind string surfaces as a persistence-level
    /// validation error rather than a silent default.
    pub fn into_entity(self) -> AppResult<CastMember> {
        let kind = CastMemberKind::from_str(&self.kind)?;
        Ok(CastMember::restore(
            Identifier::from(self.id),
            self.name,
            kind,
            self.created_at,
        ))
    }
}
