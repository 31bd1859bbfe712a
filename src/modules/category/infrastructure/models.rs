use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::modules::category::domain::Category;
use crate::schema::categories;
use crate::shared::domain::identifier::Identifier;

/// Category database row.
#[derive(Queryable, Identifiable, Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = categories)]
#[diesel(treat_none_as_null = true)]
pub struct CategoryRow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&Category> for CategoryRow {
    fn from(entity: &Category) -> Self {
        Self {
            id: entity.id.as_uuid(),
            name: entity.name.clone(),
            description: entity.description.clone(),
            is_active: entity.is_active,
            created_at: entity.created_at,
        }
    }
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category::restore(
            Identifier::from(row.id),
            row.name,
            row.description,
            row.is_active,
            row.created_at,
        )
    }
}
