use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::modules::genre::domain::Genre;
use crate::schema::{genre_categories, genres};

/// Genre database row, without the category associations.
#[derive(Queryable, Identifiable, Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = genres)]
pub struct GenreRow {
    pub id: Uuid,
    pub name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&Genre> for GenreRow {
    fn from(entity: &Genre) -> Self {
        Self {
            id: entity.id.as_uuid(),
            name: entity.name.clone(),
            is_active: entity.is_active,
            created_at: entity.created_at,
        }
    }
}

#[derive(Queryable, Insertable, Debug, Clone)]
#[diesel(table_name = genre_categories)]
pub struct GenreCategoryRow {
    pub genre_id: Uuid,
    pub category_id: Uuid,
}

impl GenreCategoryRow {
    pub fn for_genre(entity: &Genre) -> Vec<Self> {
        entity
            .category_ids
            .iter()
            .map(|category_id| Self {
                genre_id: entity.id.as_uuid(),
                category_id: category_id.as_uuid(),
            })
            .collect()
    }
}
