use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::shared::domain::identifier::Identifier;
use crate::shared::domain::repository::AggregateRoot;
use crate::shared::errors::AppResult;
use crate::shared::utils::Validator;

/// Search filter for genres: a term matched against the name.
pub type GenreFilter = String;

/// Genre aggregate. The referenced category ids are foreign and must be
/// validated for existence before the genre is persisted.
#[derive(Debug, Clone, Serialize)]
pub struct Genre {
    pub id: Identifier,
    pub name: String,
    pub is_active: bool,
    pub category_ids: Vec<Identifier>,
    pub created_at: DateTime<Utc>,
}

impl Genre {
    pub fn new(name: String, category_ids: Vec<Identifier>) -> AppResult<Self> {
        Validator::validate_name("Genre name", &name)?;
        Ok(Self {
            id: Identifier::new(),
            name,
            is_active: true,
            category_ids,
            created_at: Utc::now(),
        })
    }

    /// Rebuild from storage; fields were validated when first created.
    pub fn restore(
        id: Identifier,
        name: String,
        is_active: bool,
        category_ids: Vec<Identifier>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            is_active,
            category_ids,
            created_at,
        }
    }

    pub fn rename(&mut self, name: String) -> AppResult<()> {
        Validator::validate_name("Genre name", &name)?;
        self.name = name;
        Ok(())
    }

    pub fn add_category(&mut self, category_id: Identifier) {
        if !self.category_ids.contains(&category_id) {
            self.category_ids.push(category_id);
        }
    }

    pub fn remove_category(&mut self, category_id: &Identifier) {
        self.category_ids.retain(|id| id != category_id);
    }

    pub fn activate(&mut self) {
        self.is_active = true;
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
    }
}

impl AggregateRoot for Genre {
    const NAME: &'static str = "Genre";
    type Filter = GenreFilter;

    fn id(&self) -> &Identifier {
        &self.id
    }

    fn matches(&self, filter: &GenreFilter) -> bool {
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
    fn new_genre_keeps_referenced_categories() {
        let category_id = Identifier::new();
        let genre = Genre::new("Drama".to_string(), vec![category_id]).unwrap();
        assert_eq!(genre.category_ids, vec![category_id]);
        assert!(genre.is_active);
    }

    #[test]
    fn add_category_is_idempotent() {
        let mut genre = Genre::new("Drama".to_string(), vec![]).unwrap();
        let category_id = Identifier::new();
        genre.add_category(category_id);
        genre.add_category(category_id);
        assert_eq!(genre.category_ids.len(), 1);
    }

    #[test]
    fn rejects_blank_name() {
        assert!(Genre::new(" ".to_string(), vec![]).is_err());
    }
}
