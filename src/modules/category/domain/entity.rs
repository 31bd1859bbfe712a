use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::shared::domain::identifier::Identifier;
use crate::shared::domain::repository::AggregateRoot;
use crate::shared::errors::AppResult;
use crate::shared::utils::Validator;

/// Search filter for categories: a term matched against the name.
pub type CategoryFilter = String;

#[derive(Debug, Clone, Serialize)]
pub struct Category {
    pub id: Identifier,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Category {
    pub fn new(name: String, description: Option<String>) -> AppResult<Self> {
        Validator::validate_name("Category name", &name)?;
        Ok(Self {
            id: Identifier::new(),
            name,
            description,
            is_active: true,
            created_at: Utc::now(),
        })
    }

    /// Rebuild from storage; fields were validated when first created.
    pub fn restore(
        id: Identifier,
        name: String,
        description: Option<String>,
        is_active: bool,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            description,
            is_active,
            created_at,
        }
    }

    pub fn update(&mut self, name: String, description: Option<String>) -> AppResult<()> {
        Validator::validate_name("Category name", &name)?;
        self.name = name;
        self.description = description;
        Ok(())
    }

    pub fn activate(&mut self) {
        self.is_active = true;
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
    }
}

impl AggregateRoot for Category {
    const NAME: &'static str = "Category";
    type Filter = CategoryFilter;

    fn id(&self) -> &Identifier {
        &self.id
    }

    fn matches(&self, filter: &CategoryFilter) -> bool {
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
    fn new_category_is_active_by_default() {
        let category = Category::new("Movies".to_string(), None).unwrap();
        assert!(category.is_active);
        assert_eq!(category.name, "Movies");
    }

    #[test]
    fn rejects_blank_name() {
        assert!(Category::new("  ".to_string(), None).is_err());
    }

    #[test]
    fn matches_filter_case_insensitively() {
        let category = Category::new("Documentary".to_string(), None).unwrap();
        assert!(category.matches(&"docu".to_string()));
        assert!(!category.matches(&"series".to_string()));
    }

    #[test]
    fn activate_and_deactivate_toggle_state() {
        let mut category = Category::new("Movies".to_string(), None).unwrap();
        category.deactivate();
        assert!(!category.is_active);
        category.activate();
        assert!(category.is_active);
    }
}
