use crate::shared::domain::identifier::Identifier;

/// Result of creating a new category
#[derive(Debug, Clone)]
pub struct CreateCategoryResult {
    pub category_id: Identifier,
    pub name: String,
}

impl CreateCategoryResult {
    pub fn new(category_id: Identifier, name: String) -> Self {
        Self { category_id, name }
    }
}
