use crate::shared::domain::identifier::Identifier;

/// Result of creating a new genre
#[derive(Debug, Clone)]
pub struct CreateGenreResult {
    pub genre_id: Identifier,
    pub name: String,
}

impl CreateGenreResult {
    pub fn new(genre_id: Identifier, name: String) -> Self {
        Self { genre_id, name }
    }
}
