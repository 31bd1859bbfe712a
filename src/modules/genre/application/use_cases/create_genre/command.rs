/// Command for creating a new genre
#[derive(Debug, Clone)]
pub struct CreateGenreCommand {
    pub name: String,
    /// Ids of categories the genre belongs to, as raw strings from the caller.
    pub category_ids: Vec<String>,
}

impl CreateGenreCommand {
    pub fn new(name: String, category_ids: Vec<String>) -> Self {
        Self { name, category_ids }
    }
}
