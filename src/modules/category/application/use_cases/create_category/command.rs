/// Command for creating a new category
#[derive(Debug, Clone)]
pub struct CreateCategoryCommand {
    pub name: String,
    pub description: Option<String>,
}

impl CreateCategoryCommand {
    pub fn new(name: String, description: Option<String>) -> Self {
        Self { name, description }
    }
}
