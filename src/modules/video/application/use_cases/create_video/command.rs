/// Command for creating a new video
#[derive(Debug, Clone)]
pub struct CreateVideoCommand {
    pub title: String,
    pub description: String,
    pub launch_year: i32,
    pub duration: Option<i32>,
    /// Rating in its string form, e.g. "L" or "16".
    pub rating: String,
    pub category_ids: Vec<String>,
    pub genre_ids: Vec<String>,
    pub cast_member_ids: Vec<String>,
}
