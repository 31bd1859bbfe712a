use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::shared::domain::identifier::Identifier;
use crate::shared::domain::repository::AggregateRoot;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::Validator;

/// Age rating, stored in its string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Rating {
    L,
    Age10,
    Age12,
    Age14,
    Age16,
    Age18,
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Rating::L => "L",
            Rating::Age10 => "10",
            Rating::Age12 => "12",
            Rating::Age14 => "14",
            Rating::Age16 => "16",
            Rating::Age18 => "18",
        };
        write!(f, "{}", value)
    }
}

impl FromStr for Rating {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "L" => Ok(Rating::L),
            "10" => Ok(Rating::Age10),
            "12" => Ok(Rating::Age12),
            "14" => Ok(Rating::Age14),
            "16" => Ok(Rating::Age16),
            "18" => Ok(Rating::Age18),
            other => Err(AppError::Validation(format!("Unknown rating: {}", other))),
        }
    }
}

/// Search filter for videos: an optional term matched against the title plus
/// optional associated-id restrictions. Empty id lists impose no restriction.
#[derive(Debug, Clone, Default)]
pub struct VideoFilter {
    pub term: Option<String>,
    pub category_ids: Vec<Identifier>,
    pub genre_ids: Vec<Identifier>,
    pub cast_member_ids: Vec<Identifier>,
}

impl VideoFilter {
    pub fn with_term(term: impl Into<String>) -> Self {
        Self {
            term: Some(term.into()),
            ..Self::default()
        }
    }
}

/// Video aggregate. The three foreign id lists must be validated for
/// existence before the video is persisted; the media file ids are opaque
/// references into file storage.
#[derive(Debug, Clone, Serialize)]
pub struct Video {
    pub id: Identifier,
    pub title: String,
    pub description: String,
    pub launch_year: i32,
    pub duration: Option<i32>,
    pub rating: Rating,
    pub published: bool,
    pub banner_file_id: Option<String>,
    pub thumbnail_file_id: Option<String>,
    pub trailer_file_id: Option<String>,
    pub media_file_id: Option<String>,
    pub category_ids: Vec<Identifier>,
    pub genre_ids: Vec<Identifier>,
    pub cast_member_ids: Vec<Identifier>,
    pub created_at: DateTime<Utc>,
}

impl Video {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        title: String,
        description: String,
        launch_year: i32,
        duration: Option<i32>,
        rating: Rating,
        category_ids: Vec<Identifier>,
        genre_ids: Vec<Identifier>,
        cast_member_ids: Vec<Identifier>,
    ) -> AppResult<Self> {
        Validator::validate_name("Video title", &title)?;
        Validator::validate_launch_year(launch_year)?;
        if let Some(duration) = duration {
            Validator::validate_duration(duration)?;
        }
        Ok(Self {
            id: Identifier::new(),
            title,
            description,
            launch_year,
            duration,
            rating,
            published: false,
            banner_file_id: None,
            thumbnail_file_id: None,
            trailer_file_id: None,
            media_file_id: None,
            category_ids,
            genre_ids,
            cast_member_ids,
            created_at: Utc::now(),
        })
    }

    /// Rebuild from storage; fields were validated when first created.
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: Identifier,
        title: String,
        description: String,
        launch_year: i32,
        duration: Option<i32>,
        rating: Rating,
        published: bool,
        banner_file_id: Option<String>,
        thumbnail_file_id: Option<String>,
        trailer_file_id: Option<String>,
        media_file_id: Option<String>,
        category_ids: Vec<Identifier>,
        genre_ids: Vec<Identifier>,
        cast_member_ids: Vec<Identifier>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            description,
            launch_year,
            duration,
            rating,
            published,
            banner_file_id,
            thumbnail_file_id,
            trailer_file_id,
            media_file_id,
            category_ids,
            genre_ids,
            cast_member_ids,
            created_at,
        }
    }

    pub fn publish(&mut self) {
        self.published = true;
    }

    pub fn unpublish(&mut self) {
        self.published = false;
    }

    pub fn set_banner(&mut self, file_id: String) {
        self.banner_file_id = Some(file_id);
    }

    pub fn set_thumbnail(&mut self, file_id: String) {
        self.thumbnail_file_id = Some(file_id);
    }

    pub fn set_trailer(&mut self, file_id: String) {
        self.trailer_file_id = Some(file_id);
    }

    pub fn set_media(&mut self, file_id: String) {
        self.media_file_id = Some(file_id);
    }
}

fn intersects(referenced: &[Identifier], wanted: &[Identifier]) -> bool {
    wanted.is_empty() || wanted.iter().any(|id| referenced.contains(id))
}

impl AggregateRoot for Video {
    const NAME: &'static str = "Video";
    type Filter = VideoFilter;

    fn id(&self) -> &Identifier {
        &self.id
    }

    fn matches(&self, filter: &VideoFilter) -> bool {
        let term_ok = filter
            .term
            .as_ref()
            .map(|term| self.title.to_lowercase().contains(&term.to_lowercase()))
            .unwrap_or(true);
        term_ok
            && intersects(&self.category_ids, &filter.category_ids)
            && intersects(&self.genre_ids, &filter.genre_ids)
            && intersects(&self.cast_member_ids, &filter.cast_member_ids)
    }

    fn sort_value(&self, field: &str) -> Option<String> {
        match field {
            "title" => Some(self.title.clone()),
            // Zero-padded to the full i32 width so the lexicographic
            // comparison agrees with the numeric one.
            "launch_year" => Some(format!("{:010}", self.launch_year)),
            "created_at" => Some(self.created_at.to_rfc3339()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(title: &str) -> Video {
        Video::new(
            title.to_string(),
            "A film".to_string(),
            2020,
            Some(120),
            Rating::Age12,
            vec![],
            vec![],
            vec![],
        )
        .unwrap()
    }

    #[test]
    fn new_video_starts_unpublished_and_without_media() {
        let v = video("Heat");
        assert!(!v.published);
        assert!(v.media_file_id.is_none());
    }

    #[test]
    fn rejects_nonpositive_launch_year() {
        let err = Video::new(
            "Heat".to_string(),
            String::new(),
            0,
            None,
            Rating::L,
            vec![],
            vec![],
            vec![],
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn rating_round_trips_through_its_string_form() {
        assert_eq!(Rating::from_str("16").unwrap(), Rating::Age16);
        assert_eq!(Rating::L.to_string(), "L");
        assert!(Rating::from_str("PG-13").is_err());
    }

    #[test]
    fn launch_year_sort_key_orders_numerically_across_widths() {
        let mut early = video("Early");
        early.launch_year = 9_999;
        let mut late = video("Late");
        late.launch_year = 10_000;

        assert!(early.sort_value("launch_year") < late.sort_value("launch_year"));
    }

    #[test]
    fn filter_matches_on_term_and_associations() {
        let mut v = video("Heat");
        let category = Identifier::new();
        v.category_ids.push(category);

        assert!(v.matches(&VideoFilter::with_term("hea")));
        assert!(!v.matches(&VideoFilter::with_term("cold")));

        let by_category = VideoFilter {
            category_ids: vec![category],
            ..VideoFilter::default()
        };
        assert!(v.matches(&by_category));

        let other = VideoFilter {
            category_ids: vec![Identifier::new()],
            ..VideoFilter::default()
        };
        assert!(!v.matches(&other));
    }
}
