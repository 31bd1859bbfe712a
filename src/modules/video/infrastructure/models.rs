use std::str::FromStr;

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::modules::video::domain::{Rating, Video};
use crate::schema::{video_cast_members, video_categories, video_genres, videos};
use crate::shared::domain::identifier::Identifier;
use crate::shared::errors::AppResult;

/// Video database row, without the association tables. Clearing a media
/// reference must write NULL, hence `treat_none_as_null`.
#[derive(Queryable, Identifiable, Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = videos)]
#[diesel(treat_none_as_null = true)]
pub struct VideoRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub launch_year: i32,
    pub duration: Option<i32>,
    pub rating: String,
    pub published: bool,
    pub banner_file_id: Option<String>,
    pub thumbnail_file_id: Option<String>,
    pub trailer_file_id: Option<String>,
    pub media_file_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&Video> for VideoRow {
    fn from(entity: &Video) -> Self {
        Self {
            id: entity.id.as_uuid(),
            title: entity.title.clone(),
            description: entity.description.clone(),
            launch_year: entity.launch_year,
            duration: entity.duration,
            rating: entity.rating.to_string(),
            published: entity.published,
            banner_file_id: entity.banner_file_id.clone(),
            thumbnail_file_id: entity.thumbnail_file_id.clone(),
            trailer_file_id: entity.trailer_file_id.clone(),
            media_file_id: entity.media_file_id.clone(),
            created_at: entity.created_at,
        }
    }
}

impl VideoRow {
    /// A row with an unknown rating string surfaces as an error rather than
    /// a silent default.
    pub fn into_entity(
        self,
        category_ids: Vec<Identifier>,
        genre_ids: Vec<Identifier>,
        cast_member_ids: Vec<Identifier>,
    ) -> AppResult<Video> {
        let rating = Rating::from_str(&self.rating)?;
        Ok(Video::restore(
            Identifier::from(self.id),
            self.title,
            self.description,
            self.launch_year,
            self.duration,
            rating,
            self.published,
            self.banner_file_id,
            self.thumbnail_file_id,
            self.trailer_file_id,
            self.media_file_id,
            category_ids,
            genre_ids,
            cast_member_ids,
            self.created_at,
        ))
    }
}

#[derive(Queryable, Insertable, Debug, Clone)]
#[diesel(table_name = video_categories)]
pub struct VideoCategoryRow {
    pub video_id: Uuid,
    pub category_id: Uuid,
}

#[derive(Queryable, Insertable, Debug, Clone)]
#[diesel(table_name = video_genres)]
pub struct VideoGenreRow {
    pub video_id: Uuid,
    pub genre_id: Uuid,
}

#[derive(Queryable, Insertable, Debug, Clone)]
#[diesel(table_name = video_cast_members)]
pub struct VideoCastMemberRow {
    pub video_id: Uuid,
    pub cast_member_id: Uuid,
}

impl VideoCategoryRow {
    pub fn for_video(entity: &Video) -> Vec<Self> {
        entity
            .category_ids
            .iter()
            .map(|category_id| Self {
                video_id: entity.id.as_uuid(),
                category_id: category_id.as_uuid(),
            })
            .collect()
    }
}

impl VideoGenreRow {
    pub fn for_video(entity: &Video) -> Vec<Self> {
        entity
            .genre_ids
            .iter()
            .map(|genre_id| Self {
                video_id: entity.id.as_uuid(),
                genre_id: genre_id.as_uuid(),
            })
            .collect()
    }
}

impl VideoCastMemberRow {
    pub fn for_video(entity: &Video) -> Vec<Self> {
        entity
            .cast_member_ids
            .iter()
            .map(|cast_member_id| Self {
                video_id: entity.id.as_uuid(),
                cast_member_id: cast_member_id.as_uuid(),
            })
            .collect()
    }
}
