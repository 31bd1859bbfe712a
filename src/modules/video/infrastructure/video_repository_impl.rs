use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use uuid::Uuid;

use super::models::{VideoCastMemberRow, VideoCategoryRow, VideoGenreRow, VideoRow};
use crate::log_debug;
use crate::modules::video::domain::{Video, VideoFilter};
use crate::schema::{video_cast_members, video_categories, video_genres, videos};
use crate::shared::domain::identifier::Identifier;
use crate::shared::domain::repository::{ExistsResult, Repository};
use crate::shared::domain::search::{SearchParams, SearchResult, SortDirection};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::infrastructure::database::Database;
use crate::shared::infrastructure::postgres::ConnectionSource;

pub struct VideoRepositoryImpl {
    source: ConnectionSource,
}

impl VideoRepositoryImpl {
    /// Auto-commit repository over the pool.
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            source: ConnectionSource::Pool(db),
        }
    }

    /// Repository enlisted in a unit of work's transaction.
    pub fn with_source(source: ConnectionSource) -> Self {
        Self { source }
    }

    /// Load the three association sets for a batch of video rows and build
    /// the entities, preserving the row order.
    fn assemble(conn: &mut PgConnection, rows: Vec<VideoRow>) -> AppResult<Vec<Video>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let video_ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();

        let mut categories: HashMap<Uuid, Vec<Identifier>> = HashMap::new();
        for join in video_categories::table
            .filter(video_categories::video_id.eq_any(&video_ids))
            .load::<VideoCategoryRow>(conn)?
        {
            categories
                .entry(join.video_id)
                .or_default()
                .push(Identifier::from(join.category_id));
        }

        let mut genres: HashMap<Uuid, Vec<Identifier>> = HashMap::new();
        for join in video_genres::table
            .filter(video_genres::video_id.eq_any(&video_ids))
            .load::<VideoGenreRow>(conn)?
        {
            genres
                .entry(join.video_id)
                .or_default()
                .push(Identifier::from(join.genre_id));
        }

        let mut cast_members: HashMap<Uuid, Vec<Identifier>> = HashMap::new();
        for join in video_cast_members::table
            .filter(video_cast_members::video_id.eq_any(&video_ids))
            .load::<VideoCastMemberRow>(conn)?
        {
            cast_members
                .entry(join.video_id)
                .or_default()
                .push(Identifier::from(join.cast_member_id));
        }

        rows.into_iter()
            .map(|row| {
                let id = row.id;
                row.into_entity(
                    categories.remove(&id).unwrap_or_default(),
                    genres.remove(&id).unwrap_or_default(),
                    cast_members.remove(&id).unwrap_or_default(),
                )
            })
            .collect()
    }

    fn write_associations(conn: &mut PgConnection, entity: &Video) -> AppResult<()> {
        let category_joins = VideoCategoryRow::for_video(entity);
        if !category_joins.is_empty() {
            diesel::insert_into(video_categories::table)
                .values(&category_joins)
                .execute(conn)?;
        }
        let genre_joins = VideoGenreRow::for_video(entity);
        if !genre_joins.is_empty() {
            diesel::insert_into(video_genres::table)
                .values(&genre_joins)
                .execute(conn)?;
        }
        let cast_member_joins = VideoCastMemberRow::for_video(entity);
        if !cast_member_joins.is_empty() {
            diesel::insert_into(video_cast_members::table)
                .values(&cast_member_joins)
                .execute(conn)?;
        }
        Ok(())
    }

    fn delete_associations(conn: &mut PgConnection, video_id: Uuid) -> AppResult<()> {
        diesel::delete(video_categories::table.filter(video_categories::video_id.eq(video_id)))
            .execute(conn)?;
        diesel::delete(video_genres::table.filter(video_genres::video_id.eq(video_id)))
            .execute(conn)?;
        diesel::delete(
            video_cast_members::table.filter(video_cast_members::video_id.eq(video_id)),
        )
        .execute(conn)?;
        Ok(())
    }
}

#[async_trait]
impl Repository<Video> for VideoRepositoryImpl {
    async fn insert(&self, aggregate: &Video) -> AppResult<()> {
        let row = VideoRow::from(aggregate);
        let entity = aggregate.clone();
        self.source
            .run(move |conn| {
                conn.transaction::<_, AppError, _>(|conn| {
                    diesel::insert_into(videos::table)
                        .values(&row)
                        .execute(conn)?;
                    Self::write_associations(conn, &entity)
                })
            })
            .await
    }

    async fn bulk_insert(&self, aggregates: &[Video]) -> AppResult<()> {
        if aggregates.is_empty() {
            return Ok(());
        }
        let rows: Vec<VideoRow> = aggregates.iter().map(VideoRow::from).collect();
        let entities = aggregates.to_vec();
        log_debug!("Bulk inserting {} videos", rows.len());
        self.source
            .run(move |conn| {
                conn.transaction::<_, AppError, _>(|conn| {
                    diesel::insert_into(videos::table)
                        .values(&rows)
                        .execute(conn)?;
                    for entity in &entities {
                        Self::write_associations(conn, entity)?;
                    }
                    Ok(())
                })
            })
            .await
    }

    async fn find_by_id(&self, id: &Identifier) -> AppResult<Option<Video>> {
        let uuid = id.as_uuid();
        self.source
            .run(move |conn| {
                let row = videos::table
                    .filter(videos::id.eq(uuid))
                    .first::<VideoRow>(conn)
                    .optional()?;
                match row {
                    Some(row) => Ok(Self::assemble(conn, vec![row])?.into_iter().next()),
                    None => Ok(None),
                }
            })
            .await
    }

    async fn find_by_ids(&self, ids: &[Identifier]) -> AppResult<Vec<Video>> {
        let uuids: Vec<Uuid> = ids.iter().map(Identifier::as_uuid).collect();
        self.source
            .run(move |conn| {
                let rows = videos::table
                    .filter(videos::id.eq_any(&uuids))
                    .order(videos::created_at.asc())
                    .load::<VideoRow>(conn)?;
                Self::assemble(conn, rows)
            })
            .await
    }

    async fn exists_by_id(&self, ids: &[Identifier]) -> AppResult<ExistsResult> {
        if ids.is_empty() {
            return Ok(ExistsResult::default());
        }
        let requested = ids.to_vec();
        let uuids: Vec<Uuid> = ids.iter().map(Identifier::as_uuid).collect();
        let found: Vec<Identifier> = self
            .source
            .run(move |conn| {
                let rows = videos::table
                    .filter(videos::id.eq_any(&uuids))
                    .select(videos::id)
                    .load::<Uuid>(conn)?;
                Ok(rows)
            })
            .await?
            .into_iter()
            .map(Identifier::from)
            .collect();
        Ok(ExistsResult::partition(&requested, &found))
    }

    async fn update(&self, aggregate: &Video) -> AppResult<()> {
        let id = aggregate.id;
        let row = VideoRow::from(aggregate);
        let entity = aggregate.clone();
        self.source
            .run(move |conn| {
                conn.transaction::<_, AppError, _>(|conn| {
                    let updated = diesel::update(videos::table.find(row.id))
                        .set(&row)
                        .execute(conn)?;
                    if updated == 0 {
                        return Err(AppError::not_found(id, "Video"));
                    }
                    // Replace the association sets wholesale.
                    Self::delete_associations(conn, row.id)?;
                    Self::write_associations(conn, &entity)
                })
            })
            .await
    }

    async fn delete(&self, id: &Identifier) -> AppResult<()> {
        let id = *id;
        self.source
            .run(move |conn| {
                conn.transaction::<_, AppError, _>(|conn| {
                    Self::delete_associations(conn, id.as_uuid())?;
                    let deleted =
                        diesel::delete(videos::table.find(id.as_uuid())).execute(conn)?;
                    if deleted == 0 {
                        return Err(AppError::not_found(id, "Video"));
                    }
                    Ok(())
                })
            })
            .await
    }

    async fn search(&self, params: SearchParams<VideoFilter>) -> AppResult<SearchResult<Video>> {
        self.source
            .run(move |conn| {
                let mut query = videos::table.into_boxed();
                let mut count_query = videos::table.into_boxed();

                if let Some(filter) = params.filter() {
                    if let Some(term) = &filter.term {
                        let pattern = format!("%{}%", term);
                        query = query.filter(videos::title.ilike(pattern.clone()));
                        count_query = count_query.filter(videos::title.ilike(pattern));
                    }
                    if !filter.category_ids.is_empty() {
                        let uuids: Vec<Uuid> =
                            filter.category_ids.iter().map(Identifier::as_uuid).collect();
                        let matching = video_categories::table
                            .filter(video_categories::category_id.eq_any(uuids))
                            .select(video_categories::video_id);
                        query = query.filter(videos::id.eq_any(matching.clone()));
                        count_query = count_query.filter(videos::id.eq_any(matching));
                    }
                    if !filter.genre_ids.is_empty() {
                        let uuids: Vec<Uuid> =
                            filter.genre_ids.iter().map(Identifier::as_uuid).collect();
                        let matching = video_genres::table
                            .filter(video_genres::genre_id.eq_any(uuids))
                            .select(video_genres::video_id);
                        query = query.filter(videos::id.eq_any(matching.clone()));
                        count_query = count_query.filter(videos::id.eq_any(matching));
                    }
                    if !filter.cast_member_ids.is_empty() {
                        let uuids: Vec<Uuid> = filter
                            .cast_member_ids
                            .iter()
                            .map(Identifier::as_uuid)
                            .collect();
                        let matching = video_cast_members::table
                            .filter(video_cast_members::cast_member_id.eq_any(uuids))
                            .select(video_cast_members::video_id);
                        query = query.filter(videos::id.eq_any(matching.clone()));
                        count_query = count_query.filter(videos::id.eq_any(matching));
                    }
                }

                query = match (params.sort(), params.sort_dir()) {
                    (Some("title"), SortDirection::Asc) => query.order(videos::title.asc()),
                    (Some("title"), SortDirection::Desc) => query.order(videos::title.desc()),
                    (Some("launch_year"), SortDirection::Asc) => {
                        query.order(videos::launch_year.asc())
                    }
                    (Some("launch_year"), SortDirection::Desc) => {
                        query.order(videos::launch_year.desc())
                    }
                    (_, SortDirection::Desc) => query.order(videos::created_at.desc()),
                    (_, SortDirection::Asc) => query.order(videos::created_at.asc()),
                };
                query = query.then_order_by(videos::created_at.asc());

                let total: i64 = count_query.count().get_result(conn)?;
                let rows = query
                    .offset(params.offset())
                    .limit(params.limit())
                    .load::<VideoRow>(conn)?;

                let items = Self::assemble(conn, rows)?;
                Ok(SearchResult::new(
                    items,
                    total as u64,
                    params.page(),
                    params.per_page(),
                ))
            })
            .await
    }
}
