use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use uuid::Uuid;

use super::models::{GenreCategoryRow, GenreRow};
use crate::log_debug;
use crate::modules::genre::domain::Genre;
use crate::schema::{genre_categories, genres};
use crate::shared::domain::identifier::Identifier;
use crate::shared::domain::repository::{ExistsResult, Repository};
use crate::shared::domain::search::{SearchParams, SearchResult, SortDirection};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::infrastructure::database::Database;
use crate::shared::infrastructure::postgres::ConnectionSource;

pub struct GenreRepositoryImpl {
    source: ConnectionSource,
}

impl GenreRepositoryImpl {
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

    /// Load the category associations for a batch of genre rows and build
    /// the entities, preserving the row order.
    fn assemble(conn: &mut PgConnection, rows: Vec<GenreRow>) -> AppResult<Vec<Genre>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let genre_ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
        let joins = genre_categories::table
            .filter(genre_categories::genre_id.eq_any(&genre_ids))
            .load::<GenreCategoryRow>(conn)?;

        let mut grouped: HashMap<Uuid, Vec<Identifier>> = HashMap::new();
        for join in joins {
            grouped
                .entry(join.genre_id)
                .or_default()
                .push(Identifier::from(join.category_id));
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let category_ids = grouped.remove(&row.id).unwrap_or_default();
                Genre::restore(
                    Identifier::from(row.id),
                    row.name,
                    row.is_active,
                    category_ids,
                    row.created_at,
                )
            })
            .collect())
    }

    fn write_associations(conn: &mut PgConnection, entity_joins: &[GenreCategoryRow]) -> AppResult<()> {
        if !entity_joins.is_empty() {
            diesel::insert_into(genre_categories::table)
                .values(entity_joins)
                .execute(conn)?;
        }
        Ok(())
    }
}

#[async_trait]
impl Repository<Genre> for GenreRepositoryImpl {
    async fn insert(&self, aggregate: &Genre) -> AppResult<()> {
        let row = GenreRow::from(aggregate);
        let joins = GenreCategoryRow::for_genre(aggregate);
        self.source
            .run(move |conn| {
                conn.transaction::<_, AppError, _>(|conn| {
                    diesel::insert_into(genres::table)
                        .values(&row)
                        .execute(conn)?;
                    Self::write_associations(conn, &joins)
                })
            })
            .await
    }

    async fn bulk_insert(&self, aggregates: &[Genre]) -> AppResult<()> {
        if aggregates.is_empty() {
            return Ok(());
        }
        let rows: Vec<GenreRow> = aggregates.iter().map(GenreRow::from).collect();
        let joins: Vec<GenreCategoryRow> = aggregates
            .iter()
            .flat_map(|genre| GenreCategoryRow::for_genre(genre))
            .collect();
        log_debug!("Bulk inserting {} genres", rows.len());
        self.source
            .run(move |conn| {
                conn.transaction::<_, AppError, _>(|conn| {
                    diesel::insert_into(genres::table)
                        .values(&rows)
                        .execute(conn)?;
                    Self::write_associations(conn, &joins)
                })
            })
            .await
    }

    async fn find_by_id(&self, id: &Identifier) -> AppResult<Option<Genre>> {
        let uuid = id.as_uuid();
        self.source
            .run(move |conn| {
                let row = genres::table
                    .filter(genres::id.eq(uuid))
                    .first::<GenreRow>(conn)
                    .optional()?;
                match row {
                    Some(row) => Ok(Self::assemble(conn, vec![row])?.into_iter().next()),
                    None => Ok(None),
                }
            })
            .await
    }

    async fn find_by_ids(&self, ids: &[Identifier]) -> AppResult<Vec<Genre>> {
        let uuids: Vec<Uuid> = ids.iter().map(Identifier::as_uuid).collect();
        self.source
            .run(move |conn| {
                let rows = genres::table
                    .filter(genres::id.eq_any(&uuids))
                    .order(genres::created_at.asc())
                    .load::<GenreRow>(conn)?;
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
                let rows = genres::table
                    .filter(genres::id.eq_any(&uuids))
                    .select(genres::id)
                    .load::<Uuid>(conn)?;
                Ok(rows)
            })
            .await?
            .into_iter()
            .map(Identifier::from)
            .collect();
        Ok(ExistsResult::partition(&requested, &found))
    }

    async fn update(&self, aggregate: &Genre) -> AppResult<()> {
        let id = aggregate.id;
        let row = GenreRow::from(aggregate);
        let joins = GenreCategoryRow::for_genre(aggregate);
        self.source
            .run(move |conn| {
                conn.transaction::<_, AppError, _>(|conn| {
                    let updated = diesel::update(genres::table.find(row.id))
                        .set(&row)
                        .execute(conn)?;
                    if updated == 0 {
                        return Err(AppError::not_found(id, "Genre"));
                    }
                    // Replace the association set wholesale.
                    diesel::delete(
                        genre_categories::table.filter(genre_categories::genre_id.eq(row.id)),
                    )
                    .execute(conn)?;
                    Self::write_associations(conn, &joins)
                })
            })
            .await
    }

    async fn delete(&self, id: &Identifier) -> AppResult<()> {
        let id = *id;
        self.source
            .run(move |conn| {
                conn.transaction::<_, AppError, _>(|conn| {
                    diesel::delete(
                        genre_categories::table
                            .filter(genre_categories::genre_id.eq(id.as_uuid())),
                    )
                    .execute(conn)?;
                    let deleted =
                        diesel::delete(genres::table.find(id.as_uuid())).execute(conn)?;
                    if deleted == 0 {
                        return Err(AppError::not_found(id, "Genre"));
                    }
                    Ok(())
                })
            })
            .await
    }

    async fn search(&self, params: SearchParams<String>) -> AppResult<SearchResult<Genre>> {
        self.source
            .run(move |conn| {
                let mut query = genres::table.into_boxed();
                let mut count_query = genres::table.into_boxed();

                if let Some(term) = params.filter() {
                    let pattern = format!("%{}%", term);
                    query = query.filter(genres::name.ilike(pattern.clone()));
                    count_query = count_query.filter(genres::name.ilike(pattern));
                }

                query = match (params.sort(), params.sort_dir()) {
                    (Some("name"), SortDirection::Asc) => query.order(genres::name.asc()),
                    (Some("name"), SortDirection::Desc) => query.order(genres::name.desc()),
                    (_, SortDirection::Desc) => query.order(genres::created_at.desc()),
                    (_, SortDirection::Asc) => query.order(genres::created_at.asc()),
                };
                query = query.then_order_by(genres::created_at.asc());

                let total: i64 = count_query.count().get_result(conn)?;
                let rows = query
                    .offset(params.offset())
                    .limit(params.limit())
                    .load::<GenreRow>(conn)?;

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
