use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use uuid::Uuid;

use super::models::CategoryRow;
use crate::log_debug;
use crate::modules::category::domain::Category;
use crate::schema::categories;
use crate::shared::domain::identifier::Identifier;
use crate::shared::domain::repository::{ExistsResult, Repository};
use crate::shared::domain::search::{SearchParams, SearchResult, SortDirection};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::infrastructure::database::Database;
use crate::shared::infrastructure::postgres::ConnectionSource;

pub struct CategoryRepositoryImpl {
    source: ConnectionSource,
}

impl CategoryRepositoryImpl {
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
}

#[async_trait]
impl Repository<Category> for CategoryRepositoryImpl {
    async fn insert(&self, aggregate: &Category) -> AppResult<()> {
        let row = CategoryRow::from(aggregate);
        self.source
            .run(move |conn| {
                diesel::insert_into(categories::table)
                    .values(&row)
                    .execute(conn)?;
                Ok(())
            })
            .await
    }

    async fn bulk_insert(&self, aggregates: &[Category]) -> AppResult<()> {
        if aggregates.is_empty() {
            return Ok(());
        }
        let rows: Vec<CategoryRow> = aggregates.iter().map(CategoryRow::from).collect();
        log_debug!("Bulk inserting {} categories", rows.len());
        self.source
            .run(move |conn| {
                // Single multi-row statement, atomic on its own.
                diesel::insert_into(categories::table)
                    .values(&rows)
                    .execute(conn)?;
                Ok(())
            })
            .await
    }

    async fn find_by_id(&self, id: &Identifier) -> AppResult<Option<Category>> {
        let uuid = id.as_uuid();
        self.source
            .run(move |conn| {
                let row = categories::table
                    .filter(categories::id.eq(uuid))
                    .first::<CategoryRow>(conn)
                    .optional()?;
                Ok(row.map(Category::from))
            })
            .await
    }

    async fn find_by_ids(&self, ids: &[Identifier]) -> AppResult<Vec<Category>> {
        let uuids: Vec<Uuid> = ids.iter().map(Identifier::as_uuid).collect();
        self.source
            .run(move |conn| {
                let rows = categories::table
                    .filter(categories::id.eq_any(&uuids))
                    .order(categories::created_at.asc())
                    .load::<CategoryRow>(conn)?;
                Ok(rows.into_iter().map(Category::from).collect())
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
                let rows = categories::table
                    .filter(categories::id.eq_any(&uuids))
                    .select(categories::id)
                    .load::<Uuid>(conn)?;
                Ok(rows)
            })
            .await?
            .into_iter()
            .map(Identifier::from)
            .collect();
        Ok(ExistsResult::partition(&requested, &found))
    }

    async fn update(&self, aggregate: &Category) -> AppResult<()> {
        let id = aggregate.id;
        let row = CategoryRow::from(aggregate);
        self.source
            .run(move |conn| {
                let updated = diesel::update(categories::table.find(row.id))
                    .set(&row)
                    .execute(conn)?;
                if updated == 0 {
                    return Err(AppError::not_found(id, "Category"));
                }
                Ok(())
            })
            .await
    }

    async fn delete(&self, id: &Identifier) -> AppResult<()> {
        let id = *id;
        self.source
            .run(move |conn| {
                let deleted =
                    diesel::delete(categories::table.find(id.as_uuid())).execute(conn)?;
                if deleted == 0 {
                    return Err(AppError::not_found(id, "Category"));
                }
                Ok(())
            })
            .await
    }

    async fn search(&self, params: SearchParams<String>) -> AppResult<SearchResult<Category>> {
        self.source
            .run(move |conn| {
                let mut query = categories::table.into_boxed();
                let mut count_query = categories::table.into_boxed();

                if let Some(term) = params.filter() {
                    let pattern = format!("%{}%", term);
                    query = query.filter(categories::name.ilike(pattern.clone()));
                    count_query = count_query.filter(categories::name.ilike(pattern));
                }

                query = match (params.sort(), params.sort_dir()) {
                    (Some("name"), SortDirection::Asc) => query.order(categories::name.asc()),
                    (Some("name"), SortDirection::Desc) => query.order(categories::name.desc()),
                    (_, SortDirection::Desc) => query.order(categories::created_at.desc()),
                    (_, SortDirection::Asc) => query.order(categories::created_at.asc()),
                };
                // Creation order breaks ties deterministically.
                query = query.then_order_by(categories::created_at.asc());

                let total: i64 = count_query.count().get_result(conn)?;
                let rows = query
                    .offset(params.offset())
                    .limit(params.limit())
                    .load::<CategoryRow>(conn)?;

                Ok(SearchResult::new(
                    rows.into_iter().map(Category::from).collect(),
                    total as u64,
                    params.page(),
                    params.per_page(),
                ))
            })
            .await
    }
}
