use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use uuid::Uuid;

use super::models::CastMemberRow;
use crate::log_debug;
use crate::modules::cast_member::domain::CastMember;
use crate::schema::cast_members;
use crate::shared::domain::identifier::Identifier;
use crate::shared::domain::repository::{ExistsResult, Repository};
use crate::shared::domain::search::{SearchParams, SearchResult, SortDirection};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::infrastructure::database::Database;
use crate::shared::infrastructure::postgres::ConnectionSource;

pub struct CastMemberRepositoryImpl {
    source: ConnectionSource,
}

impl CastMemberRepositoryImpl {
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
impl Repository<CastMember> for CastMemberRepositoryImpl {
    async fn insert(&self, aggregate: &CastMember) -> AppResult<()> {
        let row = CastMemberRow::from(aggregate);
        self.source
            .run(move |conn| {
                diesel::insert_into(cast_members::table)
                    .values(&row)
                    .execute(conn)?;
                Ok(())
            })
            .await
    }

    async fn bulk_insert(&self, aggregates: &[CastMember]) -> AppResult<()> {
        if aggregates.is_empty() {
            return Ok(());
        }
        let rows: Vec<CastMemberRow> = aggregates.iter().map(CastMemberRow::from).collect();
        log_debug!("Bulk inserting {} cast members", rows.len());
        self.source
            .run(move |conn| {
                diesel::insert_into(cast_members::table)
                    .values(&rows)
                    .execute(conn)?;
                Ok(())
            })
            .await
    }

    async fn find_by_id(&self, id: &Identifier) -> AppResult<Option<CastMember>> {
        let uuid = id.as_uuid();
        self.source
            .run(move |conn| {
                let row = cast_members::table
                    .filter(cast_members::id.eq(uuid))
                    .first::<CastMemberRow>(conn)
                    .optional()?;
                row.map(CastMemberRow::into_entity).transpose()
            })
            .await
    }

    async fn find_by_ids(&self, ids: &[Identifier]) -> AppResult<Vec<CastMember>> {
        let uuids: Vec<Uuid> = ids.iter().map(Identifier::as_uuid).collect();
        self.source
            .run(move |conn| {
                let rows = cast_members::table
                    .filter(cast_members::id.eq_any(&uuids))
                    .order(cast_members::created_at.asc())
                    .load::<CastMemberRow>(conn)?;
                rows.into_iter().map(CastMemberRow::into_entity).collect()
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
                let rows = cast_members::table
                    .filter(cast_members::id.eq_any(&uuids))
                    .select(cast_members::id)
                    .load::<Uuid>(conn)?;
                Ok(rows)
            })
            .await?
            .into_iter()
            .map(Identifier::from)
            .collect();
        Ok(ExistsResult::partition(&requested, &found))
    }

    async fn update(&self, aggregate: &CastMember) -> AppResult<()> {
        let id = aggregate.id;
        let row = CastMemberRow::from(aggregate);
        self.source
            .run(move |conn| {
                let updated = diesel::update(cast_members::table.find(row.id))
                    .set(&row)
                    .execute(conn)?;
                if updated == 0 {
                    return Err(AppError::not_found(id, "CastMember"));
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
                    diesel::delete(cast_members::table.find(id.as_uuid())).execute(conn)?;
                if deleted == 0 {
                    return Err(AppError::not_found(id, "CastMember"));
                }
                Ok(())
            })
            .await
    }

    async fn search(&self, params: SearchParams<String>) -> AppResult<SearchResult<CastMember>> {
        self.source
            .run(move |conn| {
                let mut query = cast_members::table.into_boxed();
                let mut count_query = cast_members::table.into_boxed();

                if let Some(term) = params.filter() {
                    let pattern = format!("%{}%", term);
                    query = query.filter(cast_members::name.ilike(pattern.clone()));
                    count_query = count_query.filter(cast_members::name.ilike(pattern));
                }

                query = match (params.sort(), params.sort_dir()) {
                    (Some("name"), SortDirection::Asc) => query.order(cast_members::name.asc()),
                    (Some("name"), SortDirection::Desc) => query.order(cast_members::name.desc()),
                    (_, SortDirection::Desc) => query.order(cast_members::created_at.desc()),
                    (_, SortDirection::Asc) => query.order(cast_members::created_at.asc()),
                };
                query = query.then_order_by(cast_members::created_at.asc());

                let total: i64 = count_query.count().get_result(conn)?;
                let rows = query
                    .offset(params.offset())
                    .limit(params.limit())
                    .load::<CastMemberRow>(conn)?;

                let items = rows
                    .into_iter()
                    .map(CastMemberRow::into_entity)
                    .collect::<AppResult<Vec<_>>>()?;
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
