//! PostgreSQL-backed `TenderRepository`.
//!
//! Mutations bump `version` in the same `UPDATE ... RETURNING` statement
//! that applies the change, so the returned row is the post-mutation state.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::Page;

use crate::domain::ports::{TenderRepository, TenderRepositoryError};
use crate::domain::{
    NewTender, OrganizationId, ServiceType, Tender, TenderChanges, TenderId, TenderStatus, UserId,
};

use super::diesel_basic_error_mapping::{
    map_basic_diesel_error, map_basic_pool_error, map_corrupt_row,
};
use super::models::{NewTenderRow, TenderChangeset, TenderRow};
use super::pool::{DbPool, PoolError};
use super::schema::tenders;

/// Diesel implementation of [`TenderRepository`].
#[derive(Clone)]
pub struct DieselTenderRepository {
    pool: DbPool,
}

impl DieselTenderRepository {
    /// Create a repository over the shared pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> TenderRepositoryError {
    map_basic_pool_error(error, TenderRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> TenderRepositoryError {
    map_basic_diesel_error(
        error,
        TenderRepositoryError::query,
        TenderRepositoryError::connection,
    )
}

fn to_domain(row: TenderRow) -> Result<Tender, TenderRepositoryError> {
    row.into_domain()
        .map_err(|message| map_corrupt_row(message, TenderRepositoryError::query))
}

fn all_to_domain(rows: Vec<TenderRow>) -> Result<Vec<Tender>, TenderRepositoryError> {
    rows.into_iter().map(to_domain).collect()
}

#[async_trait]
impl TenderRepository for DieselTenderRepository {
    async fn create(&self, tender: &NewTender) -> Result<Tender, TenderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::insert_into(tenders::table)
            .values(&NewTenderRow {
                name: &tender.name,
                description: &tender.description,
                service_type: tender.service_type.as_str(),
                status: TenderStatus::Created.as_str(),
                version: 1,
                organization_id: tender.organization_id.get(),
                creator_id: tender.creator_id.get(),
                created_at: tender.created_at,
            })
            .returning(TenderRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        to_domain(row)
    }

    async fn find_by_id(&self, id: TenderId) -> Result<Option<Tender>, TenderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = tenders::table
            .find(id.get())
            .select(TenderRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(to_domain).transpose()
    }

    async fn list_published(
        &self,
        service_type: Option<ServiceType>,
        page: Page,
    ) -> Result<Vec<Tender>, TenderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = tenders::table
            .filter(tenders::status.eq(TenderStatus::Published.as_str()))
            .select(TenderRow::as_select())
            .into_boxed();
        if let Some(kind) = service_type {
            query = query.filter(tenders::service_type.eq(kind.as_str()));
        }
        let rows = query
            .order((tenders::name.asc(), tenders::id.asc()))
            .limit(page.sql_limit())
            .offset(page.sql_offset())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        all_to_domain(rows)
    }

    async fn list_for_organization(
        &self,
        organization_id: OrganizationId,
    ) -> Result<Vec<Tender>, TenderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = tenders::table
            .filter(tenders::organization_id.eq(organization_id.get()))
            .order((tenders::name.asc(), tenders::id.asc()))
            .select(TenderRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        all_to_domain(rows)
    }

    async fn list_for_creator(
        &self,
        creator_id: UserId,
    ) -> Result<Vec<Tender>, TenderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = tenders::table
            .filter(tenders::creator_id.eq(creator_id.get()))
            .order((tenders::name.asc(), tenders::id.asc()))
            .select(TenderRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        all_to_domain(rows)
    }

    async fn update_status(
        &self,
        id: TenderId,
        status: TenderStatus,
    ) -> Result<Option<Tender>, TenderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::update(tenders::table.find(id.get()))
            .set((
                tenders::status.eq(status.as_str()),
                tenders::version.eq(tenders::version + 1),
            ))
            .returning(TenderRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(to_domain).transpose()
    }

    async fn update_fields(
        &self,
        id: TenderId,
        changes: &TenderChanges,
    ) -> Result<Option<Tender>, TenderRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changeset = TenderChangeset {
            name: changes.name.as_deref(),
            description: changes.description.as_deref(),
            service_type: changes.service_type.map(ServiceType::as_str),
        };
        let row = diesel::update(tenders::table.find(id.get()))
            .set((&changeset, tenders::version.eq(tenders::version + 1)))
            .returning(TenderRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(to_domain).transpose()
    }
}
