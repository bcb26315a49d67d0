//! PostgreSQL-backed `BidRepository`.

use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::Page;

use crate::domain::ports::{BidRepository, BidRepositoryError};
use crate::domain::{
    Bid, BidChanges, BidId, BidStatus, NewBid, OrganizationId, TenderId, UserId,
};

use super::diesel_basic_error_mapping::{
    map_basic_diesel_error, map_basic_pool_error, map_corrupt_row,
};
use super::models::{BidChangeset, BidRow, NewBidRow};
use super::pool::{DbPool, PoolError};
use super::schema::bids;

/// Diesel implementation of [`BidRepository`].
#[derive(Clone)]
pub struct DieselBidRepository {
    pool: DbPool,
}

impl DieselBidRepository {
    /// Create a repository over the shared pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> BidRepositoryError {
    map_basic_pool_error(error, BidRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> BidRepositoryError {
    map_basic_diesel_error(error, BidRepositoryError::query, BidRepositoryError::connection)
}

fn to_domain(row: BidRow) -> Result<Bid, BidRepositoryError> {
    row.into_domain()
        .map_err(|message| map_corrupt_row(message, BidRepositoryError::query))
}

fn all_to_domain(rows: Vec<BidRow>) -> Result<Vec<Bid>, BidRepositoryError> {
    rows.into_iter().map(to_domain).collect()
}

#[async_trait]
impl BidRepository for DieselBidRepository {
    async fn create(&self, bid: &NewBid) -> Result<Bid, BidRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::insert_into(bids::table)
            .values(&NewBidRow {
                name: &bid.name,
                description: &bid.description,
                status: BidStatus::Created.as_str(),
                version: 1,
                tender_id: bid.tender_id.get(),
                creator_id: bid.creator_id.get(),
                organization_id: bid.origin.organization_id().map(OrganizationId::get),
                created_at: bid.created_at,
            })
            .returning(BidRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        to_domain(row)
    }

    async fn find_by_id(&self, id: BidId) -> Result<Option<Bid>, BidRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = bids::table
            .find(id.get())
            .select(BidRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(to_domain).transpose()
    }

    async fn list_published_for_tender(
        &self,
        tender_id: TenderId,
        page: Page,
    ) -> Result<Vec<Bid>, BidRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = bids::table
            .filter(bids::tender_id.eq(tender_id.get()))
            .filter(bids::status.eq(BidStatus::Published.as_str()))
            .order((bids::name.asc(), bids::id.asc()))
            .limit(page.sql_limit())
            .offset(page.sql_offset())
            .select(BidRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        all_to_domain(rows)
    }

    async fn list_for_organization(
        &self,
        organization_id: OrganizationId,
    ) -> Result<Vec<Bid>, BidRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = bids::table
            .filter(bids::organization_id.eq(organization_id.get()))
            .order((bids::name.asc(), bids::id.asc()))
            .select(BidRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        all_to_domain(rows)
    }

    async fn list_personal_for_creator(
        &self,
        creator_id: UserId,
    ) -> Result<Vec<Bid>, BidRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = bids::table
            .filter(bids::creator_id.eq(creator_id.get()))
            .filter(bids::organization_id.is_null())
            .order((bids::name.asc(), bids::id.asc()))
            .select(BidRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        all_to_domain(rows)
    }

    async fn user_has_bid(
        &self,
        tender_id: TenderId,
        creator_id: UserId,
    ) -> Result<bool, BidRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::select(exists(
            bids::table
                .filter(bids::tender_id.eq(tender_id.get()))
                .filter(bids::creator_id.eq(creator_id.get()))
                .filter(bids::organization_id.is_null())
                .filter(bids::status.ne(BidStatus::Canceled.as_str())),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)
    }

    async fn organization_has_bid(
        &self,
        tender_id: TenderId,
        organization_id: OrganizationId,
    ) -> Result<bool, BidRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::select(exists(
            bids::table
                .filter(bids::tender_id.eq(tender_id.get()))
                .filter(bids::organization_id.eq(organization_id.get()))
                .filter(bids::status.ne(BidStatus::Canceled.as_str())),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)
    }

    async fn update_status(
        &self,
        id: BidId,
        status: BidStatus,
    ) -> Result<Option<Bid>, BidRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::update(bids::table.find(id.get()))
            .set((
                bids::status.eq(status.as_str()),
                bids::version.eq(bids::version + 1),
            ))
            .returning(BidRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(to_domain).transpose()
    }

    async fn update_fields(
        &self,
        id: BidId,
        changes: &BidChanges,
    ) -> Result<Option<Bid>, BidRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changeset = BidChangeset {
            name: changes.name.as_deref(),
            description: changes.description.as_deref(),
        };
        let row = diesel::update(bids::table.find(id.get()))
            .set((&changeset, bids::version.eq(bids::version + 1)))
            .returning(BidRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(to_domain).transpose()
    }
}
