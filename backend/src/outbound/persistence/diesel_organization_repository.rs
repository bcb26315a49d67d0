//! PostgreSQL-backed `OrganizationRepository`, including the
//! responsibility relation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::Page;

use crate::domain::ports::{OrganizationRepository, OrganizationRepositoryError};
use crate::domain::{Organization, OrganizationDraft, OrganizationId, OrganizationType, UserId};

use super::diesel_basic_error_mapping::{
    is_unique_violation, map_basic_diesel_error, map_basic_pool_error, map_corrupt_row,
};
use super::models::{NewOrganizationRow, NewResponsibleRow, OrganizationFields, OrganizationRow};
use super::pool::{DbPool, PoolError};
use super::schema::{organization_responsible, organizations};

/// Diesel implementation of [`OrganizationRepository`].
#[derive(Clone)]
pub struct DieselOrganizationRepository {
    pool: DbPool,
}

impl DieselOrganizationRepository {
    /// Create a repository over the shared pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> OrganizationRepositoryError {
    map_basic_pool_error(error, OrganizationRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> OrganizationRepositoryError {
    map_basic_diesel_error(
        error,
        OrganizationRepositoryError::query,
        OrganizationRepositoryError::connection,
    )
}

fn to_domain(row: OrganizationRow) -> Result<Organization, OrganizationRepositoryError> {
    row.into_domain()
        .map_err(|message| map_corrupt_row(message, OrganizationRepositoryError::query))
}

fn fields(draft: &OrganizationDraft) -> OrganizationFields<'_> {
    OrganizationFields {
        name: &draft.name,
        description: &draft.description,
        organization_type: draft.organization_type.as_str(),
    }
}

#[async_trait]
impl OrganizationRepository for DieselOrganizationRepository {
    async fn find_by_id(
        &self,
        id: OrganizationId,
    ) -> Result<Option<Organization>, OrganizationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = organizations::table
            .find(id.get())
            .select(OrganizationRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(to_domain).transpose()
    }

    async fn create(
        &self,
        draft: &OrganizationDraft,
        created_at: DateTime<Utc>,
    ) -> Result<Organization, OrganizationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::insert_into(organizations::table)
            .values(&NewOrganizationRow {
                fields: fields(draft),
                created_at,
            })
            .returning(OrganizationRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        to_domain(row)
    }

    async fn update(
        &self,
        id: OrganizationId,
        draft: &OrganizationDraft,
    ) -> Result<Option<Organization>, OrganizationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::update(organizations::table.find(id.get()))
            .set(&fields(draft))
            .returning(OrganizationRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(to_domain).transpose()
    }

    async fn list(
        &self,
        organization_type: Option<OrganizationType>,
        page: Page,
    ) -> Result<Vec<Organization>, OrganizationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = organizations::table
            .select(OrganizationRow::as_select())
            .into_boxed();
        if let Some(kind) = organization_type {
            query = query.filter(organizations::organization_type.eq(kind.as_str()));
        }
        let rows = query
            .order((organizations::name.asc(), organizations::id.asc()))
            .limit(page.sql_limit())
            .offset(page.sql_offset())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(to_domain).collect()
    }

    async fn is_responsible(
        &self,
        organization_id: OrganizationId,
        user_id: UserId,
    ) -> Result<bool, OrganizationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::select(exists(
            organization_responsible::table
                .filter(organization_responsible::organization_id.eq(organization_id.get()))
                .filter(organization_responsible::user_id.eq(user_id.get())),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)
    }

    async fn make_responsible(
        &self,
        organization_id: OrganizationId,
        user_id: UserId,
    ) -> Result<(), OrganizationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(organization_responsible::table)
            .values(NewResponsibleRow {
                organization_id: organization_id.get(),
                user_id: user_id.get(),
            })
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| {
                if is_unique_violation(&err) {
                    OrganizationRepositoryError::already_responsible(
                        organization_id.get(),
                        user_id.get(),
                    )
                } else {
                    map_diesel_error(err)
                }
            })
    }
}
