//! PostgreSQL-backed `UserRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{NewUser, OrganizationId, User, UserId, Username};

use super::diesel_basic_error_mapping::{
    is_unique_violation, map_basic_diesel_error, map_basic_pool_error, map_corrupt_row,
};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{organization_responsible, users};

/// Diesel implementation of [`UserRepository`].
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a repository over the shared pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserRepositoryError {
    map_basic_pool_error(error, UserRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> UserRepositoryError {
    map_basic_diesel_error(
        error,
        UserRepositoryError::query,
        UserRepositoryError::connection,
    )
}

fn to_domain(row: UserRow) -> Result<User, UserRepositoryError> {
    row.into_domain()
        .map_err(|message| map_corrupt_row(message, UserRepositoryError::query))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = users::table
            .filter(users::username.eq(username.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(to_domain).transpose()
    }

    async fn create(&self, user: &NewUser) -> Result<User, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewUserRow {
            username: user.username.as_ref(),
            first_name: &user.first_name,
            last_name: &user.last_name,
            created_at: user.created_at,
        };
        let inserted = diesel::insert_into(users::table)
            .values(&row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| {
                if is_unique_violation(&err) {
                    UserRepositoryError::duplicate_username(user.username.as_ref())
                } else {
                    map_diesel_error(err)
                }
            })?;
        to_domain(inserted)
    }

    async fn responsible_organization_ids(
        &self,
        user_id: UserId,
    ) -> Result<Vec<OrganizationId>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let ids: Vec<i32> = organization_responsible::table
            .filter(organization_responsible::user_id.eq(user_id.get()))
            .order(organization_responsible::id.asc())
            .select(organization_responsible::organization_id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(ids.into_iter().map(OrganizationId::new).collect())
    }
}
