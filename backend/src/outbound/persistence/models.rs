//! Internal Diesel row structs for database operations.
//!
//! These types never leave the persistence layer. Row-to-domain conversion
//! parses the stored vocabulary strings and reports a corrupt value as a
//! message the calling repository wraps in its own query error.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::{
    Bid, BidId, BidOrigin, BidStatus, Organization, OrganizationId, OrganizationType, ServiceType,
    Tender, TenderId, TenderStatus, User, UserId, Username,
};

use super::schema::{bids, organization_responsible, organizations, tenders, users};

fn parse_column<T: FromStr>(column: &'static str, raw: &str) -> Result<T, String>
where
    T::Err: std::fmt::Display,
{
    T::from_str(raw).map_err(|err| format!("corrupt {column} column: {err}"))
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i32,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
}

impl UserRow {
    pub(crate) fn into_domain(self) -> Result<User, String> {
        let username =
            Username::new(self.username).map_err(|err| format!("corrupt username column: {err}"))?;
        Ok(User {
            id: UserId::new(self.id),
            username,
            first_name: self.first_name,
            last_name: self.last_name,
            created_at: self.created_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub username: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Organizations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = organizations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct OrganizationRow {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub organization_type: String,
    pub created_at: DateTime<Utc>,
}

impl OrganizationRow {
    pub(crate) fn into_domain(self) -> Result<Organization, String> {
        Ok(Organization {
            id: OrganizationId::new(self.id),
            organization_type: parse_column::<OrganizationType>(
                "organization_type",
                &self.organization_type,
            )?,
            name: self.name,
            description: self.description,
            created_at: self.created_at,
        })
    }
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = organizations)]
pub(crate) struct OrganizationFields<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub organization_type: &'a str,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = organizations)]
pub(crate) struct NewOrganizationRow<'a> {
    #[diesel(embed)]
    pub fields: OrganizationFields<'a>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = organization_responsible)]
pub(crate) struct NewResponsibleRow {
    pub organization_id: i32,
    pub user_id: i32,
}

// ---------------------------------------------------------------------------
// Tenders
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tenders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TenderRow {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub service_type: String,
    pub status: String,
    pub version: i32,
    pub organization_id: i32,
    pub creator_id: i32,
    pub created_at: DateTime<Utc>,
}

impl TenderRow {
    pub(crate) fn into_domain(self) -> Result<Tender, String> {
        Ok(Tender {
            id: TenderId::new(self.id),
            service_type: parse_column::<ServiceType>("service_type", &self.service_type)?,
            status: parse_column::<TenderStatus>("status", &self.status)?,
            name: self.name,
            description: self.description,
            version: self.version,
            organization_id: OrganizationId::new(self.organization_id),
            creator_id: UserId::new(self.creator_id),
            created_at: self.created_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tenders)]
pub(crate) struct NewTenderRow<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub service_type: &'a str,
    pub status: &'a str,
    pub version: i32,
    pub organization_id: i32,
    pub creator_id: i32,
    pub created_at: DateTime<Utc>,
}

/// Absent fields are left untouched by Diesel.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = tenders)]
pub(crate) struct TenderChangeset<'a> {
    pub name: Option<&'a str>,
    pub description: Option<&'a str>,
    pub service_type: Option<&'a str>,
}

// ---------------------------------------------------------------------------
// Bids
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = bids)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BidRow {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub status: String,
    pub version: i32,
    pub tender_id: i32,
    pub creator_id: i32,
    pub organization_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl BidRow {
    pub(crate) fn into_domain(self) -> Result<Bid, String> {
        Ok(Bid {
            id: BidId::new(self.id),
            status: parse_column::<BidStatus>("status", &self.status)?,
            name: self.name,
            description: self.description,
            version: self.version,
            tender_id: TenderId::new(self.tender_id),
            creator_id: UserId::new(self.creator_id),
            origin: BidOrigin::from(self.organization_id.map(OrganizationId::new)),
            created_at: self.created_at,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = bids)]
pub(crate) struct NewBidRow<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub status: &'a str,
    pub version: i32,
    pub tender_id: i32,
    pub creator_id: i32,
    pub organization_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = bids)]
pub(crate) struct BidChangeset<'a> {
    pub name: Option<&'a str>,
    pub description: Option<&'a str>,
}
