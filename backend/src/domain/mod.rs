//! Domain primitives, ports and services.
//!
//! Purpose: hold the procurement rules independently of transport and
//! storage. Entities and vocabularies live in their own modules; services
//! implement the driving ports over the driven repository ports.
//!
//! Public surface:
//! - Error (alias to `error::Error`) and ErrorCode: transport-agnostic
//!   failure carried across the core boundary.
//! - Tender, Bid, Organization, User and their identifiers.
//! - TenderService, BidService, OrganizationService, UserService.

pub mod error;
pub mod ports;
pub mod vocabulary;

mod bid;
mod bid_service;
mod identity;
mod ids;
mod listing;
mod organization;
mod organization_service;
mod repository_errors;
mod responsibility;
mod tender;
mod tender_service;
mod trace_id;
mod user;
mod user_service;

pub use self::bid::{
    AuthorType, Bid, BidChanges, BidOrigin, BidStatus, Decision, NewBid,
};
pub use self::bid_service::BidService;
pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::identity::IdentityResolver;
pub use self::ids::{BidId, OrganizationId, TenderId, UserId};
pub use self::listing::{ListingSource, aggregate};
pub use self::organization::{Organization, OrganizationDraft, OrganizationType};
pub use self::organization_service::OrganizationService;
pub use self::responsibility::ResponsibilityOracle;
pub use self::tender::{NewTender, ServiceType, Tender, TenderChanges, TenderStatus};
pub use self::tender_service::TenderService;
pub use self::trace_id::TraceId;
pub use self::user::{NewUser, USERNAME_MAX, User, Username, UsernameValidationError};
pub use self::user_service::UserService;
pub use self::vocabulary::UnknownVariant;

/// Convenient result alias for handlers and services.
pub type ApiResult<T> = Result<T, Error>;
