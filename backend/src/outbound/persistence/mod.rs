//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories are thin translators between Diesel rows (`models.rs`,
//! `schema.rs`, both private) and domain entities. They share one
//! [`DbPool`] of `diesel-async` connections and map every failure to the
//! typed error of the port they implement.
//!
//! ```ignore
//! use tender_backend::outbound::persistence::{DbPool, DieselTenderRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/tenders")).await?;
//! let tenders = DieselTenderRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_bid_repository;
mod diesel_organization_repository;
mod diesel_tender_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_bid_repository::DieselBidRepository;
pub use diesel_organization_repository::DieselOrganizationRepository;
pub use diesel_tender_repository::DieselTenderRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
