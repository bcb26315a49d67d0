//! Outbound adapters implementing the driven ports.
//!
//! - **persistence**: PostgreSQL repositories over Diesel and bb8.
//!
//! Adapters translate between domain types and storage representations and
//! hold no business rules.

pub mod persistence;
