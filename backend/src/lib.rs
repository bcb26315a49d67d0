//! Tender and bid brokerage backend.
//!
//! Organizations publish tenders; users and organizations answer them with
//! bids. The crate is laid out hexagonally: [`domain`] holds the rules and
//! ports, [`inbound`] the HTTP adapter and [`outbound`] the PostgreSQL
//! adapters.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
