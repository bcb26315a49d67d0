//! Query strings shared by the tender and bid handlers.
//!
//! Every field is optional at the extractor level so a missing parameter
//! reaches [`crate::inbound::http::validation`] and earns the domain error
//! shape instead of Actix's plain-text rejection.

use serde::Deserialize;

/// `?username=` naming the acting user.
#[derive(Debug, Default, Deserialize)]
pub struct ActorQuery {
    pub username: Option<String>,
}

/// `?username=&limit=&offset=` for per-user and per-tender listings.
#[derive(Debug, Default, Deserialize)]
pub struct ActorPageQuery {
    pub username: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// `?status=&username=` for status transitions.
#[derive(Debug, Default, Deserialize)]
pub struct SetStatusQuery {
    pub status: Option<String>,
    pub username: Option<String>,
}
