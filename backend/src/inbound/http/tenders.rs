//! Tender handlers.
//!
//! The acting user is named by the `username` query parameter; there is no
//! session. Status and service type literals are forwarded as text so the
//! domain picks the error kind for a bad value.

use actix_web::{get, patch, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{
    CreateTenderRequest, ListMyTendersRequest, ListTendersRequest, TenderStatusRequest,
    TransitionTenderRequest, UpdateTenderRequest,
};
use crate::domain::{Error, OrganizationId, ServiceType, Tender, TenderId, TenderStatus};
use crate::inbound::http::ApiResult;
use crate::inbound::http::query::{ActorPageQuery, ActorQuery, SetStatusQuery};
use crate::inbound::http::schemas::{ServiceTypeSchema, TenderStatusSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, acting_username, parse_page, require_text, require_username,
};

/// Body for `POST /api/tenders/new`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTenderBody {
    pub name: Option<String>,
    #[serde(default)]
    pub description: String,
    #[schema(value_type = ServiceTypeSchema)]
    pub service_type: String,
    /// Must be `Created`.
    #[schema(value_type = TenderStatusSchema)]
    pub status: String,
    pub organization_id: OrganizationId,
    pub creator_username: String,
}

/// Body for `PATCH /api/tenders/{id}/edit`. Absent or empty fields are kept.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EditTenderBody {
    pub name: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Option<ServiceTypeSchema>)]
    pub service_type: Option<String>,
}

/// Tender representation.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TenderResponse {
    pub id: TenderId,
    pub name: String,
    pub description: String,
    #[schema(value_type = TenderStatusSchema)]
    pub status: TenderStatus,
    #[schema(value_type = ServiceTypeSchema)]
    pub service_type: ServiceType,
    pub version: i32,
    pub created_at: DateTime<Utc>,
}

impl From<Tender> for TenderResponse {
    fn from(tender: Tender) -> Self {
        Self {
            id: tender.id,
            name: tender.name,
            description: tender.description,
            status: tender.status,
            service_type: tender.service_type,
            version: tender.version,
            created_at: tender.created_at,
        }
    }
}

/// `{"status": "..."}` wrapper for status reads.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct TenderStatusResponse {
    #[schema(value_type = TenderStatusSchema)]
    pub status: TenderStatus,
}

/// Query string for the public listing.
#[derive(Debug, Default, Deserialize)]
pub struct ListTendersQuery {
    pub service_type: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

fn into_responses(tenders: Vec<Tender>) -> Vec<TenderResponse> {
    tenders.into_iter().map(Into::into).collect()
}

/// Published tenders ordered by name.
#[utoipa::path(
    get,
    path = "/api/tenders",
    params(
        ("service_type" = Option<ServiceTypeSchema>, Query, description = "Filter by service type"),
        ("limit" = Option<i64>, Query, description = "Page size, default 5"),
        ("offset" = Option<i64>, Query, description = "Items to skip, default 0")
    ),
    responses(
        (status = 200, description = "Published tenders", body = [TenderResponse]),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["tenders"],
    operation_id = "listTenders"
)]
#[get("/tenders")]
pub async fn list_tenders(
    state: web::Data<HttpState>,
    query: web::Query<ListTendersQuery>,
) -> ApiResult<web::Json<Vec<TenderResponse>>> {
    let ListTendersQuery {
        service_type,
        limit,
        offset,
    } = query.into_inner();
    let page = parse_page(limit, offset)?;
    let tenders = state
        .tenders_query
        .list(ListTendersRequest { service_type, page })
        .await?;
    Ok(web::Json(into_responses(tenders)))
}

/// Open a tender for an organization.
#[utoipa::path(
    post,
    path = "/api/tenders/new",
    request_body = CreateTenderBody,
    responses(
        (status = 200, description = "Created tender", body = TenderResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unknown user", body = Error),
        (status = 403, description = "Not responsible", body = Error),
        (status = 404, description = "Organization not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["tenders"],
    operation_id = "createTender"
)]
#[post("/tenders/new")]
pub async fn create_tender(
    state: web::Data<HttpState>,
    payload: web::Json<CreateTenderBody>,
) -> ApiResult<web::Json<TenderResponse>> {
    let CreateTenderBody {
        name,
        description,
        service_type,
        status,
        organization_id,
        creator_username,
    } = payload.into_inner();
    let name = require_text(name, FieldName::new("name"))?;
    let username = acting_username(creator_username, FieldName::new("creatorUsername"))?;
    let tender = state
        .tenders
        .create(CreateTenderRequest {
            username,
            organization_id,
            name,
            description,
            service_type,
            status,
        })
        .await?;
    Ok(web::Json(tender.into()))
}

/// Tenders of the user's organizations, then the ones they created.
#[utoipa::path(
    get,
    path = "/api/tenders/my",
    params(
        ("username" = String, Query, description = "Acting user"),
        ("limit" = Option<i64>, Query, description = "Page size, default 5"),
        ("offset" = Option<i64>, Query, description = "Items to skip, default 0")
    ),
    responses(
        (status = 200, description = "Tenders visible to the user", body = [TenderResponse]),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unknown user", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["tenders"],
    operation_id = "listMyTenders"
)]
#[get("/tenders/my")]
pub async fn list_my_tenders(
    state: web::Data<HttpState>,
    query: web::Query<ActorPageQuery>,
) -> ApiResult<web::Json<Vec<TenderResponse>>> {
    let ActorPageQuery {
        username,
        limit,
        offset,
    } = query.into_inner();
    let username = require_username(username)?;
    let page = parse_page(limit, offset)?;
    let tenders = state
        .tenders_query
        .list_mine(ListMyTendersRequest { username, page })
        .await?;
    Ok(web::Json(into_responses(tenders)))
}

/// Current status of a tender.
#[utoipa::path(
    get,
    path = "/api/tenders/{id}/status",
    params(
        ("id" = i32, Path, description = "Tender identifier"),
        ("username" = String, Query, description = "Acting user")
    ),
    responses(
        (status = 200, description = "Tender status", body = TenderStatusResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unknown user", body = Error),
        (status = 403, description = "Not responsible", body = Error),
        (status = 404, description = "Tender not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["tenders"],
    operation_id = "getTenderStatus"
)]
#[get("/tenders/{id}/status")]
pub async fn get_tender_status(
    state: web::Data<HttpState>,
    path: web::Path<TenderId>,
    query: web::Query<ActorQuery>,
) -> ApiResult<web::Json<TenderStatusResponse>> {
    let username = require_username(query.into_inner().username)?;
    let status = state
        .tenders_query
        .get_status(TenderStatusRequest {
            tender_id: path.into_inner(),
            username,
        })
        .await?;
    Ok(web::Json(TenderStatusResponse { status }))
}

/// Set a tender's status.
#[utoipa::path(
    put,
    path = "/api/tenders/{id}/status",
    params(
        ("id" = i32, Path, description = "Tender identifier"),
        ("status" = TenderStatusSchema, Query, description = "Target status"),
        ("username" = String, Query, description = "Acting user")
    ),
    responses(
        (status = 200, description = "Updated tender", body = TenderResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unknown user", body = Error),
        (status = 403, description = "Not responsible", body = Error),
        (status = 404, description = "Tender not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["tenders"],
    operation_id = "setTenderStatus"
)]
#[put("/tenders/{id}/status")]
pub async fn set_tender_status(
    state: web::Data<HttpState>,
    path: web::Path<TenderId>,
    query: web::Query<SetStatusQuery>,
) -> ApiResult<web::Json<TenderResponse>> {
    let SetStatusQuery { status, username } = query.into_inner();
    let username = require_username(username)?;
    let status = require_text(status, FieldName::new("status"))?;
    let tender = state
        .tenders
        .transition_status(TransitionTenderRequest {
            tender_id: path.into_inner(),
            username,
            status,
        })
        .await?;
    Ok(web::Json(tender.into()))
}

/// Edit a tender's descriptive fields.
#[utoipa::path(
    patch,
    path = "/api/tenders/{id}/edit",
    request_body = EditTenderBody,
    params(
        ("id" = i32, Path, description = "Tender identifier"),
        ("username" = String, Query, description = "Acting user")
    ),
    responses(
        (status = 200, description = "Updated tender", body = TenderResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unknown user", body = Error),
        (status = 403, description = "Not responsible", body = Error),
        (status = 404, description = "Tender not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["tenders"],
    operation_id = "editTender"
)]
#[patch("/tenders/{id}/edit")]
pub async fn edit_tender(
    state: web::Data<HttpState>,
    path: web::Path<TenderId>,
    query: web::Query<ActorQuery>,
    payload: web::Json<EditTenderBody>,
) -> ApiResult<web::Json<TenderResponse>> {
    let username = require_username(query.into_inner().username)?;
    let EditTenderBody {
        name,
        description,
        service_type,
    } = payload.into_inner();
    let tender = state
        .tenders
        .update(UpdateTenderRequest {
            tender_id: path.into_inner(),
            username,
            name,
            description,
            service_type,
        })
        .await?;
    Ok(web::Json(tender.into()))
}

#[cfg(test)]
#[path = "tenders_tests.rs"]
mod tests;
