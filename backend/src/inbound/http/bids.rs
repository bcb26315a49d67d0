//! Bid handlers.

use actix_web::{get, patch, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{
    BidStatusRequest, CreateBidRequest, ListMyBidsRequest, ListTenderBidsRequest,
    SubmitDecisionRequest, TransitionBidRequest, UpdateBidRequest,
};
use crate::domain::{
    AuthorType, Bid, BidId, BidStatus, Error, OrganizationId, TenderId, UserId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::query::{ActorPageQuery, ActorQuery, SetStatusQuery};
use crate::inbound::http::schemas::{AuthorTypeSchema, BidStatusSchema, DecisionSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, acting_username, parse_page, require_text, require_username,
};

/// Body for `POST /api/bids/new`.
///
/// Without `organizationId` the bid is personal.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBidBody {
    pub name: Option<String>,
    #[serde(default)]
    pub description: String,
    /// Must be `Created`.
    #[schema(value_type = BidStatusSchema)]
    pub status: String,
    pub tender_id: TenderId,
    pub organization_id: Option<OrganizationId>,
    pub creator_username: String,
}

/// Body for `PATCH /api/bids/{id}/edit`. Absent or empty fields are kept.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EditBidBody {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Bid representation. `authorId` is the user who placed the bid.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BidResponse {
    pub id: BidId,
    pub name: String,
    #[schema(value_type = BidStatusSchema)]
    pub status: BidStatus,
    #[schema(value_type = AuthorTypeSchema)]
    pub author_type: AuthorType,
    pub author_id: UserId,
    pub version: i32,
    pub created_at: DateTime<Utc>,
}

impl From<Bid> for BidResponse {
    fn from(bid: Bid) -> Self {
        Self {
            author_type: bid.author_type(),
            id: bid.id,
            name: bid.name,
            status: bid.status,
            author_id: bid.creator_id,
            version: bid.version,
            created_at: bid.created_at,
        }
    }
}

/// `{"status": "..."}` wrapper for status reads.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct BidStatusResponse {
    #[schema(value_type = BidStatusSchema)]
    pub status: BidStatus,
}

/// `?decision=&username=` for decisions.
#[derive(Debug, Default, Deserialize)]
pub struct DecisionQuery {
    pub decision: Option<String>,
    pub username: Option<String>,
}

fn into_responses(bids: Vec<Bid>) -> Vec<BidResponse> {
    bids.into_iter().map(Into::into).collect()
}

/// Place a bid on a tender.
#[utoipa::path(
    post,
    path = "/api/bids/new",
    request_body = CreateBidBody,
    responses(
        (status = 200, description = "Created bid", body = BidResponse),
        (status = 400, description = "Invalid request or own tender", body = Error),
        (status = 401, description = "Unknown user", body = Error),
        (status = 403, description = "Not responsible", body = Error),
        (status = 404, description = "Tender or organization not found", body = Error),
        (status = 409, description = "Active bid already exists", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["bids"],
    operation_id = "createBid"
)]
#[post("/bids/new")]
pub async fn create_bid(
    state: web::Data<HttpState>,
    payload: web::Json<CreateBidBody>,
) -> ApiResult<web::Json<BidResponse>> {
    let CreateBidBody {
        name,
        description,
        status,
        tender_id,
        organization_id,
        creator_username,
    } = payload.into_inner();
    let name = require_text(name, FieldName::new("name"))?;
    let username = acting_username(creator_username, FieldName::new("creatorUsername"))?;
    let bid = state
        .bids
        .create(CreateBidRequest {
            username,
            tender_id,
            organization_id,
            name,
            description,
            status,
        })
        .await?;
    Ok(web::Json(bid.into()))
}

/// Bids of the user's organizations, then their personal bids.
#[utoipa::path(
    get,
    path = "/api/bids/my",
    params(
        ("username" = String, Query, description = "Acting user"),
        ("limit" = Option<i64>, Query, description = "Page size, default 5"),
        ("offset" = Option<i64>, Query, description = "Items to skip, default 0")
    ),
    responses(
        (status = 200, description = "Bids visible to the user", body = [BidResponse]),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unknown user", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["bids"],
    operation_id = "listMyBids"
)]
#[get("/bids/my")]
pub async fn list_my_bids(
    state: web::Data<HttpState>,
    query: web::Query<ActorPageQuery>,
) -> ApiResult<web::Json<Vec<BidResponse>>> {
    let ActorPageQuery {
        username,
        limit,
        offset,
    } = query.into_inner();
    let username = require_username(username)?;
    let page = parse_page(limit, offset)?;
    let bids = state
        .bids_query
        .list_mine(ListMyBidsRequest { username, page })
        .await?;
    Ok(web::Json(into_responses(bids)))
}

/// Published bids on a tender, for its organization.
#[utoipa::path(
    get,
    path = "/api/bids/{tender_id}/list",
    params(
        ("tender_id" = i32, Path, description = "Tender identifier"),
        ("username" = String, Query, description = "Acting user"),
        ("limit" = Option<i64>, Query, description = "Page size, default 5"),
        ("offset" = Option<i64>, Query, description = "Items to skip, default 0")
    ),
    responses(
        (status = 200, description = "Published bids", body = [BidResponse]),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unknown user", body = Error),
        (status = 403, description = "Not responsible", body = Error),
        (status = 404, description = "Tender not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["bids"],
    operation_id = "listTenderBids"
)]
#[get("/bids/{tender_id}/list")]
pub async fn list_tender_bids(
    state: web::Data<HttpState>,
    path: web::Path<TenderId>,
    query: web::Query<ActorPageQuery>,
) -> ApiResult<web::Json<Vec<BidResponse>>> {
    let ActorPageQuery {
        username,
        limit,
        offset,
    } = query.into_inner();
    let username = require_username(username)?;
    let page = parse_page(limit, offset)?;
    let bids = state
        .bids_query
        .list_for_tender(ListTenderBidsRequest {
            tender_id: path.into_inner(),
            username,
            page,
        })
        .await?;
    Ok(web::Json(into_responses(bids)))
}

/// Current status of a bid.
#[utoipa::path(
    get,
    path = "/api/bids/{id}/status",
    params(
        ("id" = i32, Path, description = "Bid identifier"),
        ("username" = String, Query, description = "Acting user")
    ),
    responses(
        (status = 200, description = "Bid status", body = BidStatusResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unknown user", body = Error),
        (status = 403, description = "Not visible to the user", body = Error),
        (status = 404, description = "Bid not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["bids"],
    operation_id = "getBidStatus"
)]
#[get("/bids/{id}/status")]
pub async fn get_bid_status(
    state: web::Data<HttpState>,
    path: web::Path<BidId>,
    query: web::Query<ActorQuery>,
) -> ApiResult<web::Json<BidStatusResponse>> {
    let username = require_username(query.into_inner().username)?;
    let status = state
        .bids_query
        .get_status(BidStatusRequest {
            bid_id: path.into_inner(),
            username,
        })
        .await?;
    Ok(web::Json(BidStatusResponse { status }))
}

/// Move a bid to another status.
#[utoipa::path(
    put,
    path = "/api/bids/{id}/status",
    params(
        ("id" = i32, Path, description = "Bid identifier"),
        ("status" = BidStatusSchema, Query, description = "Target status"),
        ("username" = String, Query, description = "Acting user")
    ),
    responses(
        (status = 200, description = "Updated bid", body = BidResponse),
        (status = 400, description = "Invalid request or status", body = Error),
        (status = 401, description = "Unknown user", body = Error),
        (status = 403, description = "Insufficient rights", body = Error),
        (status = 404, description = "Bid not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["bids"],
    operation_id = "setBidStatus"
)]
#[put("/bids/{id}/status")]
pub async fn set_bid_status(
    state: web::Data<HttpState>,
    path: web::Path<BidId>,
    query: web::Query<SetStatusQuery>,
) -> ApiResult<web::Json<BidResponse>> {
    let SetStatusQuery { status, username } = query.into_inner();
    let username = require_username(username)?;
    let status = require_text(status, FieldName::new("status"))?;
    let bid = state
        .bids
        .transition_status(TransitionBidRequest {
            bid_id: path.into_inner(),
            username,
            status,
        })
        .await?;
    Ok(web::Json(bid.into()))
}

/// Approve or reject a published bid.
#[utoipa::path(
    put,
    path = "/api/bids/{id}/submit_decision",
    params(
        ("id" = i32, Path, description = "Bid identifier"),
        ("decision" = DecisionSchema, Query, description = "Outcome"),
        ("username" = String, Query, description = "Acting user")
    ),
    responses(
        (status = 200, description = "Decided bid", body = BidResponse),
        (status = 400, description = "Invalid request or decision", body = Error),
        (status = 401, description = "Unknown user", body = Error),
        (status = 403, description = "Not responsible for the tender", body = Error),
        (status = 404, description = "Bid not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["bids"],
    operation_id = "submitBidDecision"
)]
#[put("/bids/{id}/submit_decision")]
pub async fn submit_decision(
    state: web::Data<HttpState>,
    path: web::Path<BidId>,
    query: web::Query<DecisionQuery>,
) -> ApiResult<web::Json<BidResponse>> {
    let DecisionQuery { decision, username } = query.into_inner();
    let username = require_username(username)?;
    let decision = require_text(decision, FieldName::new("decision"))?;
    let bid = state
        .bids
        .submit_decision(SubmitDecisionRequest {
            bid_id: path.into_inner(),
            username,
            decision,
        })
        .await?;
    Ok(web::Json(bid.into()))
}

/// Edit a bid's name or description.
#[utoipa::path(
    patch,
    path = "/api/bids/{id}/edit",
    request_body = EditBidBody,
    params(
        ("id" = i32, Path, description = "Bid identifier"),
        ("username" = String, Query, description = "Acting user")
    ),
    responses(
        (status = 200, description = "Updated bid", body = BidResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unknown user", body = Error),
        (status = 403, description = "Not the author", body = Error),
        (status = 404, description = "Bid not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["bids"],
    operation_id = "editBid"
)]
#[patch("/bids/{id}/edit")]
pub async fn edit_bid(
    state: web::Data<HttpState>,
    path: web::Path<BidId>,
    query: web::Query<ActorQuery>,
    payload: web::Json<EditBidBody>,
) -> ApiResult<web::Json<BidResponse>> {
    let username = require_username(query.into_inner().username)?;
    let EditBidBody { name, description } = payload.into_inner();
    let bid = state
        .bids
        .update(UpdateBidRequest {
            bid_id: path.into_inner(),
            username,
            name,
            description,
        })
        .await?;
    Ok(web::Json(bid.into()))
}

#[cfg(test)]
#[path = "bids_tests.rs"]
mod tests;
