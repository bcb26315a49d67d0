//! User directory handlers.
//!
//! ```text
//! POST /api/users/new {"username":"alice","firstName":"Alice","lastName":"Smith"}
//! GET  /api/users/alice
//! GET  /api/users/alice/organizations
//! ```

use actix_web::{get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::RegisterUserRequest;
use crate::domain::{Error, OrganizationId, User, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_username};

/// Registration body for `POST /api/users/new`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserBody {
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

/// User representation returned by the directory.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: UserId,
    #[schema(value_type = String, example = "alice")]
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username.into(),
            first_name: user.first_name,
            last_name: user.last_name,
            created_at: user.created_at,
        }
    }
}

/// Register a user.
#[utoipa::path(
    post,
    path = "/api/users/new",
    request_body = RegisterUserBody,
    responses(
        (status = 200, description = "Registered user", body = UserResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Username taken", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "registerUser"
)]
#[post("/users/new")]
pub async fn register_user(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterUserBody>,
) -> ApiResult<web::Json<UserResponse>> {
    let RegisterUserBody {
        username,
        first_name,
        last_name,
    } = payload.into_inner();
    let username = parse_username(username, FieldName::new("username"))?;
    let user = state
        .users
        .register(RegisterUserRequest {
            username,
            first_name,
            last_name,
        })
        .await?;
    Ok(web::Json(user.into()))
}

/// Look up a user by username.
#[utoipa::path(
    get,
    path = "/api/users/{username}",
    params(("username" = String, Path, description = "Username")),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{username}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserResponse>> {
    let username = parse_username(path.into_inner(), FieldName::new("username"))?;
    let user = state.users_query.get(username).await?;
    Ok(web::Json(user.into()))
}

/// Organizations the user is responsible for.
#[utoipa::path(
    get,
    path = "/api/users/{username}/organizations",
    params(("username" = String, Path, description = "Username")),
    responses(
        (status = 200, description = "Organization identifiers", body = [OrganizationId]),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "listUserOrganizations"
)]
#[get("/users/{username}/organizations")]
pub async fn list_user_organizations(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<OrganizationId>>> {
    let username = parse_username(path.into_inner(), FieldName::new("username"))?;
    let ids = state
        .users_query
        .responsible_organizations(username)
        .await?;
    Ok(web::Json(ids))
}
