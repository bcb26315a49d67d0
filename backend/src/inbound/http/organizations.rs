//! Organization management handlers.

use actix_web::{HttpResponse, get, patch, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{
    CreateOrganizationRequest, ListOrganizationsRequest, MakeResponsibleRequest,
    UpdateOrganizationRequest,
};
use crate::domain::{Error, Organization, OrganizationId, OrganizationType};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::OrganizationTypeSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, acting_username, parse_page};

/// Body for creating or editing an organization.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationBody {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    #[schema(value_type = OrganizationTypeSchema)]
    pub organization_type: String,
}

/// Organization representation.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationResponse {
    pub id: OrganizationId,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    #[schema(value_type = OrganizationTypeSchema)]
    pub organization_type: OrganizationType,
    pub created_at: DateTime<Utc>,
}

impl From<Organization> for OrganizationResponse {
    fn from(org: Organization) -> Self {
        Self {
            id: org.id,
            name: org.name,
            description: org.description,
            organization_type: org.organization_type,
            created_at: org.created_at,
        }
    }
}

/// Query string for `GET /api/organizations`.
#[derive(Debug, Default, Deserialize)]
pub struct ListOrganizationsQuery {
    #[serde(rename = "type")]
    pub organization_type: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Path segments for the responsibility grant.
#[derive(Debug, Deserialize)]
pub struct ResponsiblePath {
    pub id: OrganizationId,
    pub username: String,
}

/// List organizations ordered by name.
#[utoipa::path(
    get,
    path = "/api/organizations",
    params(
        ("type" = Option<OrganizationTypeSchema>, Query, description = "Filter by legal form"),
        ("limit" = Option<i64>, Query, description = "Page size, default 5"),
        ("offset" = Option<i64>, Query, description = "Items to skip, default 0")
    ),
    responses(
        (status = 200, description = "Organizations", body = [OrganizationResponse]),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["organizations"],
    operation_id = "listOrganizations"
)]
#[get("/organizations")]
pub async fn list_organizations(
    state: web::Data<HttpState>,
    query: web::Query<ListOrganizationsQuery>,
) -> ApiResult<web::Json<Vec<OrganizationResponse>>> {
    let ListOrganizationsQuery {
        organization_type,
        limit,
        offset,
    } = query.into_inner();
    let page = parse_page(limit, offset)?;
    let organizations = state
        .organizations_query
        .list(ListOrganizationsRequest {
            organization_type,
            page,
        })
        .await?;
    Ok(web::Json(organizations.into_iter().map(Into::into).collect()))
}

/// Register an organization.
#[utoipa::path(
    post,
    path = "/api/organizations/new",
    request_body = OrganizationBody,
    responses(
        (status = 200, description = "Created organization", body = OrganizationResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["organizations"],
    operation_id = "createOrganization"
)]
#[post("/organizations/new")]
pub async fn create_organization(
    state: web::Data<HttpState>,
    payload: web::Json<OrganizationBody>,
) -> ApiResult<web::Json<OrganizationResponse>> {
    let OrganizationBody {
        name,
        description,
        organization_type,
    } = payload.into_inner();
    let organization = state
        .organizations
        .create(CreateOrganizationRequest {
            name,
            description,
            organization_type,
        })
        .await?;
    Ok(web::Json(organization.into()))
}

/// Overwrite an organization's fields.
#[utoipa::path(
    patch,
    path = "/api/organizations/{id}/edit",
    request_body = OrganizationBody,
    params(("id" = i32, Path, description = "Organization identifier")),
    responses(
        (status = 200, description = "Updated organization", body = OrganizationResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["organizations"],
    operation_id = "updateOrganization"
)]
#[patch("/organizations/{id}/edit")]
pub async fn update_organization(
    state: web::Data<HttpState>,
    path: web::Path<OrganizationId>,
    payload: web::Json<OrganizationBody>,
) -> ApiResult<web::Json<OrganizationResponse>> {
    let OrganizationBody {
        name,
        description,
        organization_type,
    } = payload.into_inner();
    let organization = state
        .organizations
        .update(UpdateOrganizationRequest {
            organization_id: path.into_inner(),
            name,
            description,
            organization_type,
        })
        .await?;
    Ok(web::Json(organization.into()))
}

/// Make a user responsible for an organization.
#[utoipa::path(
    put,
    path = "/api/organizations/{id}/users/{username}/make_responsible",
    params(
        ("id" = i32, Path, description = "Organization identifier"),
        ("username" = String, Path, description = "User to grant")
    ),
    responses(
        (status = 200, description = "Responsibility recorded"),
        (status = 401, description = "Unknown user", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 409, description = "Already responsible", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["organizations"],
    operation_id = "makeResponsible"
)]
#[put("/organizations/{id}/users/{username}/make_responsible")]
pub async fn make_responsible(
    state: web::Data<HttpState>,
    path: web::Path<ResponsiblePath>,
) -> ApiResult<HttpResponse> {
    let ResponsiblePath { id, username } = path.into_inner();
    let username = acting_username(username, FieldName::new("username"))?;
    state
        .organizations
        .make_responsible(MakeResponsibleRequest {
            organization_id: id,
            username,
        })
        .await?;
    Ok(HttpResponse::Ok().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{MockPorts, error_code, test_app};
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use chrono::TimeZone;
    use pagination::Page;
    use rstest::{fixture, rstest};
    use serde_json::{Value, json};

    #[fixture]
    fn acme() -> Organization {
        Organization {
            id: OrganizationId::new(7),
            name: "Acme".to_owned(),
            description: "Anvils".to_owned(),
            organization_type: OrganizationType::Llc,
            created_at: Utc
                .with_ymd_and_hms(2024, 1, 2, 3, 4, 5)
                .single()
                .expect("valid timestamp"),
        }
    }

    fn scope() -> actix_web::Scope {
        web::scope("/api")
            .service(list_organizations)
            .service(create_organization)
            .service(update_organization)
            .service(make_responsible)
    }

    #[rstest]
    #[actix_web::test]
    async fn list_forwards_filter_and_page(acme: Organization) {
        let mut ports = MockPorts::default();
        ports
            .organizations_query
            .expect_list()
            .withf(|req| {
                req.organization_type.as_deref() == Some("llc")
                    && req.page == Page::from_parts(2, 1)
            })
            .return_once(move |_| Ok(vec![acme]));
        let app = actix_test::init_service(test_app(ports.into_state(), scope())).await;

        let request = actix_test::TestRequest::get()
            .uri("/api/organizations?type=llc&limit=2&offset=1")
            .to_request();
        let body: Value = actix_test::call_and_read_body_json(&app, request).await;

        assert_eq!(body[0]["type"], json!("LLC"));
        assert_eq!(body[0]["name"], json!("Acme"));
    }

    #[rstest]
    #[actix_web::test]
    async fn list_rejects_negative_limit() {
        let app =
            actix_test::init_service(test_app(MockPorts::default().into_state(), scope())).await;
        let request = actix_test::TestRequest::get()
            .uri("/api/organizations?limit=-1")
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[rstest]
    #[actix_web::test]
    async fn create_passes_type_through(acme: Organization) {
        let mut ports = MockPorts::default();
        ports
            .organizations
            .expect_create()
            .withf(|req| req.name == "Acme" && req.organization_type == "LLC")
            .return_once(move |_| Ok(acme));
        let app = actix_test::init_service(test_app(ports.into_state(), scope())).await;

        let request = actix_test::TestRequest::post()
            .uri("/api/organizations/new")
            .set_json(json!({ "name": "Acme", "description": "Anvils", "type": "LLC" }))
            .to_request();
        let body: Value = actix_test::call_and_read_body_json(&app, request).await;

        assert_eq!(body["id"], json!(7));
    }

    #[rstest]
    #[actix_web::test]
    async fn update_of_missing_organization_is_not_found() {
        let mut ports = MockPorts::default();
        ports
            .organizations
            .expect_update()
            .withf(|req| req.organization_id == OrganizationId::new(99))
            .return_once(|_| Err(Error::not_found("organization not found")));
        let app = actix_test::init_service(test_app(ports.into_state(), scope())).await;

        let request = actix_test::TestRequest::patch()
            .uri("/api/organizations/99/edit")
            .set_json(json!({ "name": "Acme", "type": "LLC" }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[rstest]
    #[actix_web::test]
    async fn non_numeric_id_is_invalid_request() {
        let app =
            actix_test::init_service(test_app(MockPorts::default().into_state(), scope())).await;
        let request = actix_test::TestRequest::patch()
            .uri("/api/organizations/acme/edit")
            .set_json(json!({ "name": "Acme", "type": "LLC" }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(error_code(&body), Some("invalid_request"));
    }

    #[rstest]
    #[case(Ok(()), StatusCode::OK)]
    #[case(Err(Error::already_responsible("user is already responsible")), StatusCode::CONFLICT)]
    #[case(Err(Error::not_authenticated("you aren't authorized")), StatusCode::UNAUTHORIZED)]
    #[actix_web::test]
    async fn make_responsible_maps_outcome(
        #[case] outcome: Result<(), Error>,
        #[case] status: StatusCode,
    ) {
        let mut ports = MockPorts::default();
        ports
            .organizations
            .expect_make_responsible()
            .withf(|req| {
                req.organization_id == OrganizationId::new(7) && req.username.as_ref() == "bob"
            })
            .return_once(move |_| outcome);
        let app = actix_test::init_service(test_app(ports.into_state(), scope())).await;

        let request = actix_test::TestRequest::put()
            .uri("/api/organizations/7/users/bob/make_responsible")
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), status);
    }

    #[rstest]
    #[actix_web::test]
    async fn malformed_responsible_name_is_not_authenticated() {
        let app =
            actix_test::init_service(test_app(MockPorts::default().into_state(), scope())).await;

        let request = actix_test::TestRequest::put()
            .uri("/api/organizations/7/users/%20bob/make_responsible")
            .to_request();
        let response = actix_test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(error_code(&body), Some("not_authenticated"));
    }
}
