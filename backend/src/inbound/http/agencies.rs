//! Agency catalogue handlers.
//!
//! ```text
//! POST /v1/agency {"common_name":"PADI","full_name":"Professional Association of Diving Instructors"}
//! GET  /v1/agency
//! GET  /v1/agency/{id}
//! ```

use actix_web::http::header::LOCATION;
use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Agency, AgencyRequest, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /v1/agency`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct AgencyRequestBody {
    /// Short name, unique.
    #[serde(default, alias = "commonName")]
    #[schema(example = "PADI")]
    pub common_name: Option<String>,
    /// Registered full name, unique.
    #[serde(default, alias = "fullName")]
    pub full_name: Option<String>,
    /// Optional acronym.
    #[serde(default)]
    pub acronym: Option<String>,
    /// Agency web site; `http` or `https` only.
    #[serde(default)]
    #[schema(example = "https://www.padi.com")]
    pub url: Option<String>,
}

impl From<AgencyRequestBody> for AgencyRequest {
    fn from(body: AgencyRequestBody) -> Self {
        Self {
            common_name: body.common_name,
            full_name: body.full_name,
            acronym: body.acronym,
            url: body.url,
        }
    }
}

/// Stored agency.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AgencyResponse {
    /// Surrogate key.
    pub id: i64,
    /// Short name, unique.
    pub common_name: String,
    /// Registered full name, unique.
    pub full_name: String,
    /// Optional acronym.
    pub acronym: Option<String>,
    /// Agency web site; `http` or `https` only.
    pub url: Option<String>,
}

impl From<Agency> for AgencyResponse {
    fn from(agency: Agency) -> Self {
        Self {
            id: agency.id,
            common_name: agency.common_name,
            full_name: agency.full_name,
            acronym: agency.acronym,
            url: agency.url,
        }
    }
}

/// `{"agency": ...}` wrapper.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AgencyEnvelope {
    /// The stored agency.
    pub agency: AgencyResponse,
}

/// `{"agencies": [...]}` wrapper.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AgencyListEnvelope {
    /// Every catalogued agency.
    pub agencies: Vec<AgencyResponse>,
}

fn parse_agency_id(raw: &str) -> Result<i64, Error> {
    raw.parse::<i64>()
        .map_err(|_| Error::invalid_request(format!("agency id {raw:?} is not an integer")))
}

/// Add an agency to the catalogue.
#[utoipa::path(
    post,
    path = "/v1/agency",
    request_body = AgencyRequestBody,
    responses(
        (
            status = 201,
            description = "Agency created",
            headers(("Location" = String, description = "URL of the new agency")),
            body = AgencyEnvelope
        ),
        (status = 400, description = "Unreadable body", body = ErrorSchema),
        (status = 422, description = "Field validation failed or duplicate name", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["agencies"],
    operation_id = "createAgency"
)]
#[post("/agency")]
pub async fn create_agency(
    state: web::Data<HttpState>,
    payload: web::Json<AgencyRequestBody>,
) -> ApiResult<HttpResponse> {
    let agency = state.agencies.create_agency(payload.into_inner().into()).await?;
    Ok(HttpResponse::Created()
        .insert_header((LOCATION, format!("/v1/agency/{}", agency.id)))
        .json(AgencyEnvelope {
            agency: agency.into(),
        }))
}

/// List every agency.
#[utoipa::path(
    get,
    path = "/v1/agency",
    responses(
        (status = 200, description = "Agencies", body = AgencyListEnvelope),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["agencies"],
    operation_id = "listAgencies"
)]
#[get("/agency")]
pub async fn list_agencies(state: web::Data<HttpState>) -> ApiResult<web::Json<AgencyListEnvelope>> {
    let agencies = state.agencies_query.list_agencies().await?;
    Ok(web::Json(AgencyListEnvelope {
        agencies: agencies.into_iter().map(AgencyResponse::from).collect(),
    }))
}

/// Fetch one agency.
#[utoipa::path(
    get,
    path = "/v1/agency/{id}",
    params(("id" = i64, Path, description = "Agency id")),
    responses(
        (status = 200, description = "Agency", body = AgencyEnvelope),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 404, description = "Unknown agency", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["agencies"],
    operation_id = "getAgency"
)]
#[get("/agency/{id}")]
pub async fn get_agency(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<AgencyEnvelope>> {
    let id = parse_agency_id(&path)?;
    let agency = state.agencies_query.get_agency(id).await?;
    Ok(web::Json(AgencyEnvelope {
        agency: agency.into(),
    }))
}
