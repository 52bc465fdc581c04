//! Diver registration handler.
//!
//! ```text
//! POST /v1/diver {"email":"diver@example.com","dive_number_offset":12}
//! ```

use actix_web::{HttpResponse, post, web};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{DiverProfile, DiverRegistrationRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /v1/diver`.
///
/// Any `user_id` supplied here is ignored; the directory decides it.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct DiverRequestBody {
    /// Address resolved against the user directory.
    #[serde(default)]
    #[schema(example = "diver@example.com")]
    pub email: Option<String>,
    /// Accepted and ignored.
    #[serde(default, alias = "userId")]
    pub user_id: Option<String>,
    /// Date of the first dive.
    #[serde(default, alias = "divingSince")]
    pub diving_since: Option<NaiveDate>,
    /// Dives logged before this service.
    #[serde(default, alias = "diveNumberOffset")]
    pub dive_number_offset: Option<i64>,
    /// ISO 3166-1 alpha-2 code.
    #[serde(default, alias = "defaultDivingCountry")]
    #[schema(example = "GB")]
    pub default_diving_country: Option<String>,
    /// IANA time zone name.
    #[serde(default, alias = "defaultDivingTimezone")]
    #[schema(example = "Europe/London")]
    pub default_diving_timezone: Option<String>,
}

impl From<DiverRequestBody> for DiverRegistrationRequest {
    fn from(body: DiverRequestBody) -> Self {
        Self {
            email: body.email,
            user_id: body.user_id,
            diving_since: body.diving_since,
            dive_number_offset: body.dive_number_offset,
            default_diving_country: body.default_diving_country,
            default_diving_timezone: body.default_diving_timezone,
        }
    }
}

/// Diver record merged with the directory identity it was bound to.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DiverProfileResponse {
    /// Key issued by the directory.
    pub user_id: String,
    /// Row version.
    pub version: u32,
    /// Insertion time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
    /// Date of the first dive.
    pub diving_since: Option<NaiveDate>,
    /// Dives logged before this service.
    pub dive_number_offset: u16,
    /// ISO 3166-1 alpha-2 code.
    pub default_diving_country: Option<String>,
    /// IANA time zone name.
    pub default_diving_timezone: Option<String>,
    /// Address the diver registered with.
    pub email: String,
    /// Full name from the directory.
    pub name: String,
    /// Preferred short name from the directory.
    pub friendly_name: Option<String>,
    /// Date of birth from the directory.
    pub birth_date: Option<NaiveDate>,
    /// Gender from the directory.
    pub gender: Option<String>,
    /// Country from the directory.
    pub country_code: Option<String>,
    /// Time zone from the directory.
    pub time_zone: Option<String>,
}

impl From<DiverProfile> for DiverProfileResponse {
    fn from(profile: DiverProfile) -> Self {
        let DiverProfile {
            diver,
            email,
            identity,
        } = profile;
        Self {
            user_id: diver.user_id.to_string(),
            version: diver.version,
            created_at: diver.created_at,
            updated_at: diver.updated_at,
            diving_since: diver.diving_since,
            dive_number_offset: diver.dive_number_offset,
            default_diving_country: diver.default_diving_country,
            default_diving_timezone: diver.default_diving_timezone,
            email: email.to_string(),
            name: identity.name,
            friendly_name: identity.friendly_name,
            birth_date: identity.birth_date,
            gender: identity.gender,
            country_code: identity.country_code,
            time_zone: identity.time_zone,
        }
    }
}

/// `{"diver": ...}` wrapper.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DiverEnvelope {
    /// The registered diver.
    pub diver: DiverProfileResponse,
}

/// Register a diver against their user-directory account.
#[utoipa::path(
    post,
    path = "/v1/diver",
    request_body = DiverRequestBody,
    responses(
        (status = 202, description = "Diver registered", body = DiverEnvelope),
        (status = 400, description = "Unreadable body", body = ErrorSchema),
        (status = 404, description = "No active directory account", body = ErrorSchema),
        (status = 422, description = "Field validation failed", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["divers"],
    operation_id = "createDiver"
)]
#[post("/diver")]
pub async fn create_diver(
    state: web::Data<HttpState>,
    payload: web::Json<DiverRequestBody>,
) -> ApiResult<HttpResponse> {
    let profile = state.divers.register(payload.into_inner().into()).await?;
    Ok(HttpResponse::Accepted().json(DiverEnvelope {
        diver: profile.into(),
    }))
}
