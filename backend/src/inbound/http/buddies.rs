//! Buddy handlers.
//!
//! ```text
//! POST /v1/buddy {"user_id":"owner","name":"Hans","email":"hans@example.com"}
//! GET  /v1/buddy/user/{id}
//! ```

use actix_web::{HttpResponse, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Buddy, BuddyRequest, FieldErrors, IdentityKey};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /v1/buddy`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct BuddyRequestBody {
    /// Identity key of the diver who owns the buddy entry.
    #[serde(default, alias = "userId")]
    pub user_id: Option<String>,
    /// Display name; replaced by the directory name when linked.
    #[serde(default)]
    pub name: Option<String>,
    /// Contact address.
    #[serde(default)]
    pub email: Option<String>,
    /// Contact number, 7 to 24 bytes.
    #[serde(default, alias = "phoneNumber")]
    pub phone_number: Option<String>,
    /// Organisation the buddy belongs to.
    #[serde(default)]
    pub organisation: Option<String>,
    /// Membership number; requires `organisation`.
    #[serde(default, alias = "orgMemberId")]
    pub org_member_id: Option<String>,
    /// Free text, stored as submitted.
    #[serde(default)]
    pub notes: Option<String>,
}

impl From<BuddyRequestBody> for BuddyRequest {
    fn from(body: BuddyRequestBody) -> Self {
        Self {
            user_id: body.user_id,
            name: body.name,
            email: body.email,
            phone_number: body.phone_number,
            organisation: body.organisation,
            org_member_id: body.org_member_id,
            notes: body.notes,
        }
    }
}

/// Stored buddy.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BuddyResponse {
    /// Surrogate key.
    pub id: i64,
    /// Row version.
    pub version: u32,
    /// Insertion time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
    /// Owning diver key.
    pub user_id: String,
    /// Set when the email belongs to another registered diver.
    pub buddy_user_id: Option<String>,
    /// Display name; replaced by the directory name when linked.
    pub name: String,
    /// Contact address.
    pub email: Option<String>,
    /// Contact number, 7 to 24 bytes.
    pub phone_number: Option<String>,
    /// Organisation the buddy belongs to.
    pub organisation: Option<String>,
    /// Membership number; requires `organisation`.
    pub org_member_id: Option<String>,
    /// Free text, stored as submitted.
    pub notes: Option<String>,
}

impl From<Buddy> for BuddyResponse {
    fn from(buddy: Buddy) -> Self {
        let (organisation, org_member_id) = match buddy.affiliation {
            Some(affiliation) => (Some(affiliation.organisation), affiliation.member_id),
            None => (None, None),
        };
        Self {
            id: buddy.id,
            version: buddy.version,
            created_at: buddy.created_at,
            updated_at: buddy.updated_at,
            user_id: buddy.owner.to_string(),
            buddy_user_id: buddy.linked_user_id.map(|key| key.to_string()),
            name: buddy.name,
            email: buddy.email,
            phone_number: buddy.phone_number,
            organisation,
            org_member_id,
            notes: buddy.notes,
        }
    }
}

/// `{"buddy": ...}` wrapper.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BuddyEnvelope {
    /// The stored buddy.
    pub buddy: BuddyResponse,
}

/// `{"buddies": [...]}` wrapper.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BuddyListEnvelope {
    /// Buddies owned by the requested diver.
    pub buddies: Vec<BuddyResponse>,
}

/// Add a buddy, linking it to a registered diver when the email resolves.
#[utoipa::path(
    post,
    path = "/v1/buddy",
    request_body = BuddyRequestBody,
    responses(
        (status = 201, description = "Buddy added", body = BuddyEnvelope),
        (status = 400, description = "Unreadable body", body = ErrorSchema),
        (
            status = 403,
            description = "Directory rejected the lookup; other directory 4xx statuses are relayed the same way",
            body = ErrorSchema
        ),
        (status = 422, description = "Field validation failed", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["buddies"],
    operation_id = "createBuddy"
)]
#[post("/buddy")]
pub async fn create_buddy(
    state: web::Data<HttpState>,
    payload: web::Json<BuddyRequestBody>,
) -> ApiResult<HttpResponse> {
    let buddy = state.buddies.add_buddy(payload.into_inner().into()).await?;
    Ok(HttpResponse::Created().json(BuddyEnvelope {
        buddy: buddy.into(),
    }))
}

/// List the buddies owned by a diver.
#[utoipa::path(
    get,
    path = "/v1/buddy/user/{id}",
    params(("id" = String, Path, description = "Owner identity key")),
    responses(
        (status = 200, description = "Buddies", body = BuddyListEnvelope),
        (status = 422, description = "Malformed identity key", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["buddies"],
    operation_id = "listBuddies"
)]
#[get("/buddy/user/{id}")]
pub async fn list_buddies(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<BuddyListEnvelope>> {
    let owner = IdentityKey::new(path.into_inner())
        .map_err(|err| FieldErrors::single("user_id", err.to_string()))?;
    let buddies = state.buddies_query.list_buddies(&owner).await?;
    Ok(web::Json(BuddyListEnvelope {
        buddies: buddies.into_iter().map(BuddyResponse::from).collect(),
    }))
}
