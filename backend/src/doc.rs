//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every inbound HTTP path and the error schema
//! wrappers. Swagger UI serves it in debug builds.

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Diver service API",
        description = "Diver registration, buddy lists and the certification agency catalogue."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::divers::create_diver,
        crate::inbound::http::buddies::create_buddy,
        crate::inbound::http::buddies::list_buddies,
        crate::inbound::http::agencies::create_agency,
        crate::inbound::http::agencies::list_agencies,
        crate::inbound::http::agencies::get_agency,
    ),
    components(schemas(ErrorSchema, ErrorCodeSchema)),
    tags(
        (name = "divers", description = "Diver registration"),
        (name = "buddies", description = "Buddy lists"),
        (name = "agencies", description = "Certification agencies")
    )
)]
pub struct ApiDoc;
