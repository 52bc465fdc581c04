//! HTTP inbound adapter exposing the logbook REST endpoints.
//!
//! ```text
//! POST /v1/diver
//! POST /v1/buddy
//! GET  /v1/buddy/user/{id}
//! POST /v1/agency
//! GET  /v1/agency
//! GET  /v1/agency/{id}
//! ```

pub mod agencies;
pub mod buddies;
pub mod divers;
pub mod error;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;

use actix_web::web;

pub use error::{ApiResult, json_config};

/// Register every route and the JSON extractor configuration.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use diver_service::inbound::http::configure;
///
/// let app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config()).service(
        web::scope("/v1")
            .service(divers::create_diver)
            .service(buddies::create_buddy)
            .service(buddies::list_buddies)
            .service(agencies::create_agency)
            .service(agencies::list_agencies)
            .service(agencies::get_agency),
    );
}
