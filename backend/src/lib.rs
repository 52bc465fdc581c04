//! Diver logbook service: divers, buddies and certification agencies.
//!
//! The crate follows a hexagonal layout. [`domain`] holds the records,
//! workflows and ports; [`inbound`] exposes them over HTTP; [`outbound`]
//! implements the ports against PostgreSQL and the user directory.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
pub use settings::{ServiceSettings, SettingsError};
