//! Test helpers for inbound HTTP handlers.

use std::sync::Arc;

use actix_web::App;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::web;

use crate::domain::ports::{
    MockAgencyCommand, MockAgencyQuery, MockBuddyCommand, MockBuddyQuery, MockDiverRegistration,
};
use crate::inbound::http::state::HttpState;

/// Driving-port mocks; unset ports panic if a handler reaches them.
#[derive(Default)]
pub struct TestPorts {
    /// Diver registration mock.
    pub divers: MockDiverRegistration,
    /// Buddy command mock.
    pub buddies: MockBuddyCommand,
    /// Buddy query mock.
    pub buddies_query: MockBuddyQuery,
    /// Agency command mock.
    pub agencies: MockAgencyCommand,
    /// Agency query mock.
    pub agencies_query: MockAgencyQuery,
}

impl TestPorts {
    /// Wrap the mocks into handler state.
    pub fn into_state(self) -> HttpState {
        HttpState::new(
            Arc::new(self.divers),
            (Arc::new(self.buddies), Arc::new(self.buddies_query)),
            (Arc::new(self.agencies), Arc::new(self.agencies_query)),
        )
    }
}

/// App with every route registered over the given mocks.
pub fn test_app(
    ports: TestPorts,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(ports.into_state()))
        .configure(super::configure)
}
