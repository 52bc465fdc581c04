//! Builds the HTTP state from the configured adapters.

use std::sync::Arc;

use diver_service::domain::ports::{
    AgencyCommand, AgencyQuery, BuddyCommand, BuddyQuery, DiverRegistration,
};
use diver_service::domain::{AgencyService, BuddyService, DiverRegistrationService};
use diver_service::inbound::http::state::HttpState;
use diver_service::outbound::persistence::{
    DieselAgencyRepository, DieselBuddyRepository, DieselDiverRepository,
};

use super::ServerConfig;

/// Share one service between its command and query ports.
fn split_pair<S, Cmd, Query, Cast>(service: S, cast: Cast) -> (Arc<Cmd>, Arc<Query>)
where
    S: 'static,
    Cmd: ?Sized + 'static,
    Query: ?Sized + 'static,
    Cast: FnOnce(Arc<S>) -> (Arc<Cmd>, Arc<Query>),
{
    cast(Arc::new(service))
}

pub(super) fn build_http_state(config: &ServerConfig) -> HttpState {
    let pool = &config.db_pool;
    let divers = Arc::new(DieselDiverRepository::new(pool.clone()));

    let registration: Arc<dyn DiverRegistration> = Arc::new(DiverRegistrationService::new(
        config.directory.clone(),
        divers.clone(),
    ));

    let buddies = split_pair(
        BuddyService::new(
            config.directory.clone(),
            divers,
            Arc::new(DieselBuddyRepository::new(pool.clone())),
        ),
        |service| {
            (
                service.clone() as Arc<dyn BuddyCommand>,
                service as Arc<dyn BuddyQuery>,
            )
        },
    );

    let agencies = split_pair(
        AgencyService::new(Arc::new(DieselAgencyRepository::new(pool.clone()))),
        |service| {
            (
                service.clone() as Arc<dyn AgencyCommand>,
                service as Arc<dyn AgencyQuery>,
            )
        },
    );

    HttpState::new(registration, buddies, agencies)
}
