//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and depend only on the driving
//! ports, so they stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AgencyCommand, AgencyQuery, BuddyCommand, BuddyQuery, DiverRegistration,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Diver registration.
    pub divers: Arc<dyn DiverRegistration>,
    /// Buddy creation.
    pub buddies: Arc<dyn BuddyCommand>,
    /// Buddy listing.
    pub buddies_query: Arc<dyn BuddyQuery>,
    /// Agency creation.
    pub agencies: Arc<dyn AgencyCommand>,
    /// Agency reads.
    pub agencies_query: Arc<dyn AgencyQuery>,
}

impl HttpState {
    /// Construct state from the driving ports.
    ///
    /// A service implementing both halves of a command/query pair is passed
    /// twice.
    pub fn new(
        divers: Arc<dyn DiverRegistration>,
        (buddies, buddies_query): (Arc<dyn BuddyCommand>, Arc<dyn BuddyQuery>),
        (agencies, agencies_query): (Arc<dyn AgencyCommand>, Arc<dyn AgencyQuery>),
    ) -> Self {
        Self {
            divers,
            buddies,
            buddies_query,
            agencies,
            agencies_query,
        }
    }
}
