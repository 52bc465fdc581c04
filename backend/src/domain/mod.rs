//! Domain model, workflows and ports.
//!
//! Nothing here knows about HTTP, SQL or the directory's wire format.
//! Inbound adapters call the driving ports; outbound adapters implement the
//! driven ports.

pub mod ports;

mod agency;
mod agency_service;
mod buddy;
mod buddy_service;
mod conflict;
mod diver;
mod diver_registration_service;
pub mod error;
mod identity;
mod identity_resolution;
mod trace_id;
mod validation;

pub use self::agency::{Agency, AgencyRequest, NewAgency};
pub use self::agency_service::AgencyService;
pub use self::buddy::{Affiliation, Buddy, BuddyRequest, NewBuddy, ValidBuddy};
pub use self::buddy_service::BuddyService;
pub use self::conflict::{DomainConflict, translate_conflict};
pub use self::diver::{
    Diver, DiverProfile, DiverRegistrationRequest, MAX_DIVE_NUMBER_OFFSET, NewDiver,
    ValidDiverRegistration,
};
pub use self::diver_registration_service::DiverRegistrationService;
pub use self::error::{Error, ErrorCode};
pub use self::identity::{
    DirectoryIdentity, DirectoryLookup, EmailAddress, IdentityError, IdentityKey,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::validation::FieldErrors;
