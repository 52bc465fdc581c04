//! Domain ports for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod agency_catalogue;
mod buddy_book;
mod directory_client;
mod diver_registration;
mod record_store;

#[cfg(test)]
pub use agency_catalogue::{MockAgencyCommand, MockAgencyQuery};
pub use agency_catalogue::{AgencyCommand, AgencyQuery};
#[cfg(test)]
pub use buddy_book::{MockBuddyCommand, MockBuddyQuery};
pub use buddy_book::{BuddyCommand, BuddyQuery};
#[cfg(test)]
pub use directory_client::MockDirectoryClient;
pub use directory_client::{
    DIRECTORY_NOT_FOUND, DirectoryClient, DirectoryClientError, DirectoryRejection,
    DirectoryResult,
};
#[cfg(test)]
pub use diver_registration::MockDiverRegistration;
pub use diver_registration::DiverRegistration;
#[cfg(test)]
pub use record_store::{MockAgencyRepository, MockBuddyRepository, MockDiverRepository};
pub use record_store::{AgencyRepository, BuddyRepository, DiverRepository, RecordStoreError};
