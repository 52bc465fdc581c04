//! Driving ports for a diver's buddy list.

use async_trait::async_trait;

use crate::domain::{Buddy, BuddyRequest, Error, IdentityKey};

/// Add buddies.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BuddyCommand: Send + Sync {
    /// Validate, optionally link to a registered diver, and persist.
    async fn add_buddy(&self, request: BuddyRequest) -> Result<Buddy, Error>;
}

/// Read buddies.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BuddyQuery: Send + Sync {
    /// All buddies owned by `owner`.
    async fn list_buddies(&self, owner: &IdentityKey) -> Result<Vec<Buddy>, Error>;
}
