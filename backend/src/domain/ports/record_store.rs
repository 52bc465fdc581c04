//! Driven ports for persisting divers, buddies and agencies.
//!
//! Adapters report uniqueness and reference conflicts structurally: the
//! violated table and the column set behind the constraint. Callers never
//! parse driver text or constraint names.

use async_trait::async_trait;

use crate::domain::{Agency, Buddy, Diver, IdentityKey, NewAgency, NewBuddy, NewDiver};

use super::define_port_error;

define_port_error! {
    /// Errors raised by record store adapters.
    pub enum RecordStoreError {
        /// A connection could not be obtained.
        Connection {
            /// Driver or pool diagnostic.
            message: String,
        } => "record store connection failed: {message}",
        /// A query or mutation failed.
        Query {
            /// Driver diagnostic.
            message: String,
        } => "record store query failed: {message}",
        /// A uniqueness constraint rejected the write.
        UniqueViolation {
            /// Table holding the constraint.
            table: String,
            /// Constraint name, for logs only.
            constraint: String,
            /// Columns the constraint covers; empty when uncatalogued.
            columns: Vec<String>,
        } => "unique constraint {constraint} on {table} violated",
        /// A referenced row does not exist.
        ForeignKeyViolation {
            /// Table holding the referencing columns.
            table: String,
            /// Constraint name, for logs only.
            constraint: String,
            /// Referencing columns; empty when uncatalogued.
            columns: Vec<String>,
        } => "foreign key {constraint} on {table} violated",
    }
}

/// Diver persistence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DiverRepository: Send + Sync {
    /// Insert a diver and return the stored row with its version.
    async fn insert(&self, diver: &NewDiver) -> Result<Diver, RecordStoreError>;

    /// Fetch a diver by directory identity key.
    async fn find_by_user_id(&self, user_id: &IdentityKey)
    -> Result<Option<Diver>, RecordStoreError>;
}

/// Buddy persistence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BuddyRepository: Send + Sync {
    /// Insert a buddy and return the stored row.
    async fn insert(&self, buddy: &NewBuddy) -> Result<Buddy, RecordStoreError>;

    /// All buddies owned by `owner`.
    async fn list_for_owner(&self, owner: &IdentityKey) -> Result<Vec<Buddy>, RecordStoreError>;
}

/// Agency persistence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AgencyRepository: Send + Sync {
    /// Insert an agency and return the stored row.
    async fn insert(&self, agency: &NewAgency) -> Result<Agency, RecordStoreError>;

    /// Every agency in the catalogue.
    async fn list(&self) -> Result<Vec<Agency>, RecordStoreError>;

    /// Fetch one agency by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<Agency>, RecordStoreError>;
}
