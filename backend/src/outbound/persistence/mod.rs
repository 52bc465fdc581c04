//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories implement the record store ports over a shared `bb8` pool of
//! `diesel-async` connections.
//!
//! - **Thin adapters**: repositories only translate between row structs and
//!   domain types. Conflict meaning is decided in the domain.
//! - **Internal models**: `models.rs` and `schema.rs` never leave this module.
//! - **Structured conflicts**: unique violations are reported with the table
//!   and the constraint's column set, never as driver text.
//!
//! ```ignore
//! use diver_service::outbound::persistence::{DbPool, DieselDiverRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/logbook")).await?;
//! let divers = DieselDiverRepository::new(pool);
//! ```

mod diesel_agency_repository;
mod diesel_buddy_repository;
mod diesel_diver_repository;
mod diesel_helpers;
mod models;
mod pool;
mod schema;

pub use diesel_agency_repository::DieselAgencyRepository;
pub use diesel_buddy_repository::DieselBuddyRepository;
pub use diesel_diver_repository::DieselDiverRepository;
pub use pool::{
    DEFAULT_CONNECTION_TIMEOUT, DEFAULT_MAX_CONNECTIONS, DEFAULT_MIN_IDLE, DbPool, PoolConfig,
    PoolError,
};
