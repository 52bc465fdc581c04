//! Outbound adapters implementing the domain's driven ports.
//!
//! - `directory`: reqwest client for the external user directory.
//! - `persistence`: Diesel repositories for divers, buddies and agencies.

pub mod directory;
pub mod persistence;
