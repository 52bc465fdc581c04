//! User-directory outbound adapter.
//!
//! A thin reqwest implementation of the `DirectoryClient` port.

mod dto;
mod http_client;

pub use http_client::{DEFAULT_DIRECTORY_TIMEOUT, DirectoryHttpClient};
