//! Driven port for resolving users against the external user directory.
//!
//! The directory answers with a three-state envelope. Adapters decode it into
//! [`DirectoryResult`] so workflows branch on a closed type; transport
//! failures stay separate in [`DirectoryClientError`].

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{DirectoryIdentity, DirectoryLookup};

use super::define_port_error;

/// Status the directory uses when no active account matches.
pub const DIRECTORY_NOT_FOUND: u16 = 404;

/// A `fail` answer: the directory understood the lookup and refused it.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectoryRejection {
    /// HTTP status the directory responded with.
    pub status: u16,
    /// The envelope's `data` payload, relayed verbatim.
    pub data: Value,
}

impl DirectoryRejection {
    /// Whether the directory reported that no active account matched.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status == DIRECTORY_NOT_FOUND
    }
}

/// Decoded directory answer.
#[derive(Debug, Clone, PartialEq)]
pub enum DirectoryResult {
    /// The lookup matched an active account.
    Success(DirectoryIdentity),
    /// The directory rejected the lookup.
    Fail(DirectoryRejection),
    /// The directory failed internally.
    Error {
        /// HTTP status the directory responded with.
        status: u16,
        /// The envelope's `message`.
        message: String,
    },
}

define_port_error! {
    /// Failures reaching or decoding the directory.
    pub enum DirectoryClientError {
        /// The request never produced a usable response.
        Transport {
            /// Transport diagnostic.
            message: String,
        } => "directory transport failed: {message}",
        /// The request exceeded the configured timeout.
        Timeout {
            /// Timeout diagnostic.
            message: String,
        } => "directory lookup timed out: {message}",
        /// The response was not a well-formed envelope.
        Decode {
            /// Decoder diagnostic.
            message: String,
        } => "directory response decode failed: {message}",
        /// The lookup could not be turned into a request.
        InvalidRequest {
            /// Why the request could not be built.
            message: String,
        } => "directory request invalid: {message}",
    }
}

/// Port for resolving an email address or identity key.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DirectoryClient: Send + Sync {
    /// Perform one lookup. Implementations must not retry.
    async fn resolve(
        &self,
        lookup: &DirectoryLookup,
    ) -> Result<DirectoryResult, DirectoryClientError>;
}
