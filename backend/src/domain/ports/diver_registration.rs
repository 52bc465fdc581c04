//! Driving port for registering divers.

use async_trait::async_trait;

use crate::domain::{DiverProfile, DiverRegistrationRequest, Error};

/// Register a diver for an identity the user directory confirms.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DiverRegistration: Send + Sync {
    /// Validate, resolve the email, and persist the diver.
    async fn register(&self, request: DiverRegistrationRequest) -> Result<DiverProfile, Error>;
}
