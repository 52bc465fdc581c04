//! Diver registration workflow.
//!
//! validate → resolve email → branch on the directory's answer → bind the
//! resolved key → insert → translate conflicts. The row is written only after
//! the directory confirmed the identity, and the directory is asked exactly
//! once per request.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use tracing::{info, warn};

use super::identity_resolution::{Resolution, map_record_store_error, resolve_email};
use super::ports::{DirectoryClient, DiverRegistration, DiverRepository};
use super::{DiverProfile, DiverRegistrationRequest, EmailAddress, Error};

const NO_ACCOUNT_ACTION: &str =
    "Check a user account exists, has been activated and is not suspended or deleted";

/// Diver registration service implementing [`DiverRegistration`].
#[derive(Clone)]
pub struct DiverRegistrationService<C, R> {
    directory: Arc<C>,
    divers: Arc<R>,
}

impl<C, R> DiverRegistrationService<C, R> {
    /// Create a service over a directory client and a diver repository.
    pub fn new(directory: Arc<C>, divers: Arc<R>) -> Self {
        Self { directory, divers }
    }
}

fn no_account_error(email: &EmailAddress, status: u16) -> Error {
    let message =
        format!("Could not add diver as no active user account could be found for {email}");
    Error::upstream_rejected(status, message.clone()).with_details(json!({
        "error": message,
        "action": NO_ACCOUNT_ACTION,
    }))
}

#[async_trait]
impl<C, R> DiverRegistration for DiverRegistrationService<C, R>
where
    C: DirectoryClient,
    R: DiverRepository,
{
    async fn register(&self, request: DiverRegistrationRequest) -> Result<DiverProfile, Error> {
        let registration = request.validate(Utc::now().date_naive())?;

        let identity = match resolve_email(self.directory.as_ref(), &registration.email).await? {
            Resolution::Resolved(identity) => identity,
            Resolution::NotFound(rejection) => {
                warn!(email = %registration.email, "no active directory account for diver");
                return Err(no_account_error(&registration.email, rejection.status));
            }
        };

        let row = registration.bind(identity.key.clone());
        let diver = self
            .divers
            .insert(&row)
            .await
            .map_err(map_record_store_error)?;

        info!(user_id = %diver.user_id, version = diver.version, "diver registered");
        Ok(DiverProfile {
            diver,
            email: registration.email,
            identity,
        })
    }
}

#[cfg(test)]
#[path = "diver_registration_service_tests.rs"]
mod tests;
