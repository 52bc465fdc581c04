//! Buddy workflow.
//!
//! A buddy with an email address is checked against the user directory. When
//! the address belongs to another registered diver the buddy is linked to
//! that diver and takes the directory's name. A missing directory account is
//! not an error here; the buddy is simply stored unlinked.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use super::identity_resolution::{Resolution, map_record_store_error, resolve_email};
use super::ports::{BuddyCommand, BuddyQuery, BuddyRepository, DirectoryClient, DiverRepository};
use super::validation::FieldErrors;
use super::{Buddy, BuddyRequest, Error, IdentityKey, NewBuddy, ValidBuddy};

/// Buddy service implementing [`BuddyCommand`] and [`BuddyQuery`].
#[derive(Clone)]
pub struct BuddyService<C, D, B> {
    directory: Arc<C>,
    divers: Arc<D>,
    buddies: Arc<B>,
}

impl<C, D, B> BuddyService<C, D, B> {
    /// Create a service over the directory client and both repositories.
    pub fn new(directory: Arc<C>, divers: Arc<D>, buddies: Arc<B>) -> Self {
        Self {
            directory,
            divers,
            buddies,
        }
    }
}

impl<C, D, B> BuddyService<C, D, B>
where
    C: DirectoryClient,
    D: DiverRepository,
    B: BuddyRepository,
{
    async fn resolve_row(&self, buddy: ValidBuddy) -> Result<NewBuddy, Error> {
        let Some(email) = buddy.email.clone() else {
            return Ok(buddy.unlinked());
        };

        match resolve_email(self.directory.as_ref(), &email).await? {
            Resolution::NotFound(_) => {
                debug!(owner = %buddy.owner, "buddy email has no directory account");
                Ok(buddy.unlinked())
            }
            Resolution::Resolved(identity) if identity.key == buddy.owner => Err(
                FieldErrors::single("email", "must not be your own account"),
            ),
            Resolution::Resolved(identity) => {
                let registered = self
                    .divers
                    .find_by_user_id(&identity.key)
                    .await
                    .map_err(map_record_store_error)?;
                Ok(match registered {
                    Some(_) => buddy.linked_to(&identity),
                    None => buddy.unlinked(),
                })
            }
        }
    }
}

#[async_trait]
impl<C, D, B> BuddyCommand for BuddyService<C, D, B>
where
    C: DirectoryClient,
    D: DiverRepository,
    B: BuddyRepository,
{
    async fn add_buddy(&self, request: BuddyRequest) -> Result<Buddy, Error> {
        let buddy = request.validate()?;
        let row = self.resolve_row(buddy).await?;
        let stored = self
            .buddies
            .insert(&row)
            .await
            .map_err(map_record_store_error)?;

        info!(
            owner = %stored.owner,
            buddy_id = stored.id,
            linked = stored.linked_user_id.is_some(),
            "buddy added"
        );
        Ok(stored)
    }
}

#[async_trait]
impl<C, D, B> BuddyQuery for BuddyService<C, D, B>
where
    C: DirectoryClient,
    D: DiverRepository,
    B: BuddyRepository,
{
    async fn list_buddies(&self, owner: &IdentityKey) -> Result<Vec<Buddy>, Error> {
        self.buddies
            .list_for_owner(owner)
            .await
            .map_err(map_record_store_error)
    }
}

#[cfg(test)]
#[path = "buddy_service_tests.rs"]
mod tests;
