//! Buddy contacts owned by a diver.

use chrono::{DateTime, Utc};

use super::validation::{FieldErrors, MUST_BE_PROVIDED, check_char_len, non_blank, non_blank_token};
use super::{DirectoryIdentity, EmailAddress, Error, IdentityKey};

const NAME_MAX_BYTES: usize = 500;
const PHONE_MIN_BYTES: usize = 7;
const PHONE_MAX_BYTES: usize = 24;
const NOTES_MAX_CHARS: usize = 65_535;

/// Unvalidated buddy submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuddyRequest {
    /// Owning diver key.
    pub user_id: Option<String>,
    /// Display name.
    pub name: Option<String>,
    /// Contact address, checked against the directory.
    pub email: Option<String>,
    /// Contact number.
    pub phone_number: Option<String>,
    /// Organisation name.
    pub organisation: Option<String>,
    /// Membership number; requires `organisation`.
    pub org_member_id: Option<String>,
    /// Free text.
    pub notes: Option<String>,
}

/// Organisation a buddy belongs to, with an optional membership number.
///
/// A membership number cannot exist without its organisation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Affiliation {
    /// Organisation name.
    pub organisation: String,
    /// Membership number within the organisation.
    pub member_id: Option<String>,
}

/// Buddy submission that passed field validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidBuddy {
    /// Diver who owns this buddy.
    pub owner: IdentityKey,
    /// Display name.
    pub name: String,
    /// Contact address, checked against the directory.
    pub email: Option<EmailAddress>,
    /// Contact number.
    pub phone_number: Option<String>,
    /// Organisation membership.
    pub affiliation: Option<Affiliation>,
    /// Free text.
    pub notes: Option<String>,
}

impl BuddyRequest {
    /// Validate every field, collecting all failures.
    ///
    /// # Errors
    ///
    /// Returns a validation failure keyed by field name.
    pub fn validate(self) -> Result<ValidBuddy, Error> {
        let mut errors = FieldErrors::new();

        let owner = match non_blank_token(self.user_id) {
            Some(raw) => IdentityKey::new(raw)
                .map_err(|error| errors.add("user_id", error.to_string()))
                .ok(),
            None => {
                errors.add("user_id", MUST_BE_PROVIDED);
                None
            }
        };

        let name = non_blank(self.name);
        match name.as_deref() {
            Some(text) => errors.check(
                text.len() <= NAME_MAX_BYTES,
                "name",
                format!("must not be more than {NAME_MAX_BYTES} bytes long"),
            ),
            None => errors.add("name", MUST_BE_PROVIDED),
        }

        let email = non_blank_token(self.email).and_then(|raw| {
            EmailAddress::parse(&raw)
                .map_err(|error| errors.add("email", error.to_string()))
                .ok()
        });

        let phone_number = non_blank(self.phone_number);
        if let Some(phone) = phone_number.as_deref() {
            errors.check(
                (PHONE_MIN_BYTES..=PHONE_MAX_BYTES).contains(&phone.len()),
                "phone_number",
                format!("must be between {PHONE_MIN_BYTES} and {PHONE_MAX_BYTES} bytes long"),
            );
        }

        let organisation = non_blank(self.organisation);
        let member_id = non_blank(self.org_member_id);
        check_char_len(&mut errors, "organisation", organisation.as_deref(), 2, 64);
        errors.check(
            member_id.is_none() || organisation.is_some(),
            "org_member_id",
            "cannot be supplied without an organisation",
        );
        check_char_len(&mut errors, "org_member_id", member_id.as_deref(), 2, 32);

        let notes = non_blank(self.notes);
        if let Some(text) = notes.as_deref() {
            errors.check(
                text.chars().count() <= NOTES_MAX_CHARS,
                "notes",
                format!("must not be more than {NOTES_MAX_CHARS} characters long"),
            );
        }

        errors.into_result()?;
        let (Some(owner), Some(name)) = (owner, name) else {
            return Err(Error::internal("buddy validation accepted inconsistent input"));
        };

        Ok(ValidBuddy {
            owner,
            name,
            email,
            phone_number,
            affiliation: organisation.map(|organisation| Affiliation {
                organisation,
                member_id,
            }),
            notes,
        })
    }
}

impl ValidBuddy {
    /// Row to insert when the buddy is not linked to a diver.
    #[must_use]
    pub fn unlinked(self) -> NewBuddy {
        NewBuddy {
            owner: self.owner,
            linked_user_id: None,
            name: self.name,
            email: self.email,
            phone_number: self.phone_number,
            affiliation: self.affiliation,
            notes: self.notes,
        }
    }

    /// Row to insert for a buddy who is a registered diver.
    ///
    /// The directory's name replaces whatever the owner typed.
    #[must_use]
    pub fn linked_to(self, identity: &DirectoryIdentity) -> NewBuddy {
        NewBuddy {
            linked_user_id: Some(identity.key.clone()),
            name: identity.name.clone(),
            ..self.unlinked()
        }
    }
}

/// Buddy row ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBuddy {
    /// Diver who owns this buddy.
    pub owner: IdentityKey,
    /// Registered diver this buddy refers to, if any.
    pub linked_user_id: Option<IdentityKey>,
    /// Display name.
    pub name: String,
    /// Contact address, checked against the directory.
    pub email: Option<EmailAddress>,
    /// Contact number.
    pub phone_number: Option<String>,
    /// Organisation membership.
    pub affiliation: Option<Affiliation>,
    /// Free text.
    pub notes: Option<String>,
}

/// Persisted buddy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buddy {
    /// Surrogate key.
    pub id: i64,
    /// Row version, starting at 1.
    pub version: u32,
    /// Insertion time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
    /// Diver who owns this buddy.
    pub owner: IdentityKey,
    /// Registered diver this buddy refers to, if any.
    pub linked_user_id: Option<IdentityKey>,
    /// Display name.
    pub name: String,
    /// Contact address, checked against the directory.
    pub email: Option<String>,
    /// Contact number.
    pub phone_number: Option<String>,
    /// Organisation membership.
    pub affiliation: Option<Affiliation>,
    /// Free text.
    pub notes: Option<String>,
}
