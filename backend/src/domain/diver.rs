//! Diver profiles.
//!
//! A diver row exists only for an identity the user directory confirmed at
//! creation time; the key is always the directory's, never the caller's.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use super::validation::{FieldErrors, MUST_BE_PROVIDED, non_blank_token};
use super::{DirectoryIdentity, EmailAddress, Error, IdentityKey};

/// Largest dive number offset a diver may carry.
pub const MAX_DIVE_NUMBER_OFFSET: i64 = 32_767;

/// Unvalidated diver registration as submitted by a client.
///
/// `user_id` is accepted for wire compatibility but never trusted; the key
/// resolved from the directory replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiverRegistrationRequest {
    /// Address the directory is asked to resolve.
    pub email: Option<String>,
    /// Ignored; the directory supplies the key.
    pub user_id: Option<String>,
    /// Date of the first dive; must not be in the future.
    pub diving_since: Option<NaiveDate>,
    /// Dives logged before this service, `0..=32767`.
    pub dive_number_offset: Option<i64>,
    /// ISO 3166-1 alpha-2 code.
    pub default_diving_country: Option<String>,
    /// IANA time zone name.
    pub default_diving_timezone: Option<String>,
}

/// Registration that passed field validation and still awaits an identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidDiverRegistration {
    /// Address to resolve.
    pub email: EmailAddress,
    /// Date of the first dive.
    pub diving_since: Option<NaiveDate>,
    /// Dives logged before this service.
    pub dive_number_offset: u16,
    /// Uppercased country code.
    pub default_diving_country: Option<String>,
    /// IANA time zone name.
    pub default_diving_timezone: Option<String>,
}

impl DiverRegistrationRequest {
    /// Validate every field against `today`, collecting all failures.
    ///
    /// # Errors
    ///
    /// Returns a validation failure keyed by field name.
    pub fn validate(self, today: NaiveDate) -> Result<ValidDiverRegistration, Error> {
        let mut errors = FieldErrors::new();

        let email = match non_blank_token(self.email) {
            Some(raw) => EmailAddress::parse(&raw)
                .map_err(|error| errors.add("email", error.to_string()))
                .ok(),
            None => {
                errors.add("email", MUST_BE_PROVIDED);
                None
            }
        };

        if let Some(since) = self.diving_since {
            errors.check(since <= today, "diving_since", "must not be in the future");
        }

        let offset = self.dive_number_offset.unwrap_or(0);
        errors.check(offset >= 0, "dive_number_offset", "must not be negative");
        errors.check(
            offset <= MAX_DIVE_NUMBER_OFFSET,
            "dive_number_offset",
            "must be less than 32768",
        );

        let country = non_blank_token(self.default_diving_country);
        if let Some(code) = country.as_deref() {
            errors.check(
                code.len() == 2,
                "default_diving_country",
                "must be exactly 2 bytes long",
            );
        }

        let timezone = non_blank_token(self.default_diving_timezone);
        if let Some(zone) = timezone.as_deref() {
            errors.check(
                zone.parse::<Tz>().is_ok(),
                "default_diving_timezone",
                "must be a valid IANA time zone",
            );
        }

        errors.into_result()?;
        let (Some(email), Ok(dive_number_offset)) = (email, u16::try_from(offset)) else {
            return Err(Error::internal("diver validation accepted inconsistent input"));
        };

        Ok(ValidDiverRegistration {
            email,
            diving_since: self.diving_since,
            dive_number_offset,
            default_diving_country: country,
            default_diving_timezone: timezone,
        })
    }
}

impl ValidDiverRegistration {
    /// Bind the directory-issued key, producing the row to insert.
    #[must_use]
    pub fn bind(&self, user_id: IdentityKey) -> NewDiver {
        NewDiver {
            user_id,
            diving_since: self.diving_since,
            dive_number_offset: self.dive_number_offset,
            default_diving_country: self.default_diving_country.clone(),
            default_diving_timezone: self.default_diving_timezone.clone(),
        }
    }
}

/// Diver row ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDiver {
    /// Key issued by the directory.
    pub user_id: IdentityKey,
    /// Date of the first dive.
    pub diving_since: Option<NaiveDate>,
    /// Dives logged before this service.
    pub dive_number_offset: u16,
    /// Uppercased country code.
    pub default_diving_country: Option<String>,
    /// IANA time zone name.
    pub default_diving_timezone: Option<String>,
}

/// Persisted diver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diver {
    /// Key issued by the directory; also the primary key.
    pub user_id: IdentityKey,
    /// Row version, starting at 1.
    pub version: u32,
    /// Insertion time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
    /// Date of the first dive.
    pub diving_since: Option<NaiveDate>,
    /// Dives logged before this service.
    pub dive_number_offset: u16,
    /// Uppercased country code.
    pub default_diving_country: Option<String>,
    /// IANA time zone name.
    pub default_diving_timezone: Option<String>,
}

/// A persisted diver merged with the directory identity it was created for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiverProfile {
    /// The stored row.
    pub diver: Diver,
    /// Address the registration was resolved from.
    pub email: EmailAddress,
    /// Directory identity at creation time.
    pub identity: DirectoryIdentity,
}
