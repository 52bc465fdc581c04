//! Identity primitives shared with the user directory.
//!
//! The directory is the only issuer of [`IdentityKey`] values. Local records
//! store the key verbatim and never mint their own.

use std::fmt;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Validation errors for identity primitives.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    /// The key was empty.
    #[error("identity key must not be empty")]
    EmptyKey,
    /// The key exceeded the length limit.
    #[error("identity key must be at most {max} characters")]
    KeyTooLong {
        /// Maximum accepted length.
        max: usize,
    },
    /// The key held a character outside `[A-Za-z0-9_-]`.
    #[error("identity key may only contain letters, digits, '-' and '_'")]
    KeyCharacters,
    /// The email address was blank.
    #[error("must be provided")]
    EmptyEmail,
    /// The email address was malformed.
    #[error("must be a valid email address")]
    InvalidEmail,
}

const IDENTITY_KEY_MAX: usize = 64;
const EMAIL_MAX_BYTES: usize = 254;

fn key_regex() -> &'static Regex {
    static KEY_RE: OnceLock<Regex> = OnceLock::new();
    KEY_RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9_-]+$").unwrap_or_else(|error| {
            panic!("identity key regex failed to compile: {error}")
        })
    })
}

fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| {
        Regex::new(
            r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
        )
        .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Opaque identifier issued by the user directory.
///
/// # Examples
/// ```
/// use diver_service::domain::IdentityKey;
///
/// let key = IdentityKey::new("u-123").unwrap();
/// assert_eq!(key.as_str(), "u-123");
/// assert!(IdentityKey::new("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IdentityKey(String);

impl IdentityKey {
    /// Validate and wrap a directory-issued key.
    ///
    /// # Errors
    ///
    /// Rejects empty, over-long, or non `[A-Za-z0-9_-]` input.
    pub fn new(value: impl Into<String>) -> Result<Self, IdentityError> {
        let value = value.into();
        if value.is_empty() {
            return Err(IdentityError::EmptyKey);
        }
        if value.chars().count() > IDENTITY_KEY_MAX {
            return Err(IdentityError::KeyTooLong {
                max: IDENTITY_KEY_MAX,
            });
        }
        if !key_regex().is_match(&value) {
            return Err(IdentityError::KeyCharacters);
        }
        Ok(Self(value))
    }

    /// Borrow the raw key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for IdentityKey {
    type Error = IdentityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<IdentityKey> for String {
    fn from(value: IdentityKey) -> Self {
        value.0
    }
}

/// Syntactically valid email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Parse an email address, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::EmptyEmail`] for blank input and
    /// [`IdentityError::InvalidEmail`] when the address is malformed.
    pub fn parse(value: &str) -> Result<Self, IdentityError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(IdentityError::EmptyEmail);
        }
        if trimmed.len() > EMAIL_MAX_BYTES || !email_regex().is_match(trimmed) {
            return Err(IdentityError::InvalidEmail);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the address.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

/// How to address a user in the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryLookup {
    /// Look a user up by email address.
    Email(EmailAddress),
    /// Look a user up by identity key.
    Key(IdentityKey),
}

impl fmt::Display for DirectoryLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Email(email) => write!(f, "email {email}"),
            Self::Key(key) => write!(f, "key {key}"),
        }
    }
}

/// Authoritative identity returned by the user directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryIdentity {
    /// Directory-issued key.
    pub key: IdentityKey,
    /// Full name.
    pub name: String,
    /// Preferred short name.
    pub friendly_name: Option<String>,
    /// Date of birth.
    pub birth_date: Option<NaiveDate>,
    /// Gender as reported.
    pub gender: Option<String>,
    /// ISO 3166-1 alpha-2 code.
    pub country_code: Option<String>,
    /// IANA time zone name.
    pub time_zone: Option<String>,
}
