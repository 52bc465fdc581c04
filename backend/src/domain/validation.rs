//! Field-keyed validation accumulator.
//!
//! Workflows collect every failing field before rejecting a request so
//! clients can fix all problems in one round trip. The first message recorded
//! for a field wins; later checks on the same field are ignored.

use std::collections::BTreeMap;

use serde_json::json;

use super::{Error, ErrorCode};

pub(crate) const MUST_BE_PROVIDED: &str = "must be provided";

/// Ordered map of field name to the first validation message for it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<String, String>,
}

impl FieldErrors {
    /// Create an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a failure for a single field.
    ///
    /// # Examples
    /// ```
    /// use diver_service::domain::FieldErrors;
    ///
    /// let err = FieldErrors::single("email", "must be provided");
    /// assert_eq!(err.field_message("email"), Some("must be provided"));
    /// ```
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Error {
        let mut errors = Self::new();
        errors.add(field, message);
        errors.into_error()
    }

    /// Record `message` for `field` unless the field already failed.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_insert_with(|| message.into());
    }

    /// Record `message` for `field` when `ok` is false.
    pub fn check(&mut self, ok: bool, field: &str, message: impl Into<String>) {
        if !ok {
            self.add(field, message);
        }
    }

    /// Whether no field has failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// First message recorded for `field`.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// `Ok(())` when empty, otherwise the accumulated failure.
    ///
    /// # Errors
    ///
    /// Returns a [`ErrorCode::ValidationFailed`] error carrying the field map.
    pub fn into_result(self) -> Result<(), Error> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self.into_error())
        }
    }

    fn into_error(self) -> Error {
        Error::new(ErrorCode::ValidationFailed, "one or more fields failed validation")
            .with_details(json!({ "fields": self.errors }))
    }
}

/// Check a character-length window on an optional text field.
pub(crate) fn check_char_len(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<&str>,
    min: usize,
    max: usize,
) {
    if let Some(text) = value {
        let len = text.chars().count();
        errors.check(
            (min..=max).contains(&len),
            field,
            format!("must be between {min} and {max} characters long"),
        );
    }
}

/// Treat blank strings as absent; anything else is kept as submitted.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

/// Like [`non_blank`] but trims the result, for keys, addresses and codes.
pub(crate) fn non_blank_token(value: Option<String>) -> Option<String> {
    non_blank(value).map(|text| text.trim().to_owned())
}
