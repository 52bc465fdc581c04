//! Translates storage uniqueness and reference conflicts into domain conflicts.
//!
//! Translation works on the table and column set the adapter reports, never
//! on constraint names. Only violations this service knows how to explain are
//! translated. Anything else yields `None` and callers surface it as a server
//! error.

use super::validation::FieldErrors;
use super::Error;
use super::ports::RecordStoreError;

const DUPLICATE_DIVER: &str = "a diver with this email address already exists";
const DUPLICATE_BUDDY: &str = "a buddy with this email address already exists";
const DUPLICATE_AGENCY: &str = "a record already exists for this value";
const UNREGISTERED_DIVER: &str = "must belong to a registered diver";

/// Conflicts the workflows know how to report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainConflict {
    /// A diver already exists for the resolved identity.
    DuplicateEmail,
    /// The owner already has this buddy, by email or by linked diver.
    DuplicateBuddyLink,
    /// An agency name is taken.
    DuplicateAgencyName {
        /// Columns covered by the violated constraint.
        columns: Vec<String>,
    },
    /// The buddy's owner is not a registered diver.
    UnregisteredOwner,
    /// The diver a buddy links to is no longer registered.
    UnregisteredLinkedDiver,
}

/// Map a record store error onto a known conflict.
///
/// # Examples
/// ```
/// use diver_service::domain::ports::RecordStoreError;
/// use diver_service::domain::{DomainConflict, translate_conflict};
///
/// let err = RecordStoreError::unique_violation("divers", "divers_pkey", vec!["user_id".to_owned()]);
/// assert_eq!(translate_conflict(&err), Some(DomainConflict::DuplicateEmail));
/// ```
#[must_use]
pub fn translate_conflict(error: &RecordStoreError) -> Option<DomainConflict> {
    match error {
        RecordStoreError::UniqueViolation { table, columns, .. } => {
            translate_unique(table, columns)
        }
        RecordStoreError::ForeignKeyViolation { table, columns, .. } => {
            translate_foreign_key(table, columns)
        }
        _ => None,
    }
}

fn translate_unique(table: &str, columns: &[String]) -> Option<DomainConflict> {
    let has = |name: &str| columns.iter().any(|column| column == name);

    match table {
        "divers" if has("user_id") => Some(DomainConflict::DuplicateEmail),
        "buddies" if has("email") || has("buddy_user_id") => {
            Some(DomainConflict::DuplicateBuddyLink)
        }
        "agencies" if !columns.is_empty() => Some(DomainConflict::DuplicateAgencyName {
            columns: columns.to_vec(),
        }),
        _ => None,
    }
}

fn translate_foreign_key(table: &str, columns: &[String]) -> Option<DomainConflict> {
    if table != "buddies" {
        return None;
    }
    match columns {
        [column] if column == "buddy_user_id" => Some(DomainConflict::UnregisteredLinkedDiver),
        [column] if column == "user_id" => Some(DomainConflict::UnregisteredOwner),
        _ => None,
    }
}

impl DomainConflict {
    /// Render the conflict as a field-keyed validation failure.
    #[must_use]
    pub fn into_error(self) -> Error {
        match self {
            Self::DuplicateEmail => FieldErrors::single("email", DUPLICATE_DIVER),
            Self::DuplicateBuddyLink => FieldErrors::single("email", DUPLICATE_BUDDY),
            Self::DuplicateAgencyName { columns } => match columns.as_slice() {
                [column] => FieldErrors::single(column.as_str(), DUPLICATE_AGENCY),
                _ => FieldErrors::single(
                    "form",
                    format!(
                        "a record already exists for this combination of {}",
                        columns.join(", ")
                    ),
                ),
            },
            Self::UnregisteredOwner => FieldErrors::single("user_id", UNREGISTERED_DIVER),
            Self::UnregisteredLinkedDiver => FieldErrors::single("email", UNREGISTERED_DIVER),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn unique(table: &str, columns: &[&str]) -> RecordStoreError {
        RecordStoreError::unique_violation(
            table,
            format!("{table}_key"),
            columns.iter().map(|c| (*c).to_owned()).collect::<Vec<_>>(),
        )
    }

    fn foreign_key(columns: &[&str]) -> RecordStoreError {
        RecordStoreError::foreign_key_violation(
            "buddies",
            "buddies_linked_diver_fk",
            columns.iter().map(|c| (*c).to_owned()).collect::<Vec<_>>(),
        )
    }

    #[rstest]
    #[case::diver(unique("divers", &["user_id"]), Some(DomainConflict::DuplicateEmail))]
    #[case::buddy_email(unique("buddies", &["user_id", "email"]), Some(DomainConflict::DuplicateBuddyLink))]
    #[case::buddy_link(unique("buddies", &["user_id", "buddy_user_id"]), Some(DomainConflict::DuplicateBuddyLink))]
    #[case::agency(
        unique("agencies", &["common_name"]),
        Some(DomainConflict::DuplicateAgencyName { columns: vec!["common_name".to_owned()] })
    )]
    #[case::unknown_table(unique("dives", &["id"]), None)]
    #[case::unknown_constraint(unique("agencies", &[]), None)]
    #[case::not_unique(RecordStoreError::query("syntax error"), None)]
    #[case::buddy_owner(foreign_key(&["user_id"]), Some(DomainConflict::UnregisteredOwner))]
    #[case::buddy_link_target(
        foreign_key(&["buddy_user_id"]),
        Some(DomainConflict::UnregisteredLinkedDiver)
    )]
    #[case::uncatalogued_foreign_key(foreign_key(&[]), None)]
    fn translates_known_conflicts(
        #[case] error: RecordStoreError,
        #[case] expected: Option<DomainConflict>,
    ) {
        assert_eq!(translate_conflict(&error), expected);
    }

    #[rstest]
    fn single_agency_column_is_keyed_by_column() {
        let error = DomainConflict::DuplicateAgencyName {
            columns: vec!["full_name".to_owned()],
        }
        .into_error();
        assert_eq!(error.field_message("full_name"), Some(DUPLICATE_AGENCY));
    }

    #[rstest]
    fn several_agency_columns_are_reported_jointly() {
        let error = DomainConflict::DuplicateAgencyName {
            columns: vec!["common_name".to_owned(), "full_name".to_owned()],
        }
        .into_error();
        assert_eq!(
            error.field_message("form"),
            Some("a record already exists for this combination of common_name, full_name")
        );
    }

    #[rstest]
    fn duplicate_diver_is_an_email_error() {
        let error = DomainConflict::DuplicateEmail.into_error();
        assert_eq!(error.field_message("email"), Some(DUPLICATE_DIVER));
    }

    #[rstest]
    #[case::owner(DomainConflict::UnregisteredOwner, "user_id")]
    #[case::linked_diver(DomainConflict::UnregisteredLinkedDiver, "email")]
    fn unregistered_divers_are_keyed_by_field(
        #[case] conflict: DomainConflict,
        #[case] field: &str,
    ) {
        let error = conflict.into_error();
        assert_eq!(error.field_message(field), Some(UNREGISTERED_DIVER));
    }
}
