//! Shared helpers for Diesel repository implementations.
//!
//! - Error mapping from Diesel and pool errors to [`RecordStoreError`]
//! - The constraint catalogues behind structured conflict reports
//! - Casts between database and domain integer widths

use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};
use tracing::{debug, warn};

use crate::domain::ports::RecordStoreError;

use super::pool::PoolError;

/// Unique constraints and the columns they cover.
///
/// `buddies_user_id_email_key` is an expression index over `lower(email)`;
/// it is reported against the plain `email` column.
const UNIQUE_CONSTRAINTS: &[(&str, &str, &[&str])] = &[
    ("divers_pkey", "divers", &["user_id"]),
    ("agencies_common_name_key", "agencies", &["common_name"]),
    ("agencies_full_name_key", "agencies", &["full_name"]),
    ("buddies_user_id_email_key", "buddies", &["user_id", "email"]),
    (
        "buddies_user_id_buddy_user_id_key",
        "buddies",
        &["user_id", "buddy_user_id"],
    ),
];

/// Foreign keys and the referencing columns they cover.
const FOREIGN_KEY_CONSTRAINTS: &[(&str, &str, &[&str])] = &[
    ("buddies_user_id_fkey", "buddies", &["user_id"]),
    ("buddies_buddy_user_id_fkey", "buddies", &["buddy_user_id"]),
];

/// Map pool errors to record store connection errors.
pub(super) fn map_pool_error(error: PoolError) -> RecordStoreError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            RecordStoreError::connection(message)
        }
    }
}

/// Map Diesel errors to record store errors.
pub(super) fn map_diesel_error(error: DieselError) -> RecordStoreError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = info.constraint_name(),
                "diesel operation failed"
            );
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => RecordStoreError::query("record not found"),
        DieselError::QueryBuilderError(_) => RecordStoreError::query("database query error"),
        DieselError::DatabaseError(kind, info) => map_database_error(kind, info.as_ref()),
        _ => RecordStoreError::query("database error"),
    }
}

fn map_database_error(
    kind: DatabaseErrorKind,
    info: &(dyn DatabaseErrorInformation + Send + Sync),
) -> RecordStoreError {
    match kind {
        DatabaseErrorKind::UniqueViolation => unique_violation(info),
        DatabaseErrorKind::ForeignKeyViolation => foreign_key_violation(info),
        DatabaseErrorKind::ClosedConnection => {
            RecordStoreError::connection("database connection error")
        }
        _ => RecordStoreError::query("database error"),
    }
}

fn unique_violation(info: &(dyn DatabaseErrorInformation + Send + Sync)) -> RecordStoreError {
    let constraint = info.constraint_name().unwrap_or_default();
    let catalogued = UNIQUE_CONSTRAINTS
        .iter()
        .find(|(name, _, _)| *name == constraint);

    match catalogued {
        Some((name, table, columns)) => RecordStoreError::unique_violation(
            *table,
            *name,
            columns.iter().map(|column| (*column).to_owned()).collect::<Vec<_>>(),
        ),
        None => {
            warn!(
                constraint,
                table = info.table_name(),
                "unique violation on an uncatalogued constraint"
            );
            RecordStoreError::unique_violation(
                info.table_name().unwrap_or_default(),
                constraint,
                info.column_name()
                    .map(|column| vec![column.to_owned()])
                    .unwrap_or_default(),
            )
        }
    }
}

fn foreign_key_violation(info: &(dyn DatabaseErrorInformation + Send + Sync)) -> RecordStoreError {
    let constraint = info.constraint_name().unwrap_or_default();
    let catalogued = FOREIGN_KEY_CONSTRAINTS
        .iter()
        .find(|(name, _, _)| *name == constraint);

    match catalogued {
        Some((name, table, columns)) => RecordStoreError::foreign_key_violation(
            *table,
            *name,
            columns.iter().map(|column| (*column).to_owned()).collect::<Vec<_>>(),
        ),
        None => {
            warn!(
                constraint,
                table = info.table_name(),
                "foreign key violation on an uncatalogued constraint"
            );
            RecordStoreError::foreign_key_violation(
                info.table_name().unwrap_or_default(),
                constraint,
                info.column_name()
                    .map(|column| vec![column.to_owned()])
                    .unwrap_or_default(),
            )
        }
    }
}

/// Cast a database version (i32) to a domain version (u32).
#[expect(
    clippy::cast_sign_loss,
    reason = "versions start at 1 and only increase"
)]
pub(super) fn cast_version(version: i32) -> u32 {
    version as u32
}

/// Convert a stored offset; the column check keeps it non-negative.
pub(super) fn offset_from_db(offset: i16) -> Result<u16, RecordStoreError> {
    u16::try_from(offset).map_err(|_| {
        RecordStoreError::query(format!("stored dive_number_offset {offset} is negative"))
    })
}

/// Convert a domain offset for storage.
pub(super) fn offset_for_db(offset: u16) -> Result<i16, RecordStoreError> {
    i16::try_from(offset).map_err(|_| {
        RecordStoreError::query(format!("dive_number_offset {offset} exceeds the column range"))
    })
}
