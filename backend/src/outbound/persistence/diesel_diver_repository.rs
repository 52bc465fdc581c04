//! PostgreSQL-backed `DiverRepository`.
//!
//! Inserts rely on the `divers_pkey` constraint for uniqueness; there is no
//! read-before-write, so concurrent registrations for the same key resolve to
//! one row and one `UniqueViolation`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{DiverRepository, RecordStoreError};
use crate::domain::{Diver, IdentityKey, NewDiver};

use super::diesel_helpers::{
    cast_version, map_diesel_error, map_pool_error, offset_for_db, offset_from_db,
};
use super::models::{DiverRow, NewDiverRow};
use super::pool::DbPool;
use super::schema::divers;

/// Diesel-backed implementation of the `DiverRepository` port.
#[derive(Clone)]
pub struct DieselDiverRepository {
    pool: DbPool,
}

impl DieselDiverRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_diver(row: DiverRow) -> Result<Diver, RecordStoreError> {
    let user_id = IdentityKey::new(row.user_id)
        .map_err(|error| RecordStoreError::query(format!("stored user_id is invalid: {error}")))?;
    Ok(Diver {
        user_id,
        version: cast_version(row.version),
        created_at: row.created_at,
        updated_at: row.updated_at,
        diving_since: row.diving_since,
        dive_number_offset: offset_from_db(row.dive_number_offset)?,
        default_diving_country: row.default_diving_country,
        default_diving_timezone: row.default_diving_timezone,
    })
}

#[async_trait]
impl DiverRepository for DieselDiverRepository {
    async fn insert(&self, diver: &NewDiver) -> Result<Diver, RecordStoreError> {
        let new_row = NewDiverRow {
            user_id: diver.user_id.as_str(),
            diving_since: diver.diving_since,
            dive_number_offset: offset_for_db(diver.dive_number_offset)?,
            default_diving_country: diver.default_diving_country.as_deref(),
            default_diving_timezone: diver.default_diving_timezone.as_deref(),
        };

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: DiverRow = diesel::insert_into(divers::table)
            .values(&new_row)
            .returning(DiverRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_diver(row)
    }

    async fn find_by_user_id(
        &self,
        user_id: &IdentityKey,
    ) -> Result<Option<Diver>, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<DiverRow> = divers::table
            .filter(divers::user_id.eq(user_id.as_str()))
            .select(DiverRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_diver).transpose()
    }
}
