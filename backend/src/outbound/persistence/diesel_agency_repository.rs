//! PostgreSQL-backed `AgencyRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AgencyRepository, RecordStoreError};
use crate::domain::{Agency, NewAgency};

use super::diesel_helpers::{map_diesel_error, map_pool_error};
use super::models::{AgencyRow, NewAgencyRow};
use super::pool::DbPool;
use super::schema::agencies;

/// Diesel-backed implementation of the `AgencyRepository` port.
#[derive(Clone)]
pub struct DieselAgencyRepository {
    pool: DbPool,
}

impl DieselAgencyRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl From<AgencyRow> for Agency {
    fn from(row: AgencyRow) -> Self {
        Self {
            id: row.id,
            common_name: row.common_name,
            full_name: row.full_name,
            acronym: row.acronym,
            url: row.url,
        }
    }
}

#[async_trait]
impl AgencyRepository for DieselAgencyRepository {
    async fn insert(&self, agency: &NewAgency) -> Result<Agency, RecordStoreError> {
        let new_row = NewAgencyRow {
            common_name: &agency.common_name,
            full_name: &agency.full_name,
            acronym: agency.acronym.as_deref(),
            url: agency.url.as_ref().map(|url| url.as_str()),
        };

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: AgencyRow = diesel::insert_into(agencies::table)
            .values(&new_row)
            .returning(AgencyRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(row.into())
    }

    async fn list(&self) -> Result<Vec<Agency>, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<AgencyRow> = agencies::table
            .order(agencies::common_name.desc())
            .select(AgencyRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(Agency::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Agency>, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<AgencyRow> = agencies::table
            .find(id)
            .select(AgencyRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(Agency::from))
    }
}
