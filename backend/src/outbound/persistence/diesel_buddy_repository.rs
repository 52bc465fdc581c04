//! PostgreSQL-backed `BuddyRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{BuddyRepository, RecordStoreError};
use crate::domain::{Affiliation, Buddy, IdentityKey, NewBuddy};

use super::diesel_helpers::{cast_version, map_diesel_error, map_pool_error};
use super::models::{BuddyRow, NewBuddyRow};
use super::pool::DbPool;
use super::schema::buddies;

/// Diesel-backed implementation of the `BuddyRepository` port.
#[derive(Clone)]
pub struct DieselBuddyRepository {
    pool: DbPool,
}

impl DieselBuddyRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn stored_key(raw: String, column: &str) -> Result<IdentityKey, RecordStoreError> {
    IdentityKey::new(raw)
        .map_err(|error| RecordStoreError::query(format!("stored {column} is invalid: {error}")))
}

fn row_to_buddy(row: BuddyRow) -> Result<Buddy, RecordStoreError> {
    let affiliation = row.organisation.map(|organisation| Affiliation {
        organisation,
        member_id: row.org_member_id,
    });
    Ok(Buddy {
        id: row.id,
        version: cast_version(row.version),
        created_at: row.created_at,
        updated_at: row.updated_at,
        owner: stored_key(row.user_id, "user_id")?,
        linked_user_id: row
            .buddy_user_id
            .map(|raw| stored_key(raw, "buddy_user_id"))
            .transpose()?,
        name: row.name,
        email: row.email,
        phone_number: row.phone_number,
        affiliation,
        notes: row.notes,
    })
}

#[async_trait]
impl BuddyRepository for DieselBuddyRepository {
    async fn insert(&self, buddy: &NewBuddy) -> Result<Buddy, RecordStoreError> {
        let new_row = NewBuddyRow {
            user_id: buddy.owner.as_str(),
            buddy_user_id: buddy.linked_user_id.as_ref().map(IdentityKey::as_str),
            name: &buddy.name,
            email: buddy.email.as_ref().map(|email| email.as_str()),
            phone_number: buddy.phone_number.as_deref(),
            organisation: buddy
                .affiliation
                .as_ref()
                .map(|affiliation| affiliation.organisation.as_str()),
            org_member_id: buddy
                .affiliation
                .as_ref()
                .and_then(|affiliation| affiliation.member_id.as_deref()),
            notes: buddy.notes.as_deref(),
        };

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: BuddyRow = diesel::insert_into(buddies::table)
            .values(&new_row)
            .returning(BuddyRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_buddy(row)
    }

    async fn list_for_owner(&self, owner: &IdentityKey) -> Result<Vec<Buddy>, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<BuddyRow> = buddies::table
            .filter(buddies::user_id.eq(owner.as_str()))
            .order((buddies::name.desc(), buddies::id.desc()))
            .select(BuddyRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_buddy).collect()
    }
}
