//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

use super::schema::{agencies, buddies, divers};

// ---------------------------------------------------------------------------
// Diver models
// ---------------------------------------------------------------------------

/// Row struct for reading from the divers table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = divers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DiverRow {
    pub user_id: String,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub diving_since: Option<NaiveDate>,
    pub dive_number_offset: i16,
    pub default_diving_country: Option<String>,
    pub default_diving_timezone: Option<String>,
}

/// Insertable struct for new divers. Version and timestamps use column
/// defaults.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = divers)]
pub(crate) struct NewDiverRow<'a> {
    pub user_id: &'a str,
    pub diving_since: Option<NaiveDate>,
    pub dive_number_offset: i16,
    pub default_diving_country: Option<&'a str>,
    pub default_diving_timezone: Option<&'a str>,
}

// ---------------------------------------------------------------------------
// Buddy models
// ---------------------------------------------------------------------------

/// Row struct for reading from the buddies table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = buddies)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BuddyRow {
    pub id: i64,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user_id: String,
    pub buddy_user_id: Option<String>,
    pub name: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub organisation: Option<String>,
    pub org_member_id: Option<String>,
    pub notes: Option<String>,
}

/// Insertable struct for new buddies.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = buddies)]
pub(crate) struct NewBuddyRow<'a> {
    pub user_id: &'a str,
    pub buddy_user_id: Option<&'a str>,
    pub name: &'a str,
    pub email: Option<&'a str>,
    pub phone_number: Option<&'a str>,
    pub organisation: Option<&'a str>,
    pub org_member_id: Option<&'a str>,
    pub notes: Option<&'a str>,
}

// ---------------------------------------------------------------------------
// Agency models
// ---------------------------------------------------------------------------

/// Row struct for reading from the agencies table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = agencies)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AgencyRow {
    pub id: i64,
    pub common_name: String,
    pub full_name: String,
    pub acronym: Option<String>,
    pub url: Option<String>,
}

/// Insertable struct for new agencies.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = agencies)]
pub(crate) struct NewAgencyRow<'a> {
    pub common_name: &'a str,
    pub full_name: &'a str,
    pub acronym: Option<&'a str>,
    pub url: Option<&'a str>,
}
