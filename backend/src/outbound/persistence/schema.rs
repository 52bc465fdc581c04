//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations under `backend/migrations`.
//! `diesel print-schema` regenerates them from a live database.

diesel::table! {
    /// Certification agencies. Both names are unique.
    agencies (id) {
        id -> Int8,
        common_name -> Text,
        full_name -> Text,
        acronym -> Nullable<Text>,
        url -> Nullable<Text>,
    }
}

diesel::table! {
    /// Diver profiles keyed by directory identity key.
    divers (user_id) {
        user_id -> Text,
        version -> Int4,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        diving_since -> Nullable<Date>,
        dive_number_offset -> Int2,
        default_diving_country -> Nullable<Text>,
        default_diving_timezone -> Nullable<Text>,
    }
}

diesel::table! {
    /// Buddy contacts. `user_id` owns the row; `buddy_user_id` links to
    /// another diver when the email resolved to one.
    buddies (id) {
        id -> Int8,
        version -> Int4,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
        user_id -> Text,
        buddy_user_id -> Nullable<Text>,
        name -> Text,
        email -> Nullable<Text>,
        phone_number -> Nullable<Text>,
        organisation -> Nullable<Text>,
        org_member_id -> Nullable<Text>,
        notes -> Nullable<Text>,
    }
}

diesel::allow_tables_to_appear_in_same_query!(agencies, buddies, divers);
