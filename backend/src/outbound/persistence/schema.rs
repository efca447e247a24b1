//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Directory user accounts.
    ///
    /// `handle` is stored as written. Lookups compare its canonical form,
    /// which a partial unique index keeps distinct across active rows.
    users (id) {
        id -> Uuid,
        active -> Bool,
        email -> Text,
        emails -> Array<Text>,
        handle -> Text,
        profile_url -> Nullable<Text>,
        avatar_url -> Nullable<Text>,
        name -> Text,
        phone -> Nullable<Text>,
        date_of_birth -> Nullable<Date>,
        timezone -> Nullable<Text>,
        roles -> Array<Text>,
        /// Code string of the invite used at sign-up. Not a foreign key.
        invite_code -> Nullable<Text>,
        /// Provider name to link object.
        auth_providers -> Jsonb,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}
