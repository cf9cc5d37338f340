//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly; regenerate them
//! with `diesel print-schema` after changing a migration.

diesel::table! {
    /// Bird records.
    ///
    /// `id` is a `BIGSERIAL`, so identifiers grow monotonically and are never
    /// reissued after a delete.
    birds (id) {
        id -> Int8,
        /// Between 1 and 255 characters.
        name -> Varchar,
        description -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}
