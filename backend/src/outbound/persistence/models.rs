//! Internal Diesel row types for the `birds` table.
//!
//! These never leave the persistence module; repositories convert them into
//! domain types before returning.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::birds;

/// Row struct for reading from the birds table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = birds)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BirdRow {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating bird records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = birds)]
pub(crate) struct NewBirdRow<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset for partial bird updates; `None` columns are left untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = birds)]
pub(crate) struct BirdChangeset<'a> {
    pub name: Option<&'a str>,
    pub description: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}
