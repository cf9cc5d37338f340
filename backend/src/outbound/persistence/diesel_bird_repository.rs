//! PostgreSQL-backed `BirdRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{BirdRepository, BirdRepositoryError};
use crate::domain::{Bird, BirdChanges, BirdId, BirdName, NewBird};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{BirdChangeset, BirdRow, NewBirdRow};
use super::pool::{DbPool, PoolError};
use super::schema::birds;

/// Diesel-backed implementation of the bird repository port.
#[derive(Clone)]
pub struct DieselBirdRepository {
    pool: DbPool,
}

impl DieselBirdRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> BirdRepositoryError {
    map_basic_pool_error(error, BirdRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> BirdRepositoryError {
    map_basic_diesel_error(
        error,
        BirdRepositoryError::query,
        BirdRepositoryError::connection,
    )
}

/// Translate an API identifier into a primary key.
///
/// Only the canonical decimal rendering of a key matches, so `"01"` or
/// `"+1"` never alias record `1`.
fn parse_row_id(id: &BirdId) -> Option<i64> {
    let raw = id.as_str();
    raw.parse::<i64>()
        .ok()
        .filter(|value| value.to_string() == raw)
}

fn row_to_bird(row: BirdRow) -> Result<Bird, BirdRepositoryError> {
    let BirdRow {
        id,
        name,
        description,
        created_at,
        updated_at,
    } = row;
    let name = BirdName::new(name).map_err(|err| BirdRepositoryError::query(err.to_string()))?;
    Ok(Bird::restore(
        BirdId::new(id.to_string()),
        NewBird::new(name, description),
        created_at,
        updated_at,
    ))
}

#[async_trait]
impl BirdRepository for DieselBirdRepository {
    async fn find_all(&self) -> Result<Vec<Bird>, BirdRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<BirdRow> = birds::table
            .order(birds::id.asc())
            .select(BirdRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_bird).collect()
    }

    async fn find_by_id(&self, id: &BirdId) -> Result<Option<Bird>, BirdRepositoryError> {
        let Some(row_id) = parse_row_id(id) else {
            return Ok(None);
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = birds::table
            .filter(birds::id.eq(row_id))
            .select(BirdRow::as_select())
            .first::<BirdRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_bird).transpose()
    }

    async fn insert(
        &self,
        bird: &NewBird,
        now: DateTime<Utc>,
    ) -> Result<Bird, BirdRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewBirdRow {
            name: bird.name().as_str(),
            description: bird.description(),
            created_at: now,
            updated_at: now,
        };

        let row = diesel::insert_into(birds::table)
            .values(&new_row)
            .returning(BirdRow::as_returning())
            .get_result::<BirdRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_bird(row)
    }

    async fn update_by_id(
        &self,
        id: &BirdId,
        changes: &BirdChanges,
        now: DateTime<Utc>,
    ) -> Result<u64, BirdRepositoryError> {
        let Some(row_id) = parse_row_id(id) else {
            return Ok(0);
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changeset = BirdChangeset {
            name: changes.name().map(BirdName::as_str),
            description: changes.description(),
            updated_at: now,
        };

        let affected = diesel::update(birds::table.filter(birds::id.eq(row_id)))
            .set(&changeset)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(affected as u64)
    }

    async fn delete_by_id(&self, id: &BirdId) -> Result<u64, BirdRepositoryError> {
        let Some(row_id) = parse_row_id(id) else {
            return Ok(0);
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let affected = diesel::delete(birds::table.filter(birds::id.eq(row_id)))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(affected as u64)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for identifier parsing and row conversion.

    use rstest::{fixture, rstest};

    use super::*;
    use crate::test_support::fixture_timestamp;

    #[fixture]
    fn valid_row() -> BirdRow {
        BirdRow {
            id: 42,
            name: "Robin".to_owned(),
            description: "A bird".to_owned(),
            created_at: fixture_timestamp(),
            updated_at: fixture_timestamp(),
        }
    }

    #[rstest]
    #[case("1", Some(1))]
    #[case("9000000000", Some(9_000_000_000))]
    #[case("01", None)]
    #[case("+1", None)]
    #[case("abc", None)]
    #[case("", None)]
    #[case("99999999999999999999", None)]
    fn parse_row_id_accepts_only_canonical_keys(#[case] raw: &str, #[case] expected: Option<i64>) {
        assert_eq!(parse_row_id(&BirdId::new(raw)), expected);
    }

    #[rstest]
    fn row_to_bird_renders_decimal_id(valid_row: BirdRow) {
        let bird = row_to_bird(valid_row).expect("valid row converts");
        assert_eq!(bird.id().as_str(), "42");
        assert_eq!(bird.name().as_str(), "Robin");
        assert_eq!(bird.created_at(), fixture_timestamp());
    }

    #[rstest]
    fn row_to_bird_rejects_empty_names(mut valid_row: BirdRow) {
        valid_row.name = String::new();
        let err = row_to_bird(valid_row).expect_err("empty name rejected");
        assert!(matches!(err, BirdRepositoryError::Query { .. }));
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let err = map_pool_error(PoolError::checkout("connection refused"));
        assert!(matches!(err, BirdRepositoryError::Connection { .. }));
        assert!(err.to_string().contains("connection refused"));
    }
}
