//! Port for bird persistence adapters and their errors.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Bird, BirdChanges, BirdId, NewBird};

use super::define_port_error;

define_port_error! {
    /// Errors raised by bird repository adapters.
    pub enum BirdRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "bird repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "bird repository query failed: {message}",
    }
}

/// Storage contract for bird records.
///
/// Identifiers that the store could never have issued are treated as unknown
/// rather than as errors: lookups return `None` and mutations report zero
/// affected records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BirdRepository: Send + Sync {
    /// All birds ordered by ascending identifier.
    async fn find_all(&self) -> Result<Vec<Bird>, BirdRepositoryError>;

    /// Fetch a bird by identifier.
    async fn find_by_id(&self, id: &BirdId) -> Result<Option<Bird>, BirdRepositoryError>;

    /// Persist a new bird, assigning a fresh identifier and stamping both
    /// timestamps with `now`.
    async fn insert(&self, bird: &NewBird, now: DateTime<Utc>)
    -> Result<Bird, BirdRepositoryError>;

    /// Apply changes to an existing bird and return the number of records
    /// affected (zero or one).
    async fn update_by_id(
        &self,
        id: &BirdId,
        changes: &BirdChanges,
        now: DateTime<Utc>,
    ) -> Result<u64, BirdRepositoryError>;

    /// Remove a bird and return the number of records affected.
    async fn delete_by_id(&self, id: &BirdId) -> Result<u64, BirdRepositoryError>;
}
