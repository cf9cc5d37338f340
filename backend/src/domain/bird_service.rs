//! Bird domain service.
//!
//! Implements the [`BirdResource`] driving port on top of any
//! [`BirdRepository`], owning payload validation, update semantics and the
//! clock used for record timestamps.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;

use crate::domain::ports::{BirdRepository, BirdRepositoryError, BirdResource};
use crate::domain::{
    Bird, BirdChanges, BirdDraft, BirdId, BirdValidationError, Error, NewBird, UpdateMode,
};

/// Message returned when a bird identifier is unknown.
pub const BIRD_NOT_FOUND_MESSAGE: &str = "Bird not found";
/// Message returned when a create payload fails validation.
pub const INVALID_CREATE_MESSAGE: &str = "The posted bird data is invalid";
/// Message returned when an update payload fails validation.
pub const INVALID_UPDATE_MESSAGE: &str = "The patched bird data is invalid";

fn map_repository_error(error: BirdRepositoryError) -> Error {
    match error {
        BirdRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("bird repository unavailable: {message}"))
        }
        BirdRepositoryError::Query { message } => {
            Error::internal(format!("bird repository error: {message}"))
        }
    }
}

fn invalid_payload(message: &str, error: &BirdValidationError) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": error.field(),
        "code": error.code(),
        "reason": error.to_string(),
    }))
}

fn bird_not_found() -> Error {
    Error::not_found(BIRD_NOT_FOUND_MESSAGE)
}

/// Bird service implementing the [`BirdResource`] driving port.
#[derive(Clone)]
pub struct BirdResourceService<R> {
    bird_repo: Arc<R>,
    clock: Arc<dyn Clock>,
    update_mode: UpdateMode,
}

impl<R> BirdResourceService<R> {
    /// Create a service over the given repository and clock.
    pub fn new(bird_repo: Arc<R>, clock: Arc<dyn Clock>, update_mode: UpdateMode) -> Self {
        Self {
            bird_repo,
            clock,
            update_mode,
        }
    }
}

#[async_trait]
impl<R> BirdResource for BirdResourceService<R>
where
    R: BirdRepository,
{
    async fn list_birds(&self) -> Result<Vec<Bird>, Error> {
        self.bird_repo
            .find_all()
            .await
            .map_err(map_repository_error)
    }

    async fn get_bird(&self, id: &BirdId) -> Result<Bird, Error> {
        self.bird_repo
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(bird_not_found)
    }

    async fn create_bird(&self, draft: BirdDraft) -> Result<Bird, Error> {
        let bird = NewBird::try_from(draft)
            .map_err(|err| invalid_payload(INVALID_CREATE_MESSAGE, &err))?;

        let created = self
            .bird_repo
            .insert(&bird, self.clock.utc())
            .await
            .map_err(map_repository_error)?;
        tracing::debug!(bird_id = %created.id(), "bird created");
        Ok(created)
    }

    async fn update_bird(&self, id: &BirdId, draft: BirdDraft) -> Result<Bird, Error> {
        let changes = BirdChanges::from_draft(draft, self.update_mode)
            .map_err(|err| invalid_payload(INVALID_UPDATE_MESSAGE, &err))?;

        let current = self.get_bird(id).await?;
        let stamp = current.next_update_stamp(self.clock.utc());

        let affected = self
            .bird_repo
            .update_by_id(id, &changes, stamp)
            .await
            .map_err(map_repository_error)?;
        if affected == 0 {
            return Err(bird_not_found());
        }

        // A concurrent delete between the update and this read surfaces as
        // not found rather than as a stale record.
        self.get_bird(id).await
    }

    async fn delete_bird(&self, id: &BirdId) -> Result<(), Error> {
        let affected = self
            .bird_repo
            .delete_by_id(id)
            .await
            .map_err(map_repository_error)?;
        if affected == 0 {
            return Err(bird_not_found());
        }
        tracing::debug!(bird_id = %id, "bird deleted");
        Ok(())
    }

    fn update_mode(&self) -> UpdateMode {
        self.update_mode
    }
}

#[cfg(test)]
#[path = "bird_service_tests.rs"]
mod tests;
