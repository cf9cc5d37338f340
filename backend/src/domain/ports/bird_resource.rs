//! Driving port for the bird resource.
//!
//! Inbound adapters call this port with raw [`BirdDraft`] input; validation,
//! timestamps and not-found detection all happen behind it. Failures arrive
//! as domain [`Error`] values ready to be mapped onto a transport envelope.

use async_trait::async_trait;

use crate::domain::{Bird, BirdDraft, BirdId, Error, UpdateMode};

/// Driving port for bird reads and mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BirdResource: Send + Sync {
    /// Every stored bird in ascending identifier order.
    async fn list_birds(&self) -> Result<Vec<Bird>, Error>;

    /// A single bird, or a not-found error.
    async fn get_bird(&self, id: &BirdId) -> Result<Bird, Error>;

    /// Validate and persist a new bird.
    async fn create_bird(&self, draft: BirdDraft) -> Result<Bird, Error>;

    /// Validate and apply changes to an existing bird, returning the stored
    /// record after the update.
    ///
    /// Validation runs before the existence check, so an invalid payload for
    /// an unknown identifier reports the payload error.
    async fn update_bird(&self, id: &BirdId, draft: BirdDraft) -> Result<Bird, Error>;

    /// Remove a bird, or report that it does not exist.
    async fn delete_bird(&self, id: &BirdId) -> Result<(), Error>;

    /// Contract applied by [`BirdResource::update_bird`].
    fn update_mode(&self) -> UpdateMode;
}
