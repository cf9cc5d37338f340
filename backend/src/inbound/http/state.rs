//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and depend only on the
//! [`BirdResource`] driving port, so they stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::BirdResource;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub birds: Arc<dyn BirdResource>,
}

impl HttpState {
    /// Construct state from the bird resource implementation.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use birds_api::domain::{BirdResourceService, UpdateMode};
    /// use birds_api::inbound::http::state::HttpState;
    /// use birds_api::outbound::memory::InMemoryBirdRepository;
    /// use mockable::DefaultClock;
    ///
    /// let service = BirdResourceService::new(
    ///     Arc::new(InMemoryBirdRepository::default()),
    ///     Arc::new(DefaultClock),
    ///     UpdateMode::Merge,
    /// );
    /// let _state = HttpState::new(Arc::new(service));
    /// ```
    pub fn new(birds: Arc<dyn BirdResource>) -> Self {
        Self { birds }
    }
}
