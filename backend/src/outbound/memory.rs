//! In-memory bird repository.
//!
//! Backs the service when no database is configured. Records live for the
//! lifetime of the process; the identifier sequence and the record list share
//! one lock so concurrent creates can never observe the same identifier.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{BirdRepository, BirdRepositoryError};
use crate::domain::{Bird, BirdChanges, BirdId, BirdName, NewBird};

/// Birds optionally loaded into a fresh in-memory store.
pub const EXAMPLE_BIRDS: [(&str, &str); 4] = [
    (
        "Eastern bluebird",
        "The eastern bluebird is a small North American migratory thrush found in open \
         woodlands, farmlands, and orchards",
    ),
    (
        "Black-capped chickadee",
        "The black-capped chickadee is a small, nonmigratory, North American songbird that \
         lives in deciduous and mixed forests",
    ),
    (
        "Yellow-rumped warbler",
        "The yellow-rumped warbler is a regular North American bird species that can be \
         commonly observed all across the continent",
    ),
    (
        "House sparrow",
        "The house sparrow is a bird of the sparrow family Passeridae, found in most parts of \
         the world.",
    ),
];

/// Monotonic source of decimal bird identifiers.
///
/// # Examples
/// ```
/// use birds_api::outbound::memory::BirdIdSequence;
///
/// let mut ids = BirdIdSequence::new(7);
/// assert_eq!(ids.next_id().as_str(), "7");
/// assert_eq!(ids.next_id().as_str(), "8");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BirdIdSequence {
    next: u64,
}

impl BirdIdSequence {
    /// Start issuing identifiers at `seed`.
    pub fn new(seed: u64) -> Self {
        Self { next: seed }
    }

    /// Issue the next identifier.
    pub fn next_id(&mut self) -> BirdId {
        let id = BirdId::from(self.next);
        self.next = self.next.saturating_add(1);
        id
    }
}

impl Default for BirdIdSequence {
    fn default() -> Self {
        Self::new(1)
    }
}

#[derive(Debug)]
struct Store {
    birds: Vec<Bird>,
    sequence: BirdIdSequence,
}

/// Process-local [`BirdRepository`] implementation.
#[derive(Debug)]
pub struct InMemoryBirdRepository {
    store: Mutex<Store>,
}

impl InMemoryBirdRepository {
    /// Create an empty store issuing identifiers from `sequence`.
    pub fn new(sequence: BirdIdSequence) -> Self {
        Self {
            store: Mutex::new(Store {
                birds: Vec::new(),
                sequence,
            }),
        }
    }

    /// Create a store pre-populated with [`EXAMPLE_BIRDS`].
    pub fn with_example_birds(mut sequence: BirdIdSequence, now: DateTime<Utc>) -> Self {
        let birds = EXAMPLE_BIRDS
            .iter()
            .filter_map(|(name, description)| {
                let name = BirdName::new(*name).ok()?;
                Some(Bird::create(
                    sequence.next_id(),
                    NewBird::new(name, *description),
                    now,
                ))
            })
            .collect();
        Self {
            store: Mutex::new(Store { birds, sequence }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Store>, BirdRepositoryError> {
        self.store
            .lock()
            .map_err(|_| BirdRepositoryError::query("in-memory bird store lock poisoned"))
    }
}

impl Default for InMemoryBirdRepository {
    fn default() -> Self {
        Self::new(BirdIdSequence::default())
    }
}

#[async_trait]
impl BirdRepository for InMemoryBirdRepository {
    async fn find_all(&self) -> Result<Vec<Bird>, BirdRepositoryError> {
        Ok(self.lock()?.birds.clone())
    }

    async fn find_by_id(&self, id: &BirdId) -> Result<Option<Bird>, BirdRepositoryError> {
        let store = self.lock()?;
        Ok(store.birds.iter().find(|bird| bird.id() == id).cloned())
    }

    async fn insert(
        &self,
        bird: &NewBird,
        now: DateTime<Utc>,
    ) -> Result<Bird, BirdRepositoryError> {
        let mut store = self.lock()?;
        let id = store.sequence.next_id();
        let created = Bird::create(id, bird.clone(), now);
        // Identifiers only grow, so appending keeps the list in id order.
        store.birds.push(created.clone());
        Ok(created)
    }

    async fn update_by_id(
        &self,
        id: &BirdId,
        changes: &BirdChanges,
        now: DateTime<Utc>,
    ) -> Result<u64, BirdRepositoryError> {
        let mut store = self.lock()?;
        match store.birds.iter_mut().find(|bird| bird.id() == id) {
            Some(bird) => {
                bird.apply(changes, now);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_by_id(&self, id: &BirdId) -> Result<u64, BirdRepositoryError> {
        let mut store = self.lock()?;
        let before = store.birds.len();
        store.birds.retain(|bird| bird.id() != id);
        Ok((before - store.birds.len()) as u64)
    }
}
