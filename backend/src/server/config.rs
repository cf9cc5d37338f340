//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use birds_api::domain::UpdateMode;
use birds_api::outbound::memory::BirdIdSequence;
use birds_api::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) update_mode: UpdateMode,
    pub(crate) seed_examples: bool,
    pub(crate) id_seed: u64,
    pub(crate) server_url: Option<String>,
}

impl ServerConfig {
    /// Construct a configuration bound to `bind_addr` with in-memory storage.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            update_mode: UpdateMode::default(),
            seed_examples: false,
            id_seed: 1,
            server_url: None,
        }
    }

    /// Attach a database connection pool.
    ///
    /// When provided, birds are stored in PostgreSQL instead of process
    /// memory, and the in-memory seeding options are ignored.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    #[must_use]
    pub fn with_update_mode(mut self, update_mode: UpdateMode) -> Self {
        self.update_mode = update_mode;
        self
    }

    /// Preload the in-memory store with the example birds.
    #[must_use]
    pub fn with_example_birds(mut self, seed_examples: bool) -> Self {
        self.seed_examples = seed_examples;
        self
    }

    /// First identifier the in-memory store hands out.
    #[must_use]
    pub fn with_id_seed(mut self, id_seed: u64) -> Self {
        self.id_seed = id_seed;
        self
    }

    /// Base URL advertised in the OpenAPI `servers` list.
    #[must_use]
    pub fn with_server_url(mut self, server_url: Option<String>) -> Self {
        self.server_url = server_url;
        self
    }

    pub(crate) fn id_sequence(&self) -> BirdIdSequence {
        BirdIdSequence::new(self.id_seed)
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
