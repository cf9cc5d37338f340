//! Builders for the HTTP state and its repository-backed bird service.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::info;

use birds_api::domain::BirdResourceService;
use birds_api::domain::ports::BirdResource;
use birds_api::inbound::http::state::HttpState;
use birds_api::outbound::memory::InMemoryBirdRepository;
use birds_api::outbound::persistence::DieselBirdRepository;

use super::ServerConfig;

/// Build the bird resource, preferring PostgreSQL when a pool is configured.
fn build_bird_resource(config: &ServerConfig) -> Arc<dyn BirdResource> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    match &config.db_pool {
        Some(pool) => {
            info!(update_mode = %config.update_mode, "using PostgreSQL bird store");
            Arc::new(BirdResourceService::new(
                Arc::new(DieselBirdRepository::new(pool.clone())),
                clock,
                config.update_mode,
            ))
        }
        None => {
            let sequence = config.id_sequence();
            let repo = if config.seed_examples {
                InMemoryBirdRepository::with_example_birds(sequence, clock.utc())
            } else {
                InMemoryBirdRepository::new(sequence)
            };
            info!(
                update_mode = %config.update_mode,
                seeded = config.seed_examples,
                "using in-memory bird store"
            );
            Arc::new(BirdResourceService::new(
                Arc::new(repo),
                clock,
                config.update_mode,
            ))
        }
    }
}

/// Build the shared HTTP state for every worker.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    web::Data::new(HttpState::new(build_bird_resource(config)))
}

#[cfg(test)]
mod tests {
    //! Store selection coverage.

    use std::net::{Ipv4Addr, SocketAddr};

    use birds_api::domain::BirdDraft;
    use rstest::rstest;

    use super::*;

    fn config() -> ServerConfig {
        ServerConfig::new(SocketAddr::from((Ipv4Addr::LOCALHOST, 0)))
    }

    #[rstest]
    #[tokio::test]
    async fn unseeded_store_starts_empty() {
        let state = build_http_state(&config());
        let birds = state.birds.list_birds().await.expect("list birds");
        assert!(birds.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn seeded_store_lists_examples() {
        let state = build_http_state(&config().with_example_birds(true));
        let birds = state.birds.list_birds().await.expect("list birds");
        assert_eq!(birds.len(), 4);
    }

    #[rstest]
    #[tokio::test]
    async fn id_seed_controls_first_identifier() {
        let state = build_http_state(&config().with_id_seed(100));
        let bird = state
            .birds
            .create_bird(BirdDraft {
                name: Some("Robin".to_owned()),
                description: Some("A bird".to_owned()),
            })
            .await
            .expect("create bird");
        assert_eq!(bird.id().as_str(), "100");
    }
}
