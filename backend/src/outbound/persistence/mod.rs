//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories only translate between Diesel rows and domain types. Row
//! structs (`models.rs`) and table definitions (`schema.rs`) stay private to
//! this module.
//!
//! ```ignore
//! use birds_api::outbound::persistence::{DbPool, DieselBirdRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/birds")).await?;
//! let repo = DieselBirdRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_bird_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_bird_repository::DieselBirdRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
