//! Domain ports for the hexagonal boundary.
//!
//! [`BirdRepository`] is the driven port implemented by storage adapters;
//! [`BirdResource`] is the driving port consumed by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod bird_repository;
mod bird_resource;

#[cfg(test)]
pub use bird_repository::MockBirdRepository;
pub use bird_repository::{BirdRepository, BirdRepositoryError};
#[cfg(test)]
pub use bird_resource::MockBirdResource;
pub use bird_resource::BirdResource;
