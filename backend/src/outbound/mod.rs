//! Outbound adapters implementing the bird repository port.
//!
//! - **memory**: process-local store used when no database is configured.
//! - **persistence**: PostgreSQL store using Diesel with `bb8` pooling.

pub mod memory;
pub mod persistence;
