//! HTTP inbound adapter exposing the bird REST endpoints.

pub mod birds;
pub mod error;
pub mod health;
pub mod payload;
pub mod root;
pub mod schemas;
pub mod state;

pub use error::{ApiResult, json_error_handler};
