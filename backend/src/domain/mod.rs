//! Domain primitives, ports and services.
//!
//! Purpose: define the bird resource and the rules governing it, independent
//! of HTTP or storage concerns. Adapters in `inbound` and `outbound` depend on
//! this module; it depends on neither.
//!
//! Public surface:
//! - Error (alias to `error::Error`): transport-agnostic error payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - Bird (alias to `bird::Bird`): stored bird record.
//! - BirdResourceService: implementation of the bird driving port.

pub mod bird;
pub mod bird_service;
pub mod error;
pub mod ports;
pub mod trace_id;

pub use self::bird::{
    BIRD_NAME_MAX, Bird, BirdChanges, BirdDraft, BirdId, BirdName, BirdValidationError, NewBird,
    ParseUpdateModeError, UpdateMode,
};
pub use self::bird_service::{
    BIRD_NOT_FOUND_MESSAGE, BirdResourceService, INVALID_CREATE_MESSAGE, INVALID_UPDATE_MESSAGE,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
