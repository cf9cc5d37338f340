//! OpenAPI schema definitions for domain types.
//!
//! Domain types do not derive `ToSchema`; these wrappers mirror their wire
//! shape for documentation only.

use utoipa::ToSchema;

/// Stable machine-readable error codes.
#[derive(ToSchema)]
#[schema(as = ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request body is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The requested bird does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// A backing service is unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// Error payload with machine-readable code and human-readable message.
#[derive(ToSchema)]
#[schema(as = Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    #[schema(example = "not_found")]
    code: ErrorCodeSchema,
    #[schema(example = "Bird not found")]
    message: String,
    /// Correlation identifier, also sent as the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    details: Option<serde_json::Value>,
}

/// Envelope wrapping every error response.
#[derive(ToSchema)]
#[schema(as = ErrorEnvelope)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorEnvelopeSchema {
    error: ErrorSchema,
}
