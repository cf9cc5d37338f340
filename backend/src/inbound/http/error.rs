//! HTTP adapter mapping for domain errors.
//!
//! Domain errors stay transport agnostic; this module gives them a status
//! code, wraps them in the `{"error": ...}` envelope and echoes the trace
//! identifier as a response header.

use actix_web::error::JsonPayloadError;
use actix_web::http::{Method, StatusCode};
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use serde::Serialize;
use serde_json::json;
use tracing::{error, warn};

use crate::domain::{
    Error, ErrorCode, INVALID_CREATE_MESSAGE, INVALID_UPDATE_MESSAGE, TRACE_ID_HEADER,
};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Wire envelope for every error response.
#[derive(Debug, Serialize)]
struct ErrorEnvelope {
    error: Error,
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_server_error(error: &Error) -> Error {
    match error.code() {
        ErrorCode::InternalError => {
            error!(message = error.message(), trace_id = ?error.trace_id(), "internal error");
            let mut redacted = Error::internal("Internal server error");
            if let Some(id) = error.trace_id() {
                redacted = redacted.with_trace_id(id.to_owned());
            }
            redacted
        }
        ErrorCode::ServiceUnavailable => {
            warn!(message = error.message(), trace_id = ?error.trace_id(), "dependency unavailable");
            let mut redacted = Error::service_unavailable("Service temporarily unavailable");
            if let Some(id) = error.trace_id() {
                redacted = redacted.with_trace_id(id.to_owned());
            }
            redacted
        }
        _ => error.clone(),
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        builder.json(ErrorEnvelope {
            error: redact_server_error(self),
        })
    }
}

/// Turn JSON extraction failures into the invalid-payload error for the
/// operation being attempted.
///
/// Registered through `web::JsonConfig::error_handler`, so unparsable bodies,
/// wrong content types and oversized payloads all share the error envelope.
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    let message = if *req.method() == Method::POST {
        INVALID_CREATE_MESSAGE
    } else {
        INVALID_UPDATE_MESSAGE
    };
    let code = match &err {
        JsonPayloadError::ContentType => "unsupported_content_type",
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            "payload_too_large"
        }
        _ => "malformed_json",
    };
    Error::invalid_request(message)
        .with_details(json!({ "code": code, "reason": err.to_string() }))
        .into()
}
