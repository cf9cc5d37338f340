//! Bird HTTP handlers.
//!
//! ```text
//! GET    /birds
//! GET    /birds/{birdId}
//! POST   /birds
//! PATCH  /birds/{birdId}
//! PUT    /birds/{birdId}
//! DELETE /birds/{birdId}
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, put, web};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{Bird, BirdId, INVALID_CREATE_MESSAGE, INVALID_UPDATE_MESSAGE};
use crate::inbound::http::ApiResult;
use crate::inbound::http::payload::BirdRequestBody;
use crate::inbound::http::schemas::ErrorEnvelopeSchema;
use crate::inbound::http::state::HttpState;

/// Bird representation returned to clients.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BirdBody {
    #[schema(example = "1")]
    pub id: String,
    #[schema(example = "Robin")]
    pub name: String,
    #[schema(example = "A bird")]
    pub description: String,
    #[schema(format = "date-time")]
    pub created_at: String,
    #[schema(format = "date-time")]
    pub updated_at: String,
}

/// Success envelope for a single bird.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BirdEnvelope {
    pub data: BirdBody,
}

/// Success envelope for a bird listing.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BirdListEnvelope {
    pub data: Vec<BirdBody>,
}

fn timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl From<Bird> for BirdBody {
    fn from(value: Bird) -> Self {
        Self {
            id: value.id().to_string(),
            name: value.name().to_string(),
            description: value.description().to_owned(),
            created_at: timestamp(value.created_at()),
            updated_at: timestamp(value.updated_at()),
        }
    }
}

impl From<Bird> for BirdEnvelope {
    fn from(value: Bird) -> Self {
        Self { data: value.into() }
    }
}

/// List every bird in ascending identifier order.
#[utoipa::path(
    get,
    path = "/birds",
    responses(
        (status = 200, description = "All birds", body = BirdListEnvelope),
        (status = 503, description = "Service unavailable", body = ErrorEnvelopeSchema)
    ),
    tags = ["birds"],
    operation_id = "listBirds"
)]
#[get("/birds")]
pub async fn list_birds(state: web::Data<HttpState>) -> ApiResult<web::Json<BirdListEnvelope>> {
    let birds = state.birds.list_birds().await?;
    Ok(web::Json(BirdListEnvelope {
        data: birds.into_iter().map(BirdBody::from).collect(),
    }))
}

/// Fetch one bird by identifier.
#[utoipa::path(
    get,
    path = "/birds/{birdId}",
    params(("birdId" = String, Path, description = "Bird identifier")),
    responses(
        (status = 200, description = "The bird", body = BirdEnvelope),
        (status = 404, description = "Bird not found", body = ErrorEnvelopeSchema),
        (status = 503, description = "Service unavailable", body = ErrorEnvelopeSchema)
    ),
    tags = ["birds"],
    operation_id = "getBird"
)]
#[get("/birds/{birdId}")]
pub async fn get_bird(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<BirdEnvelope>> {
    let id = BirdId::new(path.into_inner());
    let bird = state.birds.get_bird(&id).await?;
    Ok(web::Json(bird.into()))
}

/// Create a bird.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use birds_api::inbound::http::birds::create_bird;
///
/// let app = App::new().service(create_bird);
/// ```
#[utoipa::path(
    post,
    path = "/birds",
    request_body = BirdRequestBody,
    responses(
        (status = 201, description = "Bird created", body = BirdEnvelope),
        (status = 400, description = "The posted bird data is invalid", body = ErrorEnvelopeSchema),
        (status = 503, description = "Service unavailable", body = ErrorEnvelopeSchema)
    ),
    tags = ["birds"],
    operation_id = "createBird"
)]
#[post("/birds")]
pub async fn create_bird(
    state: web::Data<HttpState>,
    payload: web::Json<BirdRequestBody>,
) -> ApiResult<HttpResponse> {
    let draft = payload.into_inner().into_draft(INVALID_CREATE_MESSAGE)?;
    let bird = state.birds.create_bird(draft).await?;
    Ok(HttpResponse::Created().json(BirdEnvelope::from(bird)))
}

async fn apply_update(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<BirdRequestBody>,
) -> ApiResult<web::Json<BirdEnvelope>> {
    let id = BirdId::new(path.into_inner());
    let draft = payload.into_inner().into_draft(INVALID_UPDATE_MESSAGE)?;
    let bird = state.birds.update_bird(&id, draft).await?;
    Ok(web::Json(bird.into()))
}

/// Update a bird.
///
/// Under the default merge contract absent fields are left unchanged; under
/// the replace contract both fields are required.
#[utoipa::path(
    patch,
    path = "/birds/{birdId}",
    params(("birdId" = String, Path, description = "Bird identifier")),
    request_body = BirdRequestBody,
    responses(
        (status = 200, description = "Bird updated", body = BirdEnvelope),
        (status = 400, description = "The patched bird data is invalid", body = ErrorEnvelopeSchema),
        (status = 404, description = "Bird not found", body = ErrorEnvelopeSchema),
        (status = 503, description = "Service unavailable", body = ErrorEnvelopeSchema)
    ),
    tags = ["birds"],
    operation_id = "patchBird"
)]
#[patch("/birds/{birdId}")]
pub async fn patch_bird(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<BirdRequestBody>,
) -> ApiResult<web::Json<BirdEnvelope>> {
    apply_update(state, path, payload).await
}

/// Update a bird; shares the configured contract with `PATCH`.
#[utoipa::path(
    put,
    path = "/birds/{birdId}",
    params(("birdId" = String, Path, description = "Bird identifier")),
    request_body = BirdRequestBody,
    responses(
        (status = 200, description = "Bird updated", body = BirdEnvelope),
        (status = 400, description = "The patched bird data is invalid", body = ErrorEnvelopeSchema),
        (status = 404, description = "Bird not found", body = ErrorEnvelopeSchema),
        (status = 503, description = "Service unavailable", body = ErrorEnvelopeSchema)
    ),
    tags = ["birds"],
    operation_id = "putBird"
)]
#[put("/birds/{birdId}")]
pub async fn put_bird(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<BirdRequestBody>,
) -> ApiResult<web::Json<BirdEnvelope>> {
    apply_update(state, path, payload).await
}

/// Delete a bird.
#[utoipa::path(
    delete,
    path = "/birds/{birdId}",
    params(("birdId" = String, Path, description = "Bird identifier")),
    responses(
        (status = 204, description = "Bird deleted"),
        (status = 404, description = "Bird not found", body = ErrorEnvelopeSchema),
        (status = 503, description = "Service unavailable", body = ErrorEnvelopeSchema)
    ),
    tags = ["birds"],
    operation_id = "deleteBird"
)]
#[delete("/birds/{birdId}")]
pub async fn delete_bird(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = BirdId::new(path.into_inner());
    state.birds.delete_bird(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "birds_tests.rs"]
mod tests;
