//! Redirects onto the interactive API documentation.

use actix_web::{HttpResponse, get, http::header};

/// Documentation path served by Swagger UI.
pub const DOCS_PATH: &str = "/docs/";

/// Permanently redirect `/` to the documentation UI.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 301, description = "Redirect to API documentation")),
    tags = ["docs"]
)]
#[get("/")]
pub async fn root_redirect() -> HttpResponse {
    HttpResponse::MovedPermanently()
        .insert_header((header::LOCATION, DOCS_PATH))
        .finish()
}

/// Send the bare `/docs` path to the Swagger UI index under [`DOCS_PATH`].
#[get("/docs")]
pub async fn docs_redirect() -> HttpResponse {
    HttpResponse::MovedPermanently()
        .insert_header((header::LOCATION, DOCS_PATH))
        .finish()
}
