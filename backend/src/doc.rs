//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the bird and health endpoints together with the
//! schema wrappers from `inbound::http::schemas`. The document is served by
//! Swagger UI and printed by the `openapi-dump` binary.

use utoipa::OpenApi;
use utoipa::openapi::server::Server;

use crate::inbound::http::birds::{BirdBody, BirdEnvelope, BirdListEnvelope};
use crate::inbound::http::payload::BirdRequestBody;
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorEnvelopeSchema, ErrorSchema};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Birds API",
        description = "Create, read, update and delete bird records.",
    ),
    paths(
        crate::inbound::http::birds::list_birds,
        crate::inbound::http::birds::get_bird,
        crate::inbound::http::birds::create_bird,
        crate::inbound::http::birds::patch_bird,
        crate::inbound::http::birds::put_bird,
        crate::inbound::http::birds::delete_bird,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
        crate::inbound::http::root::root_redirect,
    ),
    components(schemas(
        BirdBody,
        BirdEnvelope,
        BirdListEnvelope,
        BirdRequestBody,
        ErrorSchema,
        ErrorCodeSchema,
        ErrorEnvelopeSchema
    )),
    tags(
        (name = "birds", description = "Bird records"),
        (name = "health", description = "Endpoints for health checks"),
        (name = "docs", description = "API documentation")
    )
)]
pub struct ApiDoc;

/// Build the document, advertising `server_url` when one is configured.
///
/// # Examples
/// ```
/// use birds_api::doc::openapi_document;
///
/// let doc = openapi_document(Some("https://birds.example.test"));
/// let servers = doc.servers.expect("servers listed");
/// assert_eq!(servers[0].url, "https://birds.example.test");
/// ```
pub fn openapi_document(server_url: Option<&str>) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    if let Some(url) = server_url {
        doc.servers = Some(vec![Server::new(url)]);
    }
    doc
}

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI registration.

    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    use super::*;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    fn bird_schema_uses_camel_case_timestamps() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let bird = schemas.get("BirdBody").expect("BirdBody schema");

        for field in ["id", "name", "description", "createdAt", "updatedAt"] {
            assert_object_schema_has_field(bird, field);
        }
    }

    #[rstest]
    #[case("/birds")]
    #[case("/birds/{birdId}")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn paths_are_registered(#[case] path: &str) {
        assert!(ApiDoc::openapi().paths.paths.contains_key(path));
    }

    #[rstest]
    fn server_url_is_optional() {
        assert!(openapi_document(None).servers.is_none());
    }
}
