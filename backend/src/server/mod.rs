//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use utoipa_swagger_ui::SwaggerUi;

use birds_api::Trace;
use birds_api::doc::openapi_document;
use birds_api::inbound::http::birds::{
    create_bird, delete_bird, get_bird, list_birds, patch_bird, put_bird,
};
use birds_api::inbound::http::health::{HealthState, live, ready};
use birds_api::inbound::http::json_error_handler;
use birds_api::inbound::http::root::{docs_redirect, root_redirect};
use birds_api::inbound::http::state::HttpState;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    server_url: Option<String>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        server_url,
    } = deps;

    App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .wrap(Trace)
        .service(list_birds)
        .service(create_bird)
        .service(get_bird)
        .service(patch_bird)
        .service(put_bird)
        .service(delete_bird)
        .service(ready)
        .service(live)
        .service(root_redirect)
        .service(docs_redirect)
        .service(
            SwaggerUi::new("/docs/{_:.*}").url(
                "/api-docs/openapi.json",
                openapi_document(server_url.as_deref()),
            ),
        )
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Parameters
/// - `health_state`: shared readiness state updated once the server is initialised.
/// - `config`: pre-built [`ServerConfig`] selecting the bird store and binding.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket or starting the server fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config);
    let bind_addr = config.bind_addr();
    let ServerConfig { server_url, .. } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            server_url: server_url.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
