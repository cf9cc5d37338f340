//! Print the OpenAPI document as JSON.

use std::process::ExitCode;

use birds_api::doc::openapi_document;

fn main() -> ExitCode {
    let server_url = std::env::var("BIRDS_SERVER_URL").ok();
    match openapi_document(server_url.as_deref()).to_pretty_json() {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("failed to serialise OpenAPI document: {err}");
            ExitCode::FAILURE
        }
    }
}
