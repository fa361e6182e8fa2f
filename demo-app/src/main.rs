use tracing::{info, warn};
use weft::prelude::*;

mod models;
mod modules;
mod services;

use modules::{HealthModule, UserModule};
use services::UserService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    // load() succeeds without application.yaml (env vars still overlay).
    let config = AppConfig::load("dev")?;

    let doc_config = config
        .section::<DocumentConfig>("openapi")
        .unwrap_or_else(|err| {
            warn!(error = %err, "No usable openapi section, using defaults");
            DocumentConfig::new("Weft Demo API", "0.1.0")
                .with_auth(true)
                .with_compat(Compat::Strict)
                .with_docs_ui(true)
        });

    let swagger = DocumentBuilder::builder().add_config(doc_config);
    let docs_ui = swagger.docs_ui();

    let (router, document) = ModuleRegistry::builder()
        .add_swagger_builder(swagger)
        .add_module(vec![
            Box::new(HealthModule) as Box<dyn Module>,
            Box::new(UserModule::new(UserService::new())),
        ])?
        .into_parts()?;

    let app = router
        .merge(openapi_routes(&document, docs_ui)?)
        .layer(default_trace());

    let addr: String = config.get_or("server.addr", "0.0.0.0:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, docs_ui, "Weft demo listening");

    weft::http::serve(listener, app).await?;
    Ok(())
}
