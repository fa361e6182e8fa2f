use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::Router;
use std::sync::Arc;

use crate::document::Document;
use crate::error::DocumentError;

/// Build a router that serves the document at `/openapi.json` and, when
/// `docs_ui` is set, a Swagger UI page at `/docs`.
///
/// The document is serialized once here; requests share the same string.
pub fn openapi_routes<S: Clone + Send + Sync + 'static>(
    document: &Document,
    docs_ui: bool,
) -> Result<Router<S>, DocumentError> {
    let spec_json: Arc<str> = serde_json::to_string_pretty(document)?.into();

    let mut router = Router::<S>::new().route(
        "/openapi.json",
        get(move || {
            let json = spec_json.clone();
            async move { ([("content-type", "application/json")], json.to_string()).into_response() }
        }),
    );

    if docs_ui {
        let page = docs_page(&document.info.title);
        router = router.route(
            "/docs",
            get(move || {
                let page = page.clone();
                async move { Html(page).into_response() }
            }),
        );
    }

    tracing::debug!(docs_ui, "OpenAPI routes mounted");
    Ok(router)
}

fn docs_page(title: &str) -> String {
    DOCS_HTML.replace("{{title}}", &html_escape(title))
}

fn html_escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

const DOCS_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{title}}</title>
    <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css">
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script>
        window.ui = SwaggerUIBundle({ url: "/openapi.json", dom_id: "#swagger-ui" });
    </script>
</body>
</html>"##;
