use http::Request;
use http_body_util::BodyExt;
use serde_json::json;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use weft_core::http::Body;
use weft_core::prelude::*;
use weft_core::weft_openapi::Compat;

// ── Helpers ─────────────────────────────────────────────────────────────────

type CallLog = Arc<Mutex<Vec<String>>>;

struct Recording {
    name: &'static str,
    route: &'static str,
    log: CallLog,
}

impl Module for Recording {
    fn build(&self, router: Router) -> Router {
        self.log.lock().unwrap().push(format!("build:{}", self.name));
        let body = self.name;
        router.route(self.route, get(move || async move { body }))
    }

    fn build_swagger(&self, swagger: &mut DocumentBuilder) -> Result<(), DocumentError> {
        self.log.lock().unwrap().push(format!("swagger:{}", self.name));
        swagger.add_tag(self.name)?;
        swagger.api(ApiOperation::get(self.route).tags(self.name))
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

struct Broken;

impl Module for Broken {
    fn build(&self, router: Router) -> Router {
        router.route("/broken", get(|| async { "broken" }))
    }

    fn build_swagger(&self, swagger: &mut DocumentBuilder) -> Result<(), DocumentError> {
        swagger.api(ApiOperation::get("/broken").error(ErrorResponse::new(404, "Not found")))
    }
}

fn recording(name: &'static str, route: &'static str, log: &CallLog) -> Box<dyn Module> {
    Box::new(Recording {
        name,
        route,
        log: log.clone(),
    })
}

fn swagger() -> DocumentBuilder {
    DocumentBuilder::builder().add_config(DocumentConfig::new("Test API", "1.0.0"))
}

async fn get_body(router: Router, path: &str) -> (StatusCode, String) {
    let req = Request::builder().uri(path).body(Body::empty()).unwrap();
    let response = router.oneshot(req).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

// ── Registration ────────────────────────────────────────────────────────────

#[test]
fn modules_run_build_then_swagger_in_order() {
    let log = CallLog::default();
    let registry = ModuleRegistry::builder()
        .add_swagger_builder(swagger())
        .add_module(vec![
            recording("users", "/users", &log),
            recording("orders", "/orders", &log),
        ])
        .unwrap();

    assert_eq!(
        *log.lock().unwrap(),
        vec!["build:users", "swagger:users", "build:orders", "swagger:orders"]
    );
    assert_eq!(registry.module_names(), ["users", "orders"]);
}

#[test]
fn chained_add_module_calls_accumulate() {
    let log = CallLog::default();
    let registry = ModuleRegistry::builder()
        .add_swagger_builder(swagger())
        .add_module(vec![recording("users", "/users", &log)])
        .unwrap()
        .add_module(vec![recording("orders", "/orders", &log)])
        .unwrap();

    let doc = registry.swagger().unwrap().document().unwrap();
    assert_eq!(doc.tags, vec!["users", "orders"]);
    assert!(doc.operation("/users", "get").is_some());
    assert!(doc.operation("/orders", "get").is_some());
}

#[test]
fn missing_builder_fails_fast() {
    let log = CallLog::default();
    let result = ModuleRegistry::builder().add_module(vec![recording("users", "/users", &log)]);

    assert!(matches!(result, Err(RegistryError::BuilderNotConfigured)));
    assert!(log.lock().unwrap().is_empty());
}

#[test]
fn unconfigured_builder_surfaces_module_error() {
    let log = CallLog::default();
    let result = ModuleRegistry::builder()
        .add_swagger_builder(DocumentBuilder::builder())
        .add_module(vec![recording("users", "/users", &log)]);

    match result {
        Err(RegistryError::Module { module, source }) => {
            assert_eq!(module, "users");
            assert_eq!(source, DocumentError::NotConfigured);
        }
        _ => panic!("expected module error"),
    }
}

#[test]
fn rejected_documentation_aborts_registration() {
    let log = CallLog::default();
    let result = ModuleRegistry::builder()
        .add_swagger_builder(swagger())
        .add_module(vec![
            Box::new(Broken) as Box<dyn Module>,
            recording("users", "/users", &log),
        ]);

    let err = result.err().expect("registration should fail");
    assert!(err.to_string().contains("Error in swagger must contain status and description"));
    assert!(std::error::Error::source(&err).is_some());
    assert!(log.lock().unwrap().is_empty());
}

#[test]
fn strict_compat_accepts_described_errors() {
    let registry = ModuleRegistry::builder()
        .add_swagger_builder(DocumentBuilder::builder().add_config(
            DocumentConfig::new("Test API", "1.0.0").with_compat(Compat::Strict),
        ))
        .with_module(Broken)
        .unwrap();

    let (_, document) = registry.into_parts().unwrap();
    let spec = document.to_value().unwrap();
    assert_eq!(
        spec["paths"]["/broken"]["get"]["responses"]["404"],
        json!({ "description": "Not found" })
    );
}

#[test]
fn default_module_name_is_type_name() {
    assert!(Module::<()>::name(&Broken).ends_with("Broken"));
}

#[test]
fn into_parts_without_builder_fails() {
    let registry: ModuleRegistry = ModuleRegistry::builder();
    assert!(matches!(
        registry.into_parts(),
        Err(RegistryError::BuilderNotConfigured)
    ));
}

// ── Router ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn resolved_router_serves_every_module() {
    let log = CallLog::default();
    let registry = ModuleRegistry::builder()
        .add_swagger_builder(swagger())
        .add_module(vec![
            recording("users", "/users", &log),
            recording("orders", "/orders", &log),
        ])
        .unwrap();

    let (status, body) = get_body(registry.resolve(), "/users").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "users");

    let (status, body) = get_body(registry.resolve(), "/orders").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "orders");

    let (status, _) = get_body(registry.resolve(), "/missing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn into_parts_returns_router_and_document() {
    let log = CallLog::default();
    let (router, document) = ModuleRegistry::builder()
        .add_swagger_builder(swagger())
        .with_module(Recording {
            name: "health",
            route: "/health",
            log: log.clone(),
        })
        .unwrap()
        .into_parts()
        .unwrap();

    assert_eq!(document.tags, vec!["health"]);
    let (status, body) = get_body(router, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "health");
}
