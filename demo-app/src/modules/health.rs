use weft::prelude::*;

/// Liveness probe at `GET /health`.
pub struct HealthModule;

impl Module for HealthModule {
    fn build(&self, router: Router) -> Router {
        router.route("/health", get(|| async { "OK" }))
    }

    fn build_swagger(&self, swagger: &mut DocumentBuilder) -> Result<(), DocumentError> {
        swagger.add_tag("health")?;
        swagger.api(
            ApiOperation::get("/health")
                .tags("health")
                .description("Liveness probe")
                .model(serde_json::json!({ "type": "string" })),
        )
    }

    fn name(&self) -> &'static str {
        "health"
    }
}
