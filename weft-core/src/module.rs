use crate::http::Router;
use weft_openapi::{DocumentBuilder, DocumentError};

/// A self-contained feature unit: its HTTP handlers plus their documentation.
///
/// [`ModuleRegistry`](crate::ModuleRegistry) calls [`build`](Module::build)
/// and then [`build_swagger`](Module::build_swagger) exactly once per module
/// during startup, in registration order.
///
/// # Example
///
/// ```ignore
/// use weft_core::prelude::*;
///
/// pub struct Health;
///
/// impl Module for Health {
///     fn build(&self, router: Router) -> Router {
///         router.route("/health", get(|| async { "OK" }))
///     }
///
///     fn build_swagger(&self, swagger: &mut DocumentBuilder) -> Result<(), DocumentError> {
///         swagger.add_tag("health")?;
///         swagger.api(ApiOperation::get("/health").tags("health"))
///     }
/// }
/// ```
pub trait Module<S = ()>: Send
where
    S: Clone + Send + Sync + 'static,
{
    /// Register this module's handlers on the shared router.
    fn build(&self, router: Router<S>) -> Router<S>;

    /// Contribute this module's tags, models, and operations to the document.
    fn build_swagger(&self, swagger: &mut DocumentBuilder) -> Result<(), DocumentError>;

    /// The name of this module (for diagnostics).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
