use tracing::{debug, info};
use weft_openapi::{Document, DocumentBuilder};

use crate::error::RegistryError;
use crate::http::Router;
use crate::module::Module;

/// Owns the shared router and document builder that route modules
/// register themselves against.
///
/// ```ignore
/// let swagger = DocumentBuilder::builder().add_config(DocumentConfig::new("API", "1.0.0"));
///
/// let (router, document) = ModuleRegistry::builder()
///     .add_swagger_builder(swagger)
///     .add_module(vec![Box::new(HealthModule) as Box<dyn Module>, Box::new(UserModule::new())])?
///     .into_parts()?;
/// ```
pub struct ModuleRegistry<S = ()>
where
    S: Clone + Send + Sync + 'static,
{
    router: Router<S>,
    swagger: Option<DocumentBuilder>,
    modules: Vec<&'static str>,
}

impl<S> ModuleRegistry<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// Create a registry with an empty router and no document builder.
    pub fn builder() -> Self {
        Self {
            router: Router::new(),
            swagger: None,
            modules: Vec::new(),
        }
    }

    /// Attach the document builder used by subsequent `add_module` calls.
    pub fn add_swagger_builder(mut self, swagger: DocumentBuilder) -> Self {
        self.swagger = Some(swagger);
        self
    }

    /// Register each module, in order: first its handlers on the shared
    /// router, then its documentation on the document builder.
    ///
    /// Fails with [`RegistryError::BuilderNotConfigured`] before touching the
    /// router when no builder is attached, and stops at the first module whose
    /// documentation is rejected.
    pub fn add_module<I>(mut self, modules: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = Box<dyn Module<S>>>,
    {
        let Some(swagger) = self.swagger.as_mut() else {
            return Err(RegistryError::BuilderNotConfigured);
        };

        for module in modules {
            let name = module.name();
            debug!(module = name, "Registering module");

            self.router = module.build(self.router);
            module
                .build_swagger(swagger)
                .map_err(|source| RegistryError::Module { module: name, source })?;

            self.modules.push(name);
        }

        info!(modules = self.modules.len(), "Modules registered");
        Ok(self)
    }

    /// Register a single module.
    pub fn with_module<M: Module<S> + 'static>(self, module: M) -> Result<Self, RegistryError> {
        self.add_module([Box::new(module) as Box<dyn Module<S>>])
    }

    /// The shared router with every registered module's handlers.
    pub fn resolve(&self) -> Router<S> {
        self.router.clone()
    }

    /// The attached document builder, if any.
    pub fn swagger(&self) -> Option<&DocumentBuilder> {
        self.swagger.as_ref()
    }

    /// Names of the registered modules, in registration order.
    pub fn module_names(&self) -> &[&'static str] {
        &self.modules
    }

    /// Consume the registry and return the router and the finished document.
    pub fn into_parts(self) -> Result<(Router<S>, Document), RegistryError> {
        let swagger = self.swagger.ok_or(RegistryError::BuilderNotConfigured)?;
        Ok((self.router, swagger.into_document()?))
    }
}

impl<S> Default for ModuleRegistry<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::builder()
    }
}
