use weft_openapi::DocumentError;

/// Errors raised while registering route modules.
///
/// All of them are startup errors: the application should refuse to start
/// rather than serve with an incomplete router or document.
#[derive(Debug)]
pub enum RegistryError {
    /// `add_module` ran before `add_swagger_builder`.
    BuilderNotConfigured,

    /// A module's documentation contribution was rejected.
    Module {
        module: &'static str,
        source: DocumentError,
    },

    /// The finished document could not be produced.
    Document(DocumentError),
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryError::BuilderNotConfigured => {
                write!(f, "Swagger builder not configured: call add_swagger_builder before add_module")
            }
            RegistryError::Module { module, source } => {
                write!(f, "Module '{module}' failed to build its documentation: {source}")
            }
            RegistryError::Document(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for RegistryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RegistryError::BuilderNotConfigured => None,
            RegistryError::Module { source, .. } => Some(source),
            RegistryError::Document(err) => Some(err),
        }
    }
}

impl From<DocumentError> for RegistryError {
    fn from(err: DocumentError) -> Self {
        RegistryError::Document(err)
    }
}
