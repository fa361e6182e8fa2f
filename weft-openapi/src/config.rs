use crate::document::{Info, SecurityScheme, Server};

/// How faithfully to reproduce the historical document quirks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Compat {
    /// Error entries are rejected when the status code is missing or a
    /// description is present, and a `200` response without a model carries
    /// `content: ""`.
    #[default]
    Legacy,
    /// Error entries need both a status code and a description, and a `200`
    /// response without a model has no `content`.
    Strict,
}

impl std::str::FromStr for Compat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "legacy" => Ok(Compat::Legacy),
            "strict" => Ok(Compat::Strict),
            other => Err(format!("unknown compat mode '{other}' (expected legacy or strict)")),
        }
    }
}

/// Top-level document settings passed to
/// [`DocumentBuilder::add_config`](crate::DocumentBuilder::add_config).
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentConfig {
    pub openapi: String,
    pub info: Info,
    pub servers: Vec<Server>,
    pub auth: bool,
    pub base_path: Option<String>,
    pub compat: Compat,
    pub docs_ui: bool,
    pub bearer_scheme: SecurityScheme,
}

fn default_openapi_version() -> String {
    "3.0.3".to_string()
}

impl DocumentConfig {
    pub fn new(title: &str, version: &str) -> Self {
        Self {
            openapi: default_openapi_version(),
            info: Info {
                title: title.to_string(),
                version: version.to_string(),
                description: None,
            },
            servers: Vec::new(),
            auth: false,
            base_path: None,
            compat: Compat::default(),
            docs_ui: false,
            bearer_scheme: SecurityScheme::bearer_jwt(),
        }
    }

    pub fn with_openapi(mut self, version: &str) -> Self {
        self.openapi = version.to_string();
        self
    }

    pub fn with_description(mut self, desc: &str) -> Self {
        self.info.description = Some(desc.to_string());
        self
    }

    pub fn with_server(mut self, server: Server) -> Self {
        self.servers.push(server);
        self
    }

    pub fn with_auth(mut self, enabled: bool) -> Self {
        self.auth = enabled;
        self
    }

    pub fn with_base_path(mut self, base_path: &str) -> Self {
        self.base_path = Some(base_path.to_string());
        self
    }

    pub fn with_compat(mut self, compat: Compat) -> Self {
        self.compat = compat;
        self
    }

    pub fn with_docs_ui(mut self, enabled: bool) -> Self {
        self.docs_ui = enabled;
        self
    }

    /// Replace the scheme published under `securitySchemes.bearerAuth`.
    pub fn with_bearer_scheme(mut self, scheme: SecurityScheme) -> Self {
        self.bearer_scheme = scheme;
        self
    }
}
