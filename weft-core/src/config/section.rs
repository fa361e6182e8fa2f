use weft_openapi::{Compat, DocumentConfig, Server};

use super::value::{ConfigValue, FromConfigValue};
use super::{AppConfig, ConfigError};

/// A typed configuration section built from keys under a prefix.
pub trait ConfigSection: Sized {
    fn from_config(config: &AppConfig, prefix: &str) -> Result<Self, ConfigError>;
}

/// Builds the document settings from:
///
/// ```yaml
/// openapi:
///   spec: "3.0.3"
///   info:
///     title: "Users API"        # required
///     version: "1.0.0"          # required
///     description: "..."
///   servers:
///     - "http://localhost:3000"
///     - url: "https://api.example.com"
///       description: "production"
///   auth: true
///   basepath: "/api"
///   compat: legacy              # or strict
///   docs: true
/// ```
impl ConfigSection for DocumentConfig {
    fn from_config(config: &AppConfig, prefix: &str) -> Result<Self, ConfigError> {
        let key = |name: &str| format!("{prefix}.{name}");

        let title: String = config.get(&key("info.title"))?;
        let version: String = config.get(&key("info.version"))?;
        let mut doc = DocumentConfig::new(&title, &version)
            .with_auth(config.get_opt(&key("auth"))?.unwrap_or(false))
            .with_docs_ui(config.get_opt(&key("docs"))?.unwrap_or(false));

        if let Some(spec) = config.get_opt::<String>(&key("spec"))? {
            doc = doc.with_openapi(&spec);
        }
        if let Some(desc) = config.get_opt::<String>(&key("info.description"))? {
            doc = doc.with_description(&desc);
        }
        if let Some(base_path) = config.get_opt::<String>(&key("basepath"))? {
            doc = doc.with_base_path(&base_path);
        }
        if let Some(compat) = config.get_opt::<String>(&key("compat"))? {
            let compat: Compat = compat.parse().map_err(|_| ConfigError::TypeMismatch {
                key: key("compat"),
                expected: "legacy | strict",
            })?;
            doc = doc.with_compat(compat);
        }
        for server in config.get_opt::<Vec<ServerEntry>>(&key("servers"))?.unwrap_or_default() {
            doc = doc.with_server(server.0);
        }

        Ok(doc)
    }
}

/// A server entry: either a bare URL or a `{url, description}` map.
struct ServerEntry(Server);

impl FromConfigValue for ServerEntry {
    fn from_config_value(value: &ConfigValue, key: &str) -> Result<Self, ConfigError> {
        match value {
            ConfigValue::String(url) => Ok(ServerEntry(Server::new(url.clone()))),
            ConfigValue::Map(map) => {
                let url = map
                    .get("url")
                    .ok_or_else(|| ConfigError::NotFound(format!("{key}.url")))?;
                let mut server = Server::new(String::from_config_value(url, &format!("{key}.url"))?);
                if let Some(desc) = map.get("description") {
                    server.description =
                        Option::<String>::from_config_value(desc, &format!("{key}.description"))?;
                }
                Ok(ServerEntry(server))
            }
            _ => Err(ConfigError::TypeMismatch {
                key: key.to_string(),
                expected: "server url or {url, description}",
            }),
        }
    }
}
