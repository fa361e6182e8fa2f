use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::error::DocumentError;

/// Name under which the bearer scheme is registered in `components.securitySchemes`.
pub const BEARER_AUTH: &str = "bearerAuth";

/// Prefix every qualified schema reference points into.
pub const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// The only media type operations produce.
pub const JSON_MEDIA_TYPE: &str = "application/json";

/// Build a fully-qualified `$ref` string for a component schema.
pub fn schema_ref(name: &str) -> String {
    format!("{SCHEMA_REF_PREFIX}{name}")
}

/// The assembled OpenAPI document.
///
/// Built incrementally by [`DocumentBuilder`](crate::DocumentBuilder) during
/// route registration and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub openapi: String,
    pub info: Info,
    pub servers: Vec<Server>,
    #[serde(rename = "basePath", skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,
    pub auth: bool,
    pub components: Components,
    pub tags: Vec<String>,
    pub paths: BTreeMap<String, BTreeMap<String, Operation>>,
}

impl Document {
    /// Look up the operation registered for `(route, method)`.
    pub fn operation(&self, route: &str, method: &str) -> Option<&Operation> {
        self.paths.get(route).and_then(|methods| methods.get(method))
    }

    /// Serialize into a generic JSON value.
    pub fn to_value(&self) -> Result<Value, DocumentError> {
        Ok(serde_json::to_value(self)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Info {
    pub title: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Server {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Server {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            description: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Components {
    pub schemas: Map<String, Value>,
    #[serde(rename = "securitySchemes", skip_serializing_if = "Option::is_none")]
    pub security_schemes: Option<BTreeMap<String, SecurityScheme>>,
}

/// An HTTP security scheme declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SecurityScheme {
    #[serde(rename = "type")]
    pub kind: String,
    pub scheme: String,
    #[serde(rename = "bearerFormat", skip_serializing_if = "Option::is_none")]
    pub bearer_format: Option<String>,
}

impl SecurityScheme {
    /// `Authorization: Bearer <JWT>` over plain HTTP auth.
    pub fn bearer_jwt() -> Self {
        Self {
            kind: "http".into(),
            scheme: "bearer".into(),
            bearer_format: Some("JWT".into()),
        }
    }
}

impl Default for SecurityScheme {
    fn default() -> Self {
        Self::bearer_jwt()
    }
}

/// One security requirement: scheme name to required scopes.
pub type SecurityRequirement = BTreeMap<String, Vec<String>>;

/// Descriptor stored at `paths[route][method]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Operation {
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub security: Vec<SecurityRequirement>,
    pub produces: Vec<String>,
    pub consumes: Vec<String>,
    pub parameters: Vec<Parameter>,
    #[serde(rename = "requestBody")]
    pub request_body: RequestBody,
    pub responses: BTreeMap<String, Response>,
}

/// Where a parameter is located in the HTTP request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamLocation {
    Path,
    Query,
    Header,
    Cookie,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: ParamLocation,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub schema: Value,
}

impl Parameter {
    /// A required path parameter of the given JSON type.
    pub fn path(name: impl Into<String>, param_type: &str) -> Self {
        Self::new(name, ParamLocation::Path, param_type).required(true)
    }

    /// An optional query parameter of the given JSON type.
    pub fn query(name: impl Into<String>, param_type: &str) -> Self {
        Self::new(name, ParamLocation::Query, param_type)
    }

    /// An optional header parameter of the given JSON type.
    pub fn header(name: impl Into<String>, param_type: &str) -> Self {
        Self::new(name, ParamLocation::Header, param_type)
    }

    pub fn new(name: impl Into<String>, location: ParamLocation, param_type: &str) -> Self {
        Self {
            name: name.into(),
            location,
            required: location == ParamLocation::Path,
            description: None,
            schema: serde_json::json!({ "type": param_type }),
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Request body of an operation.
///
/// An operation without a body serializes this as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RequestBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<BTreeMap<String, MediaType>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
}

impl RequestBody {
    /// A required JSON body pointing at `#/components/schemas/<model>`.
    pub fn json_ref(model: &str) -> Self {
        let media = MediaType {
            schema: serde_json::json!({ "$ref": schema_ref(model) }),
        };
        Self {
            content: Some(BTreeMap::from([(JSON_MEDIA_TYPE.to_string(), media)])),
            required: Some(true),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_none() && self.required.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaType {
    pub schema: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Value>,
}

/// A caller-declared error response for [`ApiOperation`](crate::ApiOperation).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ErrorResponse {
    #[serde(rename = "statusCode", skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ErrorResponse {
    pub fn new(status_code: u16, description: impl Into<String>) -> Self {
        Self {
            status_code: Some(status_code),
            description: Some(description.into()),
        }
    }

    /// An entry carrying only a status code.
    pub fn status(status_code: u16) -> Self {
        Self {
            status_code: Some(status_code),
            description: None,
        }
    }

    /// Status code, treating `0` the same as a missing one.
    pub(crate) fn code(&self) -> Option<u16> {
        self.status_code.filter(|code| *code != 0)
    }

    /// Description, treating `""` the same as a missing one.
    pub(crate) fn text(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.is_empty())
    }
}
