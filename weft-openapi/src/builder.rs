use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::config::{Compat, DocumentConfig};
use crate::document::{
    Components, Document, ErrorResponse, Operation, Parameter, RequestBody, Response,
    SecurityRequirement, BEARER_AUTH, JSON_MEDIA_TYPE,
};
use crate::error::DocumentError;
use crate::refs::{qualify_refs, split_root_schema};

const SUCCESS_DESCRIPTION: &str = "Successful operation";

/// Tag list of an operation.
///
/// A single name becomes a one-element list; a list is kept as given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tags(Vec<String>);

impl Tags {
    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl From<&str> for Tags {
    fn from(tag: &str) -> Self {
        Tags(vec![tag.to_string()])
    }
}

impl From<String> for Tags {
    fn from(tag: String) -> Self {
        Tags(vec![tag])
    }
}

impl From<Vec<String>> for Tags {
    fn from(tags: Vec<String>) -> Self {
        Tags(tags)
    }
}

impl From<Vec<&str>> for Tags {
    fn from(tags: Vec<&str>) -> Self {
        Tags(tags.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Tags {
    fn from(tags: [&str; N]) -> Self {
        Tags(tags.iter().map(|t| t.to_string()).collect())
    }
}

/// Route metadata passed to [`DocumentBuilder::api`].
#[derive(Debug, Clone)]
pub struct ApiOperation {
    pub route: String,
    pub method: String,
    pub tags: Tags,
    pub description: Option<String>,
    pub security: bool,
    pub model: Option<Value>,
    pub body: Option<String>,
    pub params: Vec<Parameter>,
    pub consumes: Vec<String>,
    pub errors: Vec<ErrorResponse>,
}

impl ApiOperation {
    /// Start describing `method` on `route`. The method is stored lower-case.
    pub fn new(method: &str, route: &str) -> Self {
        Self {
            route: route.to_string(),
            method: method.to_lowercase(),
            tags: Tags::default(),
            description: None,
            security: false,
            model: None,
            body: None,
            params: Vec::new(),
            consumes: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn get(route: &str) -> Self {
        Self::new("get", route)
    }

    pub fn post(route: &str) -> Self {
        Self::new("post", route)
    }

    pub fn put(route: &str) -> Self {
        Self::new("put", route)
    }

    pub fn patch(route: &str) -> Self {
        Self::new("patch", route)
    }

    pub fn delete(route: &str) -> Self {
        Self::new("delete", route)
    }

    pub fn tags(mut self, tags: impl Into<Tags>) -> Self {
        self.tags = tags.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Require the bearer scheme on this operation.
    pub fn security(mut self, enabled: bool) -> Self {
        self.security = enabled;
        self
    }

    /// Success response schema.
    ///
    /// A plain string is shorthand for `{"$ref": name}`. Every `$ref` inside
    /// the value is qualified against `#/components/schemas/`.
    pub fn model(mut self, model: impl Into<Value>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Name of the component schema used as the JSON request body.
    pub fn body(mut self, model: &str) -> Self {
        self.body = Some(model.to_string());
        self
    }

    pub fn param(mut self, param: Parameter) -> Self {
        self.params.push(param);
        self
    }

    pub fn consumes(mut self, media_type: &str) -> Self {
        self.consumes.push(media_type.to_string());
        self
    }

    pub fn error(mut self, error: ErrorResponse) -> Self {
        self.errors.push(error);
        self
    }
}

/// Accumulates an OpenAPI document across repeated, order-dependent calls.
///
/// `add_config` must run first; every other mutator fails with
/// [`DocumentError::NotConfigured`] until it has.
///
/// ```
/// use weft_openapi::{ApiOperation, DocumentBuilder, DocumentConfig};
/// use serde_json::json;
///
/// let mut swagger = DocumentBuilder::builder()
///     .add_config(DocumentConfig::new("Pets", "1.0.0").with_auth(true));
/// swagger.add_tag("pets").unwrap();
/// swagger
///     .add_model("Pet", json!({ "name": { "type": "string" } }).as_object().unwrap().clone(), false)
///     .unwrap();
/// swagger
///     .api(ApiOperation::get("/pets").tags("pets").security(true).model("Pet"))
///     .unwrap();
///
/// let doc = swagger.document().unwrap();
/// assert_eq!(doc.tags, vec!["pets"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DocumentBuilder {
    instance: Option<Document>,
    compat: Compat,
    docs_ui: bool,
}

impl DocumentBuilder {
    pub fn builder() -> Self {
        Self::default()
    }

    /// Initialise the top-level fields and reset schemas, tags and paths.
    ///
    /// With `auth` set, `components.securitySchemes.bearerAuth` is published.
    pub fn add_config(mut self, config: DocumentConfig) -> Self {
        let security_schemes = config
            .auth
            .then(|| BTreeMap::from([(BEARER_AUTH.to_string(), config.bearer_scheme)]));

        debug!(
            title = %config.info.title,
            openapi = %config.openapi,
            auth = config.auth,
            "Document configured"
        );

        self.compat = config.compat;
        self.docs_ui = config.docs_ui;
        self.instance = Some(Document {
            openapi: config.openapi,
            info: config.info,
            servers: config.servers,
            base_path: config.base_path,
            auth: config.auth,
            components: Components {
                schemas: Map::new(),
                security_schemes,
            },
            tags: Vec::new(),
            paths: BTreeMap::new(),
        });
        self
    }

    /// Whether `add_config` has run.
    pub fn is_configured(&self) -> bool {
        self.instance.is_some()
    }

    /// Whether the configuration asked for the documentation UI.
    pub fn docs_ui(&self) -> bool {
        self.docs_ui
    }

    /// Append `name` to the tag list unless it is already present.
    pub fn add_tag(&mut self, name: &str) -> Result<(), DocumentError> {
        let doc = self.instance_mut()?;
        if !doc.tags.iter().any(|tag| tag == name) {
            doc.tags.push(name.to_string());
        }
        Ok(())
    }

    /// Register the operation at `paths[route][method]`, replacing any
    /// previous one for the same pair.
    ///
    /// All error entries are checked before the document is touched, so a
    /// rejected call leaves it unchanged.
    pub fn api(&mut self, options: ApiOperation) -> Result<(), DocumentError> {
        let compat = self.compat;
        let doc = self.instance_mut()?;

        let ApiOperation {
            route,
            method,
            tags,
            description,
            security,
            model,
            body,
            params,
            consumes,
            errors,
        } = options;

        let error_responses = to_error_responses(&errors, compat, &route, &method)?;

        let mut responses = BTreeMap::new();
        responses.insert("200".to_string(), to_response_success(model, compat));
        responses.extend(error_responses);

        let security = if security {
            vec![SecurityRequirement::from([(BEARER_AUTH.to_string(), Vec::new())])]
        } else {
            Vec::new()
        };

        let operation = Operation {
            tags: tags.into_vec(),
            description,
            security,
            produces: vec![JSON_MEDIA_TYPE.to_string()],
            consumes,
            parameters: params,
            request_body: body
                .map(|model| RequestBody::json_ref(&model))
                .unwrap_or_default(),
            responses,
        };

        let methods = doc.paths.entry(route.clone()).or_default();
        if methods.insert(method.clone(), operation).is_some() {
            warn!(%route, %method, "Operation registered twice, keeping the latest");
        } else {
            debug!(%route, %method, "Operation registered");
        }
        Ok(())
    }

    /// Register `components.schemas[name]` as an object (or array of objects)
    /// with the given properties, replacing any schema of the same name.
    pub fn add_model(
        &mut self,
        name: &str,
        properties: Map<String, Value>,
        is_array: bool,
    ) -> Result<(), DocumentError> {
        let doc = self.instance_mut()?;
        let object = json!({ "type": "object", "properties": properties });
        let schema = if is_array {
            json!({ "type": "array", "items": object })
        } else {
            object
        };

        doc.components.schemas.insert(name.to_string(), schema);
        debug!(schema = name, is_array, "Model registered");
        Ok(())
    }

    /// Register a model whose properties come from `T`'s JSON Schema.
    ///
    /// The schema is named after `T` (its schemars name). Nested types that
    /// schemars emits under `$defs` are registered as components of their
    /// own unless a schema with that name already exists.
    pub fn add_model_for<T: schemars::JsonSchema>(
        &mut self,
        is_array: bool,
    ) -> Result<(), DocumentError> {
        if !self.is_configured() {
            return Err(DocumentError::NotConfigured);
        }

        let name = T::schema_name().into_owned();
        let root = serde_json::to_value(schemars::schema_for!(T))?;
        let (properties, definitions) = split_root_schema(&name, root);

        self.add_model(&name, properties, is_array)?;

        let doc = self.instance_mut()?;
        for (def_name, def_schema) in definitions {
            doc.components.schemas.entry(def_name).or_insert(def_schema);
        }
        Ok(())
    }

    /// The document built so far.
    pub fn document(&self) -> Result<&Document, DocumentError> {
        self.instance.as_ref().ok_or(DocumentError::NotConfigured)
    }

    /// Consume the builder and return the finished document.
    pub fn into_document(self) -> Result<Document, DocumentError> {
        self.instance.ok_or(DocumentError::NotConfigured)
    }

    /// Pretty-printed JSON of the document built so far.
    pub fn to_json_pretty(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self.document()?)?)
    }

    fn instance_mut(&mut self) -> Result<&mut Document, DocumentError> {
        self.instance.as_mut().ok_or(DocumentError::NotConfigured)
    }
}

fn to_response_success(model: Option<Value>, compat: Compat) -> Response {
    let content = match model.filter(|model| !model.is_null()) {
        Some(model) => {
            let mut schema = match model {
                Value::String(name) => json!({ "$ref": name }),
                other => other,
            };
            qualify_refs(&mut schema);
            Some(json!({ JSON_MEDIA_TYPE: { "schema": schema } }))
        }
        None => match compat {
            Compat::Legacy => Some(Value::String(String::new())),
            Compat::Strict => None,
        },
    };

    Response {
        description: SUCCESS_DESCRIPTION.to_string(),
        content,
    }
}

fn to_error_responses(
    errors: &[ErrorResponse],
    compat: Compat,
    route: &str,
    method: &str,
) -> Result<Vec<(String, Response)>, DocumentError> {
    errors
        .iter()
        .enumerate()
        .map(|(index, error)| {
            let rejected = match compat {
                Compat::Legacy => error.code().is_none() || error.text().is_some(),
                Compat::Strict => error.code().is_none() || error.text().is_none(),
            };
            match error.code() {
                Some(code) if !rejected => Ok((
                    code.to_string(),
                    Response {
                        description: error.description.clone().unwrap_or_default(),
                        content: None,
                    },
                )),
                _ => Err(DocumentError::InvalidErrorResponse {
                    route: route.to_string(),
                    method: method.to_string(),
                    index,
                }),
            }
        })
        .collect()
}
