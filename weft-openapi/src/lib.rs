//! Incremental OpenAPI document assembly.
//!
//! A [`DocumentBuilder`] is configured once with [`DocumentConfig`], then
//! route modules feed it tags, models, and operations during startup. The
//! finished [`Document`] is read-only and can be served with
//! [`openapi_routes`].

mod builder;
mod config;
mod document;
mod error;
mod handlers;
pub mod refs;

pub use builder::{ApiOperation, DocumentBuilder, Tags};
pub use config::{Compat, DocumentConfig};
pub use document::{
    schema_ref, Components, Document, ErrorResponse, Info, MediaType, Operation, ParamLocation,
    Parameter, RequestBody, Response, SecurityRequirement, SecurityScheme, Server, BEARER_AUTH,
    JSON_MEDIA_TYPE, SCHEMA_REF_PREFIX,
};
pub use error::DocumentError;
pub use handlers::openapi_routes;
