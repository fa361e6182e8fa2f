//! Everything a route module usually needs.

pub use crate::http::routing::{delete, get, patch, post, put};
pub use crate::http::{IntoResponse, Json, Path, Query, Router, State, StatusCode};
pub use crate::{Module, ModuleRegistry, RegistryError};
pub use weft_openapi::{
    ApiOperation, DocumentBuilder, DocumentConfig, DocumentError, ErrorResponse, Parameter,
};
