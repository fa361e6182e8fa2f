//! Weft: route modules over Axum with an incrementally built OpenAPI document.
//!
//! This facade crate re-exports the Weft sub-crates through a single
//! dependency. Import everything you need with:
//!
//! ```ignore
//! use weft::prelude::*;
//! ```

pub extern crate weft_core;

// Re-export everything from weft-core at the top level for convenience.
pub use weft_core::*;

pub use weft_openapi;

/// Unified prelude: import everything with `use weft::prelude::*`.
pub mod prelude {
    pub use weft_core::prelude::*;

    pub use weft_core::{default_trace, init_tracing, AppConfig};

    pub use weft_openapi::{openapi_routes, Compat, Document, ParamLocation, Server};
}
