//! Route modules and the registry that assembles them.
//!
//! Each feature ships a [`Module`] that registers its handlers on a shared
//! [`Router`](http::Router) and contributes its documentation to a
//! [`DocumentBuilder`](weft_openapi::DocumentBuilder). The
//! [`ModuleRegistry`] drives both in registration order at startup.

pub mod config;
pub mod error;
pub mod http;
pub mod layers;
pub mod module;
pub mod prelude;
pub mod registry;

pub use config::{AppConfig, ConfigError, ConfigSection, ConfigValue, FromConfigValue};
pub use error::RegistryError;
pub use layers::{default_trace, init_tracing};
pub use module::Module;
pub use registry::ModuleRegistry;

pub use weft_openapi;
