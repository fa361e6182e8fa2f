//! Re-exports of the HTTP types route modules are written against.

pub use axum::body::Body;
pub use axum::extract::{Path, Query, State};
pub use axum::http::{HeaderMap, Method, StatusCode};
pub use axum::response::{Html, IntoResponse, Response};
pub use axum::{serve, Extension, Json, Router};

pub mod routing {
    pub use axum::routing::{delete, get, patch, post, put, MethodRouter};
}
