//! Axum-based HTTP server for the recipe API.
//!
//! This module wires the five recipe CRUD endpoints, the health check and the
//! CORS preflight onto a [`Router`](axum::Router) that the binary (or any
//! embedding application) can serve.
//!
//! # Components
//!
//! - `handlers`: One function per endpoint, each making a single store call.
//! - `extract`: Body and path extractors that reject with the API error shape.
//! - `middleware`: Cross-origin headers and request ID tracking.
//! - `routes`: The router configuration that ties everything together.
//!
//! Author: kelexine (<https://github.com/kelexine>)

mod extract;
mod handlers;
mod middleware;
mod routes;

pub use handlers::{HealthResponse, HealthStatus};
pub use middleware::{ALLOW_HEADERS, ALLOW_METHODS, ALLOW_ORIGIN};
pub use routes::{create_router, AppState};
