//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: store + inventory service wiring
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request/response DTOs, input validation and mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Base path of the beer inventory API.
pub const BEERS_PATH: &str = "/api/v1/beers";

/// Build the full HTTP router (public entrypoint used by `main.rs` and tests).
pub fn build_app(services: services::AppServices) -> Router {
    let services = Arc::new(services);

    Router::new()
        .route("/health", get(routes::system::health))
        .nest(BEERS_PATH, routes::beers::router())
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(middleware::trace_requests))
                .layer(Extension(services)),
        )
}
