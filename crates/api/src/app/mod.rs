//! HTTP API application wiring (Axum router + service wiring).
//!
//! Folder layout:
//! - `services.rs`: store/directory wiring and runtime configuration
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: query DTOs
//! - `errors.rs`: envelope-to-response mapping

use std::sync::Arc;

use axum::{routing::get, Extension, Router};

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router around prewired services (public entrypoint
/// used by `main.rs` and the black-box tests).
pub fn build_app(services: Arc<services::AppServices>) -> Router {
    let auth_state = middleware::AuthState {
        signer: services.signer.clone(),
    };

    // Protected routes: require a valid bearer token.
    let protected = routes::router()
        .layer(Extension(services.clone()))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::auth_middleware,
        ));

    Router::new()
        .route("/health", get(routes::system::health))
        .nest("/api/auth", routes::auth::router().layer(Extension(services)))
        .merge(protected)
}
