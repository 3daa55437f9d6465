use axum::{routing::get, Router};

pub mod auth;
pub mod items;
pub mod logs;
pub mod system;
pub mod users;
pub mod warehouses;

/// Router for all authenticated endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/api/whoami", get(system::whoami))
        .nest("/api/users", users::router())
        .nest("/api/warehouses", warehouses::router())
        .nest("/api/items", items::router())
        .nest("/api/logs", logs::router())
}
