use std::sync::Arc;

use axum::{extract::Extension, routing::post, Json, Router};

use stockroom_auth::{LoginRequest, RefreshRequest};

use crate::app::{errors, services::AppServices};

pub fn router() -> Router {
    Router::new()
        .route("/login", post(login))
        .route("/refresh", post(refresh))
}

pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<LoginRequest>,
) -> axum::response::Response {
    errors::envelope_to_response(services.sessions.login(&body).await)
}

pub async fn refresh(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<RefreshRequest>,
) -> axum::response::Response {
    errors::envelope_to_response(services.sessions.refresh(&body).await)
}
