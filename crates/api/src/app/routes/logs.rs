use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, routing::get, Router};

use stockroom_core::Status;

use crate::app::{errors, services::AppServices};
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new().route("/", get(get_logs))
}

/// Admin-only dump of the current log file. Plain text, not enveloped.
pub async fn get_logs(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> axum::response::Response {
    if !principal.is_admin() {
        return errors::reject(Status::Unauthorized, "Admin role required.");
    }

    match tokio::fs::read_to_string(&services.log_path).await {
        Ok(contents) => (StatusCode::OK, contents).into_response(),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!("log file not found on get request");
            (StatusCode::NOT_FOUND, "Log file not found.").into_response()
        }
        Err(err) => {
            tracing::error!(error = %err, path = %services.log_path, "error retrieving logs");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An error occurred while retrieving the logs.",
            )
                .into_response()
        }
    }
}
