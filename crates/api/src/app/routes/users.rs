use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    routing::{get, post},
    Json, Router,
};

use stockroom_auth::{ChangePasswordRequest, CreateUserRequest, UpdateUserRequest};
use stockroom_core::{AccountId, Status};

use crate::app::{errors, services::AppServices};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
        .route("/:id/changepassword", post(change_password))
}

fn parse_id(id: &str) -> Result<AccountId, axum::response::Response> {
    id.parse()
        .map_err(|_| errors::reject(Status::BadRequest, "Invalid user id."))
}

pub async fn list_users(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    errors::envelope_to_response(services.users.list().await)
}

pub async fn get_user(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    errors::envelope_to_response(services.users.get(id).await)
}

pub async fn create_user(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<CreateUserRequest>,
) -> axum::response::Response {
    errors::envelope_to_response(services.users.create(body).await)
}

pub async fn update_user(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<UpdateUserRequest>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    errors::envelope_to_response(services.users.update(id, body).await)
}

pub async fn delete_user(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    errors::envelope_to_response(services.users.delete(id).await)
}

pub async fn change_password(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<ChangePasswordRequest>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    errors::envelope_to_response(services.users.change_password(id, body).await)
}
