use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    routing::get,
    Json, Router,
};

use stockroom_core::{Status, WarehouseItemId};
use stockroom_inventory::{CreateItemRequest, UpdateItemRequest};

use crate::app::{dto::ListQuery, errors, services::AppServices};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_items).post(create_item))
        .route("/topitems", get(top_items))
        .route("/:id", get(get_item).put(update_item).delete(delete_item))
}

fn parse_id(id: &str) -> Result<WarehouseItemId, axum::response::Response> {
    id.parse()
        .map_err(|_| errors::reject(Status::BadRequest, "Invalid item id."))
}

pub async fn list_items(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<ListQuery>,
) -> axum::response::Response {
    let envelope = services.items.list(&query.page(), query.filter()).await;
    errors::envelope_to_response(envelope)
}

pub async fn get_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    errors::envelope_to_response(services.items.get(id).await)
}

pub async fn create_item(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<CreateItemRequest>,
) -> axum::response::Response {
    errors::envelope_to_response(services.items.create(body).await)
}

pub async fn update_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<UpdateItemRequest>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    errors::envelope_to_response(services.items.update(id, body).await)
}

pub async fn delete_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    errors::envelope_to_response(services.items.delete(id).await)
}

pub async fn top_items(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    errors::envelope_to_response(services.items.top_items().await)
}
