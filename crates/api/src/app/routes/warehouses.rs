use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    routing::get,
    Json, Router,
};

use stockroom_core::{Status, WarehouseId};
use stockroom_inventory::{CreateWarehouseRequest, UpdateWarehouseRequest};

use crate::app::{dto::ListQuery, errors, services::AppServices};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_warehouses).post(create_warehouse))
        .route(
            "/:id",
            get(get_warehouse).put(update_warehouse).delete(delete_warehouse),
        )
}

fn parse_id(id: &str) -> Result<WarehouseId, axum::response::Response> {
    id.parse()
        .map_err(|_| errors::reject(Status::BadRequest, "Invalid warehouse id."))
}

pub async fn list_warehouses(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<ListQuery>,
) -> axum::response::Response {
    let envelope = services
        .warehouses
        .list(&query.page(), query.filter())
        .await;
    errors::envelope_to_response(envelope)
}

pub async fn get_warehouse(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    errors::envelope_to_response(services.warehouses.get(id).await)
}

pub async fn create_warehouse(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<CreateWarehouseRequest>,
) -> axum::response::Response {
    errors::envelope_to_response(services.warehouses.create(body).await)
}

pub async fn update_warehouse(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<UpdateWarehouseRequest>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    errors::envelope_to_response(services.warehouses.update(id, body).await)
}

pub async fn delete_warehouse(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    errors::envelope_to_response(services.warehouses.delete(id).await)
}
