use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use service::errors::ServiceError;
use tracing::{error, info, warn};

use crate::dto::{CreateItemRequest, ItemResponse};
use crate::errors::ApiError;
use crate::state::AppState;

fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>().map_err(|_| ApiError::Service(ServiceError::InvalidValue))
}

/// Log a failed request and hand the error back for the response.
fn failed(op: &'static str, id: Option<i64>, err: ApiError) -> ApiError {
    if err.is_server_error() {
        error!(event = "item_request_failed", op, ?id, error = %err, "request failed");
    } else {
        warn!(event = "item_request_rejected", op, ?id, error = %err, "request rejected");
    }
    err
}

/// Create an item
pub async fn create_item(
    State(state): State<AppState>,
    payload: Result<Json<CreateItemRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ItemResponse>), ApiError> {
    let Json(input) = payload.map_err(|e| failed("create", None, ApiError::BadBody(e.body_text())))?;

    let ctx = state.request_context();
    let item = state
        .items
        .create_item(&ctx, &input.name)
        .await
        .map_err(|e| failed("create", None, e.into()))?;

    info!(event = "item_created", id = item.id, "create ok");
    Ok((StatusCode::CREATED, Json(ItemResponse::with_item(item, "Create OK"))))
}

/// Fetch an item by id
pub async fn get_item(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<ItemResponse>, ApiError> {
    let id = parse_id(&raw_id).map_err(|e| failed("get", None, e))?;

    let ctx = state.request_context();
    let item = state
        .items
        .get_item(&ctx, id)
        .await
        .map_err(|e| failed("get", Some(id), e.into()))?;

    info!(event = "item_fetched", id, "get ok");
    Ok(Json(ItemResponse::with_item(item, "Get OK")))
}

/// Delete an item by id
pub async fn delete_item(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<ItemResponse>, ApiError> {
    let id = parse_id(&raw_id).map_err(|e| failed("delete", None, e))?;

    let ctx = state.request_context();
    state
        .items
        .delete_item(&ctx, id)
        .await
        .map_err(|e| failed("delete", Some(id), e.into()))?;

    info!(event = "item_deleted", id, "delete ok");
    Ok(Json(ItemResponse::status_only("Delete OK")))
}
