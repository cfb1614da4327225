use axum::{
    extract::{rejection::{JsonRejection, PathRejection, QueryRejection}, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;
use utoipa::IntoParams;

use models::item::{self, ItemInput};

use crate::{errors::JsonApiError, state::ServerState};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NameQuery {
    /// Substring to look for in item names
    pub name: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PriceQuery {
    /// Exclusive upper bound on price
    pub max: f64,
}

#[utoipa::path(
    get, path = "/api/items", tag = "items",
    responses(
        (status = 200, description = "All items", body = [crate::openapi::ItemDoc]),
        (status = 500, description = "Store Failure", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<item::Model>>, JsonApiError> {
    let list = state.items.list().await?;
    info!(count = list.len(), "list items");
    Ok(Json(list))
}

#[utoipa::path(
    get, path = "/api/items/{id}", tag = "items",
    params(("id" = i64, Path, description = "Item ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::ItemDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<item::Model>, JsonApiError> {
    let Path(id) = id?;
    match state.items.get(id).await? {
        Some(m) => Ok(Json(m)),
        None => Err(JsonApiError::not_found(format!("item {} not found", id))),
    }
}

#[utoipa::path(
    post, path = "/api/items", tag = "items",
    request_body = crate::openapi::ItemInputDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::ItemDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<ItemInput>, JsonRejection>,
) -> Result<(StatusCode, Json<item::Model>), JsonApiError> {
    let Json(input) = payload?;
    let m = state.items.create(input).await?;
    info!(id = m.id, name = %m.name, "created item");
    Ok((StatusCode::CREATED, Json(m)))
}

#[utoipa::path(
    put, path = "/api/items/{id}", tag = "items",
    params(("id" = i64, Path, description = "Item ID")),
    request_body = crate::openapi::ItemInputDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ItemDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<ItemInput>, JsonRejection>,
) -> Result<Json<item::Model>, JsonApiError> {
    let Path(id) = id?;
    let Json(input) = payload?;
    let m = state.items.update(id, input).await?;
    info!(id = m.id, "updated item");
    Ok(Json(m))
}

#[utoipa::path(
    delete, path = "/api/items/{id}", tag = "items",
    params(("id" = i64, Path, description = "Item ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, JsonApiError> {
    let Path(id) = id?;
    state.items.delete(id).await?;
    info!(id, "deleted item");
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get, path = "/api/items/search", tag = "items",
    params(NameQuery),
    responses(
        (status = 200, description = "Items whose name contains the fragment", body = [crate::openapi::ItemDoc]),
        (status = 400, description = "Missing name", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn search_by_name(
    State(state): State<ServerState>,
    q: Result<Query<NameQuery>, QueryRejection>,
) -> Result<Json<Vec<item::Model>>, JsonApiError> {
    let Query(q) = q?;
    let found = state.items.search_by_name(&q.name).await?;
    info!(fragment = %q.name, count = found.len(), "search items by name");
    Ok(Json(found))
}

#[utoipa::path(
    get, path = "/api/items/price", tag = "items",
    params(PriceQuery),
    responses(
        (status = 200, description = "Items priced below max", body = [crate::openapi::ItemDoc]),
        (status = 400, description = "Missing or invalid max", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn search_by_max_price(
    State(state): State<ServerState>,
    q: Result<Query<PriceQuery>, QueryRejection>,
) -> Result<Json<Vec<item::Model>>, JsonApiError> {
    let Query(q) = q?;
    let found = state.items.search_by_max_price(q.max).await?;
    info!(max = q.max, count = found.len(), "search items by max price");
    Ok(Json(found))
}
