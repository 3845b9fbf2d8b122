use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use shared::{
    domain::{Product, Template},
    error::{ApiError, ErrorCode},
    protocol::GridRecord,
};
use tracing::{error, warn};

use crate::app_state::AppState;

pub(crate) type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

#[derive(Debug, Deserialize)]
pub(crate) struct ProductsQuery {
    ids: Option<String>,
}

pub(crate) fn reject(err: ApiError) -> (StatusCode, Json<ApiError>) {
    let status =
        StatusCode::from_u16(err.code.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        error!(code = ?err.code, message = %err.message, "request failed");
    } else {
        warn!(code = ?err.code, message = %err.message, "request rejected");
    }
    (status, Json(err))
}

pub(crate) async fn healthz(State(state): State<Arc<AppState>>) -> ApiResult<&'static str> {
    state.api.store.health_check().await.map_err(|e| {
        reject(ApiError::new(
            ErrorCode::Internal,
            format!("store unavailable: {e}"),
        ))
    })?;
    Ok("ok")
}

pub(crate) async fn http_list_products(
    State(state): State<Arc<AppState>>,
    Query(q): Query<ProductsQuery>,
) -> ApiResult<Json<Vec<Product>>> {
    server_api::list_products(&state.api, q.ids.as_deref())
        .await
        .map(Json)
        .map_err(reject)
}

pub(crate) async fn http_list_templates(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Template>>> {
    server_api::list_templates(&state.api)
        .await
        .map(Json)
        .map_err(reject)
}

pub(crate) async fn http_list_grids(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<GridRecord>>> {
    server_api::list_grids(&state.api)
        .await
        .map(Json)
        .map_err(reject)
}

pub(crate) async fn http_create_grid(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<GridRecord>)> {
    let grid = server_api::create_grid(&state.api, &body)
        .await
        .map_err(reject)?;
    Ok((StatusCode::CREATED, Json(grid)))
}

pub(crate) async fn not_found() -> (StatusCode, Json<ApiError>) {
    reject(ApiError::new(ErrorCode::NotFound, "Not found"))
}

pub(crate) async fn method_not_allowed() -> (StatusCode, Json<ApiError>) {
    reject(ApiError::new(
        ErrorCode::MethodNotAllowed,
        "Method not allowed",
    ))
}
