use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use shared::{
    domain::{
        GridId, Product, ProductId, RowId, Template, TemplateId, MAX_PRODUCTS_PER_ROW,
        MIN_PRODUCTS_PER_ROW,
    },
    error::ApiError,
    protocol::{GridRecord, GridRowRecord, NewGridRow, SaveGridRequest},
};
use storage::GridStore;
use tracing::{error, info};

const MISSING_IDS: &str = "Missing required parameter: ids";
const INVALID_IDS: &str = "Invalid ids format. Expected comma-separated product IDs";
const INVALID_GRID: &str = "Invalid grid data. Required fields: name, rows";
const INVALID_ROW: &str = "Invalid row data. Each row must have a templateId and 1-3 products";

#[derive(Clone)]
pub struct ApiContext {
    pub store: Arc<dyn GridStore>,
}

impl ApiContext {
    pub fn new(store: Arc<dyn GridStore>) -> Self {
        Self { store }
    }
}

/// Splits the `ids` query value into product ids, dropping blank segments.
pub fn parse_product_ids(raw: Option<&str>) -> Result<Vec<ProductId>, ApiError> {
    let raw = raw
        .filter(|raw| !raw.is_empty())
        .ok_or_else(|| ApiError::validation(MISSING_IDS))?;

    let ids: Vec<ProductId> = raw
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(ProductId::from)
        .collect();

    if ids.is_empty() {
        return Err(ApiError::validation(INVALID_IDS));
    }
    Ok(ids)
}

pub async fn list_products(ctx: &ApiContext, ids: Option<&str>) -> Result<Vec<Product>, ApiError> {
    let ids = parse_product_ids(ids)?;
    ctx.store.products_by_ids(&ids).await.map_err(internal)
}

pub async fn list_templates(ctx: &ApiContext) -> Result<Vec<Template>, ApiError> {
    ctx.store.list_templates().await.map_err(internal)
}

pub async fn list_grids(ctx: &ApiContext) -> Result<Vec<GridRecord>, ApiError> {
    ctx.store.list_grids().await.map_err(internal)
}

/// Checks a raw `POST /grids` body. Any shape error maps onto one of two
/// fixed messages: one for the grid, one for its rows.
pub fn validate_new_grid(body: &Value) -> Result<SaveGridRequest, ApiError> {
    let name = body
        .get("name")
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ApiError::validation(INVALID_GRID))?;
    let rows = body
        .get("rows")
        .and_then(Value::as_array)
        .ok_or_else(|| ApiError::validation(INVALID_GRID))?;

    let rows = rows
        .iter()
        .map(validate_new_row)
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| ApiError::validation(INVALID_ROW))?;

    Ok(SaveGridRequest {
        name: name.to_string(),
        rows,
    })
}

fn validate_new_row(row: &Value) -> Option<NewGridRow> {
    let template_id = row
        .get("templateId")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())?;
    let products = row.get("products").and_then(Value::as_array)?;
    if !(MIN_PRODUCTS_PER_ROW..=MAX_PRODUCTS_PER_ROW).contains(&products.len()) {
        return None;
    }
    let products = products
        .iter()
        .map(|id| id.as_str().map(ProductId::from))
        .collect::<Option<Vec<_>>>()?;
    let id = row
        .get("id")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .map(RowId::from);

    Some(NewGridRow {
        id,
        template_id: TemplateId::from(template_id),
        products,
    })
}

pub async fn create_grid(ctx: &ApiContext, body: &[u8]) -> Result<GridRecord, ApiError> {
    let body: Value =
        serde_json::from_slice(body).map_err(|_| ApiError::validation(INVALID_GRID))?;
    let request = validate_new_grid(&body)?;

    let grid = GridRecord {
        id: GridId::generate(),
        name: request.name,
        rows: request
            .rows
            .into_iter()
            .map(|row| GridRowRecord {
                id: row.id.unwrap_or_else(RowId::generate),
                template_id: row.template_id,
                products: row.products,
            })
            .collect(),
        created_at: Utc::now(),
    };

    let grid = ctx.store.insert_grid(grid).await.map_err(internal)?;
    info!(grid_id = %grid.id, name = %grid.name, rows = grid.rows.len(), "grid saved");
    Ok(grid)
}

fn internal(err: anyhow::Error) -> ApiError {
    error!(error = %err, "grid store failure");
    ApiError::internal("Internal server error")
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
