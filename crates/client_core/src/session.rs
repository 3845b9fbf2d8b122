use std::num::NonZeroUsize;

use shared::{
    domain::{Alignment, Product, ProductId, Row, RowId},
    protocol::GridRecord,
};
use thiserror::Error;
use tracing::info;

use crate::{
    drag::{DropOutcome, DropRejection, ProductDragController, RowDragController},
    layout::{distribute, set_row_alignment, LayoutStats},
    params::{GridParams, ParamsError},
    persistence::{GridClient, SaveGridError},
    query::ProductQuery,
    transport::FetchError,
    zoom::ZoomController,
};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Params(#[from] ParamsError),
    #[error("Failed to load products: {0}")]
    Fetch(#[from] FetchError),
}

#[derive(Debug)]
pub enum GridView {
    /// None of the requested products exist.
    Empty,
    Ready(GridSession),
}

/// Parses `raw_query`, fetches the products it names and lays them out.
pub async fn load_grid(query: &ProductQuery, raw_query: &str) -> Result<GridView, LoadError> {
    let params = GridParams::from_query(raw_query)?;
    let products = query.fetch(&params.product_ids).await?;
    if products.is_empty() {
        info!(requested = params.product_ids.len(), "no matching products");
        return Ok(GridView::Empty);
    }
    Ok(GridView::Ready(GridSession::new(products, params.row_count)))
}

/// Editable state of one grid: the fetched products, their rows and the
/// in-flight drags.
#[derive(Debug, Default)]
pub struct GridSession {
    products: Vec<Product>,
    rows: Vec<Row>,
    requested_rows: Option<NonZeroUsize>,
    product_drag: ProductDragController,
    row_drag: RowDragController,
    zoom: ZoomController,
}

impl GridSession {
    pub fn new(products: Vec<Product>, requested_rows: Option<NonZeroUsize>) -> Self {
        let rows = distribute(&products, requested_rows);
        Self {
            products,
            rows,
            requested_rows,
            ..Self::default()
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn stats(&self) -> LayoutStats {
        LayoutStats::compute(&self.products, &self.rows, self.requested_rows)
    }

    /// Lays the products out again, discarding manual edits.
    pub fn redistribute(&mut self, requested_rows: Option<NonZeroUsize>) {
        self.requested_rows = requested_rows;
        self.rows = distribute(&self.products, requested_rows);
        self.product_drag.end();
        self.row_drag.end();
    }

    pub fn set_alignment(&mut self, row_id: &RowId, alignment: Alignment) -> bool {
        set_row_alignment(&mut self.rows, row_id, alignment)
    }

    /// Starts dragging `product_id` out of `row_id`. Returns `false` when the
    /// product is not in that row.
    pub fn begin_product_drag(&mut self, row_id: &RowId, product_id: &ProductId) -> bool {
        let product = self
            .rows
            .iter()
            .find(|row| row.id == *row_id)
            .and_then(|row| row.products.iter().find(|p| p.id == *product_id));
        match product {
            Some(product) => {
                self.product_drag.start(product.clone(), row_id.clone());
                true
            }
            None => false,
        }
    }

    /// Drops the dragged product. `Ok(true)` means the rows changed.
    pub fn drop_product(
        &mut self,
        target_row_id: &RowId,
        target_position: Option<usize>,
    ) -> Result<bool, DropRejection> {
        let outcome = self
            .product_drag
            .drop(&self.rows, target_row_id, target_position);
        self.apply(outcome)
    }

    pub fn end_product_drag(&mut self) {
        self.product_drag.end();
    }

    pub fn begin_row_drag(&mut self, row_id: &RowId) -> bool {
        if !self.rows.iter().any(|row| row.id == *row_id) {
            return false;
        }
        self.row_drag.start(row_id.clone());
        true
    }

    pub fn drop_row(&mut self, target_row_id: &RowId) -> bool {
        let outcome = self.row_drag.drop(&self.rows, target_row_id);
        matches!(self.apply(outcome), Ok(true))
    }

    pub fn end_row_drag(&mut self) {
        self.row_drag.end();
    }

    pub fn zoom(&self) -> &ZoomController {
        &self.zoom
    }

    pub fn zoom_mut(&mut self) -> &mut ZoomController {
        &mut self.zoom
    }

    pub async fn save(&self, client: &GridClient, name: &str) -> Result<GridRecord, SaveGridError> {
        client.save(name, &self.rows).await
    }

    fn apply(&mut self, outcome: DropOutcome) -> Result<bool, DropRejection> {
        match outcome {
            DropOutcome::Applied(rows) => {
                self.rows = rows;
                Ok(true)
            }
            DropOutcome::Unchanged => Ok(false),
            DropOutcome::Rejected(reason) => Err(reason),
        }
    }
}
