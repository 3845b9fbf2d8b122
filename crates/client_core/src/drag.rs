//! Drag-and-drop bookkeeping for products and rows, expressed as explicit
//! `start` / `drop` / `end` transitions over an immutable row slice.

use std::mem;

use shared::domain::{Product, ProductId, Row, RowId, MIN_PRODUCTS_PER_ROW};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    /// The drop changed the layout; carries the full updated row list.
    Applied(Vec<Row>),
    /// Nothing to do: no active drag, same slot, or an unknown row.
    Unchanged,
    Rejected(DropRejection),
}

impl DropOutcome {
    pub fn into_rows(self) -> Option<Vec<Row>> {
        match self {
            DropOutcome::Applied(rows) => Some(rows),
            DropOutcome::Unchanged | DropOutcome::Rejected(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DropRejection {
    #[error("target row already holds the maximum number of products")]
    TargetRowFull,
    #[error("moving the product would leave its source row empty")]
    SourceRowWouldEmpty,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductDragState {
    pub is_dragging: bool,
    pub dragged_product: Option<Product>,
    pub source_row_id: Option<RowId>,
}

#[derive(Debug, Default)]
pub struct ProductDragController {
    state: ProductDragState,
}

impl ProductDragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ProductDragState {
        &self.state
    }

    /// Starts tracking `product` as dragged out of `row_id`, replacing any
    /// drag already in progress.
    pub fn start(&mut self, product: Product, row_id: RowId) {
        self.state = ProductDragState {
            is_dragging: true,
            dragged_product: Some(product),
            source_row_id: Some(row_id),
        };
    }

    pub fn end(&mut self) {
        self.state = ProductDragState::default();
    }

    /// Drops the dragged product on `target_row_id`, optionally at
    /// `target_position`. The drag state is cleared whatever the outcome.
    pub fn drop(
        &mut self,
        rows: &[Row],
        target_row_id: &RowId,
        target_position: Option<usize>,
    ) -> DropOutcome {
        let state = mem::take(&mut self.state);
        let (Some(product), Some(source_row_id)) = (state.dragged_product, state.source_row_id)
        else {
            return DropOutcome::Unchanged;
        };

        let outcome = if *target_row_id == source_row_id {
            match target_position {
                Some(position) => reorder_within_row(rows, &source_row_id, &product.id, position),
                None => DropOutcome::Unchanged,
            }
        } else {
            move_between_rows(
                rows,
                &source_row_id,
                target_row_id,
                &product.id,
                target_position,
            )
        };

        debug!(
            product_id = %product.id,
            source_row = %source_row_id,
            target_row = %target_row_id,
            ?target_position,
            outcome = outcome_label(&outcome),
            "product drop"
        );
        outcome
    }
}

fn reorder_within_row(
    rows: &[Row],
    row_id: &RowId,
    product_id: &ProductId,
    position: usize,
) -> DropOutcome {
    let Some(row_index) = rows.iter().position(|row| row.id == *row_id) else {
        return DropOutcome::Unchanged;
    };
    let Some(current) = rows[row_index].position_of(product_id) else {
        return DropOutcome::Unchanged;
    };
    if current == position {
        return DropOutcome::Unchanged;
    }

    let mut updated = rows.to_vec();
    let products = &mut updated[row_index].products;
    let moved = products.remove(current);
    // Removal shifted everything after `current` one slot left.
    let insert_at = if position > current { position - 1 } else { position };
    products.insert(insert_at.min(products.len()), moved);

    if updated[row_index].products == rows[row_index].products {
        return DropOutcome::Unchanged;
    }
    DropOutcome::Applied(updated)
}

fn move_between_rows(
    rows: &[Row],
    source_row_id: &RowId,
    target_row_id: &RowId,
    product_id: &ProductId,
    target_position: Option<usize>,
) -> DropOutcome {
    let (Some(source_index), Some(target_index)) = (
        rows.iter().position(|row| row.id == *source_row_id),
        rows.iter().position(|row| row.id == *target_row_id),
    ) else {
        return DropOutcome::Unchanged;
    };

    if rows[target_index].is_full() {
        return DropOutcome::Rejected(DropRejection::TargetRowFull);
    }
    let Some(product_index) = rows[source_index].position_of(product_id) else {
        return DropOutcome::Unchanged;
    };
    if rows[source_index].products.len() <= MIN_PRODUCTS_PER_ROW {
        return DropOutcome::Rejected(DropRejection::SourceRowWouldEmpty);
    }

    let mut updated = rows.to_vec();
    let moved = updated[source_index].products.remove(product_index);
    let target = &mut updated[target_index].products;
    match target_position {
        Some(position) if position <= target.len() => target.insert(position, moved),
        _ => target.push(moved),
    }
    DropOutcome::Applied(updated)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowDragState {
    pub is_dragging: bool,
    pub source_row_id: Option<RowId>,
}

#[derive(Debug, Default)]
pub struct RowDragController {
    state: RowDragState,
}

impl RowDragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &RowDragState {
        &self.state
    }

    pub fn start(&mut self, row_id: RowId) {
        self.state = RowDragState {
            is_dragging: true,
            source_row_id: Some(row_id),
        };
    }

    pub fn end(&mut self) {
        self.state = RowDragState::default();
    }

    /// Moves the dragged row into the slot currently held by `target_row_id`.
    /// Ignored drops leave the drag active; callers finish with [`Self::end`].
    pub fn drop(&mut self, rows: &[Row], target_row_id: &RowId) -> DropOutcome {
        if !self.state.is_dragging {
            return DropOutcome::Unchanged;
        }
        let Some(source_row_id) = self.state.source_row_id.as_ref() else {
            return DropOutcome::Unchanged;
        };
        if source_row_id == target_row_id {
            return DropOutcome::Unchanged;
        }

        let (Some(source_index), Some(target_index)) = (
            rows.iter().position(|row| row.id == *source_row_id),
            rows.iter().position(|row| row.id == *target_row_id),
        ) else {
            return DropOutcome::Unchanged;
        };

        let mut updated = rows.to_vec();
        let moved = updated.remove(source_index);
        updated.insert(target_index, moved);
        debug!(source_index, target_index, "row reordered");

        self.end();
        DropOutcome::Applied(updated)
    }
}

fn outcome_label(outcome: &DropOutcome) -> &'static str {
    match outcome {
        DropOutcome::Applied(_) => "applied",
        DropOutcome::Unchanged => "unchanged",
        DropOutcome::Rejected(DropRejection::TargetRowFull) => "target_full",
        DropOutcome::Rejected(DropRejection::SourceRowWouldEmpty) => "source_would_empty",
    }
}

#[cfg(test)]
#[path = "tests/drag_tests.rs"]
mod tests;
