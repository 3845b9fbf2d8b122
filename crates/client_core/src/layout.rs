//! Row distribution: turning a flat product list into display rows.

use std::num::NonZeroUsize;

use shared::domain::{Alignment, Product, Row, RowId, MAX_PRODUCTS_PER_ROW};

/// Partitions `products` into rows of one to three products.
///
/// Without a row count the products are chunked in order, three per row.
/// With a row count `r` the first `min(len, 3r)` products are spread as evenly
/// as possible over exactly `r` rows, the earlier rows taking the remainder.
/// When there are fewer products than requested rows every product gets its
/// own row and the result is shorter than `r`. Surplus products are left out;
/// [`LayoutStats`] reports that case.
///
/// Every row gets a fresh id and [`Alignment::Left`].
pub fn distribute(products: &[Product], row_count: Option<NonZeroUsize>) -> Vec<Row> {
    let Some(row_count) = row_count.map(NonZeroUsize::get) else {
        return products
            .chunks(MAX_PRODUCTS_PER_ROW)
            .map(|chunk| Row::new(chunk.to_vec()))
            .collect();
    };

    if products.len() < row_count {
        return products
            .iter()
            .map(|product| Row::new(vec![product.clone()]))
            .collect();
    }

    let usable = products
        .len()
        .min(row_count.saturating_mul(MAX_PRODUCTS_PER_ROW));
    let base = usable / row_count;
    let remainder = usable % row_count;

    let mut rows = Vec::with_capacity(row_count);
    let mut offset = 0;
    for index in 0..row_count {
        let take = (base + usize::from(index < remainder)).min(MAX_PRODUCTS_PER_ROW);
        rows.push(Row::new(products[offset..offset + take].to_vec()));
        offset += take;
    }
    rows
}

/// Sets the alignment of one row. Returns `false` when the row is unknown.
pub fn set_row_alignment(rows: &mut [Row], row_id: &RowId, alignment: Alignment) -> bool {
    match rows.iter_mut().find(|row| row.id == *row_id) {
        Some(row) => {
            row.alignment = Some(alignment);
            true
        }
        None => false,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutStats {
    pub total_products: usize,
    pub displayed_products: usize,
    pub row_count: usize,
    pub requested_rows: Option<usize>,
    /// Some fetched products did not fit into the requested rows.
    pub has_limited_products: bool,
}

impl LayoutStats {
    pub fn compute(
        products: &[Product],
        rows: &[Row],
        requested_rows: Option<NonZeroUsize>,
    ) -> Self {
        let displayed_products = rows.iter().map(|row| row.products.len()).sum();
        Self {
            total_products: products.len(),
            displayed_products,
            row_count: rows.len(),
            requested_rows: requested_rows.map(NonZeroUsize::get),
            has_limited_products: displayed_products < products.len(),
        }
    }
}
