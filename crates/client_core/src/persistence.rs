//! Validating and saving grids, plus read access to templates and saved grids.

use std::fmt;

use shared::{
    domain::{Alignment, Row, Template},
    protocol::{GridRecord, NewGridRow, SaveGridRequest},
};
use thiserror::Error;
use tracing::{info, warn};

use crate::transport::{ApiEndpoint, FetchError};

/// Every problem found in a grid before it is submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<String>);

impl ValidationErrors {
    pub fn messages(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(". "))
    }
}

impl std::error::Error for ValidationErrors {}

#[derive(Debug, Error)]
pub enum SaveGridError {
    #[error("A grid name is required")]
    MissingName,
    #[error("{0}")]
    Invalid(#[from] ValidationErrors),
    /// The endpoint refused the grid; `message` is its error text verbatim.
    #[error("{message}")]
    Rejected { status: u16, message: String },
    #[error("failed to reach the grid endpoint: {0}")]
    Transport(FetchError),
}

impl From<FetchError> for SaveGridError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Status { status, message } => SaveGridError::Rejected { status, message },
            other => SaveGridError::Transport(other),
        }
    }
}

pub fn validate_rows(rows: &[Row]) -> Result<(), ValidationErrors> {
    if rows.is_empty() {
        return Err(ValidationErrors(vec![
            "The grid must have at least one row to save".to_string(),
        ]));
    }

    let mut errors = Vec::new();
    for (index, row) in rows.iter().enumerate() {
        let number = index + 1;
        if row.products.is_empty() {
            errors.push(format!(
                "Row {number} has no products. All rows must have at least one product."
            ));
        }
        if row.alignment.is_none() {
            errors.push(format!(
                "Row {number} has no template assigned. All rows must have a template."
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(errors))
    }
}

/// Maps rows onto the wire form; a row without alignment uses the LEFT template.
pub fn to_save_request(name: &str, rows: &[Row]) -> SaveGridRequest {
    SaveGridRequest {
        name: name.to_string(),
        rows: rows
            .iter()
            .map(|row| NewGridRow {
                id: Some(row.id.clone()),
                template_id: row.alignment.unwrap_or(Alignment::Left).template_id(),
                products: row.product_ids(),
            })
            .collect(),
    }
}

#[derive(Debug, Clone)]
pub struct GridClient {
    endpoint: ApiEndpoint,
}

impl GridClient {
    pub fn new(endpoint: ApiEndpoint) -> Self {
        Self { endpoint }
    }

    pub fn endpoint(&self) -> &ApiEndpoint {
        &self.endpoint
    }

    /// Saves `rows` under `name`. Local validation failures never reach the
    /// endpoint.
    pub async fn save(&self, name: &str, rows: &[Row]) -> Result<GridRecord, SaveGridError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SaveGridError::MissingName);
        }
        validate_rows(rows)?;

        let request = to_save_request(name, rows);
        match self
            .endpoint
            .post_json::<_, GridRecord>("grids", &request)
            .await
        {
            Ok(grid) => {
                info!(grid_id = %grid.id, rows = grid.rows.len(), "grid saved");
                Ok(grid)
            }
            Err(err) => {
                warn!(error = %err, "grid save failed");
                Err(err.into())
            }
        }
    }

    pub async fn templates(&self) -> Result<Vec<Template>, FetchError> {
        self.endpoint.get_json("templates", &[]).await
    }

    pub async fn grids(&self) -> Result<Vec<GridRecord>, FetchError> {
        self.endpoint.get_json("grids", &[]).await
    }
}
