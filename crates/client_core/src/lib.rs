//! Client side of the grid builder: row layout, drag-and-drop, zoom, query
//! parsing and the HTTP clients for the grid endpoint.

use shared::{domain::Template, protocol::GridRecord};

pub mod config;
pub mod drag;
pub mod layout;
pub mod params;
pub mod persistence;
pub mod query;
pub mod session;
pub mod transport;
pub mod zoom;

pub use drag::{DropOutcome, DropRejection, ProductDragController, RowDragController};
pub use layout::{distribute, set_row_alignment, LayoutStats};
pub use params::{GridParams, ParamsError};
pub use persistence::{validate_rows, GridClient, SaveGridError, ValidationErrors};
pub use query::{CachePolicy, ProductQuery};
pub use session::{load_grid, GridSession, GridView, LoadError};
pub use transport::{ApiEndpoint, FetchError};
pub use zoom::{ZoomController, ZoomOptions, ZoomStyle};

/// Product query and grid client sharing one endpoint.
pub struct GridBuilderClient {
    products: ProductQuery,
    grids: GridClient,
}

impl GridBuilderClient {
    pub fn new(base_url: &str, policy: CachePolicy) -> Result<Self, FetchError> {
        let endpoint = ApiEndpoint::new(base_url)?;
        Ok(Self {
            products: ProductQuery::new(endpoint.clone(), policy),
            grids: GridClient::new(endpoint),
        })
    }

    /// Connects to the URL named by `GRID_API_URL`.
    pub fn from_env(policy: CachePolicy) -> Result<Self, FetchError> {
        Self::new(&config::api_base_url(), policy)
    }

    pub fn base_url(&self) -> &str {
        self.grids.endpoint().base_url()
    }

    pub fn products(&self) -> &ProductQuery {
        &self.products
    }

    pub async fn load(&self, raw_query: &str) -> Result<GridView, LoadError> {
        load_grid(&self.products, raw_query).await
    }

    pub async fn save(
        &self,
        session: &GridSession,
        name: &str,
    ) -> Result<GridRecord, SaveGridError> {
        session.save(&self.grids, name).await
    }

    pub async fn templates(&self) -> Result<Vec<Template>, FetchError> {
        self.grids.templates().await
    }

    pub async fn grids(&self) -> Result<Vec<GridRecord>, FetchError> {
        self.grids.grids().await
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
