use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use shared::{
    domain::{Product, ProductId, Template},
    protocol::GridRecord,
};

pub mod catalog;
mod memory;
mod sqlite;

pub use memory::MemoryGridStore;
pub use sqlite::SqliteGridStore;

/// Backing store for the grid builder endpoint.
///
/// Products and templates are read-only seed data. Grids are append-only and
/// must be listed back in the order they were inserted.
#[async_trait]
pub trait GridStore: Send + Sync {
    /// Products whose id appears in `ids`, in catalog order. Unknown ids are
    /// skipped.
    async fn products_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>>;

    async fn list_templates(&self) -> Result<Vec<Template>>;

    async fn list_grids(&self) -> Result<Vec<GridRecord>>;

    async fn insert_grid(&self, grid: GridRecord) -> Result<GridRecord>;

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}

/// Opens the SQLite store when a database url is configured and falls back to
/// the seeded in-memory store otherwise.
pub async fn open_store(database_url: Option<&str>) -> Result<Arc<dyn GridStore>> {
    match database_url {
        Some(url) => Ok(Arc::new(SqliteGridStore::new(url).await?)),
        None => Ok(Arc::new(MemoryGridStore::seeded())),
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
