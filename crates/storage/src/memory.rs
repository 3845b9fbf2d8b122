use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use shared::{
    domain::{Product, ProductId, Template},
    protocol::GridRecord,
};
use tokio::sync::RwLock;
use tracing::debug;

use crate::{catalog::seed_products, GridStore};

/// Process-local store. Grids live only as long as the process does.
#[derive(Clone)]
pub struct MemoryGridStore {
    products: Arc<Vec<Product>>,
    templates: Arc<Vec<Template>>,
    grids: Arc<RwLock<Vec<GridRecord>>>,
}

impl MemoryGridStore {
    pub fn new(products: Vec<Product>, templates: Vec<Template>) -> Self {
        Self {
            products: Arc::new(products),
            templates: Arc::new(templates),
            grids: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn seeded() -> Self {
        Self::new(seed_products(), Template::builtin())
    }
}

#[async_trait]
impl GridStore for MemoryGridStore {
    async fn products_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>> {
        Ok(self
            .products
            .iter()
            .filter(|product| ids.contains(&product.id))
            .cloned()
            .collect())
    }

    async fn list_templates(&self) -> Result<Vec<Template>> {
        Ok(self.templates.as_ref().clone())
    }

    async fn list_grids(&self) -> Result<Vec<GridRecord>> {
        Ok(self.grids.read().await.clone())
    }

    async fn insert_grid(&self, grid: GridRecord) -> Result<GridRecord> {
        let mut grids = self.grids.write().await;
        grids.push(grid.clone());
        debug!(grid_id = %grid.id, stored = grids.len(), "grid appended to memory store");
        Ok(grid)
    }
}
