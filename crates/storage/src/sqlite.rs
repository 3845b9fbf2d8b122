use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::{
    domain::{Alignment, Price, Product, ProductId, Template, TemplateId},
    protocol::{GridRecord, GridRowRecord},
};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Row, Sqlite,
};
use tracing::info;

use crate::{catalog::seed_products, GridStore};

const MEMORY_URL: &str = "sqlite::memory:";

#[derive(Clone)]
pub struct SqliteGridStore {
    pool: Pool<Sqlite>,
}

impl SqliteGridStore {
    pub async fn new(database_url: &str) -> Result<Self> {
        ensure_sqlite_parent_dir_exists(database_url)?;

        let connect_options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        // Every connection to `sqlite::memory:` opens a fresh database, so the
        // pool must hold exactly one connection for its whole lifetime.
        let pool_options = if database_url.starts_with(MEMORY_URL) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };
        let pool = pool_options.connect_with(connect_options).await?;
        sqlx::migrate!("./migrations").run(&pool).await?;

        let store = Self { pool };
        store.seed_catalog().await?;
        info!(%database_url, "sqlite grid store ready");
        Ok(store)
    }

    async fn seed_catalog(&self) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        for (position, product) in seed_products().into_iter().enumerate() {
            sqlx::query(
                "INSERT OR IGNORE INTO products (id, position, name, image, price_amount, price_currency)
                 VALUES (?, ?, ?, ?, ?, ?)",
            )
            .bind(product.id.as_str())
            .bind(position as i64)
            .bind(&product.name)
            .bind(&product.image)
            .bind(product.price.amount)
            .bind(&product.price.currency)
            .execute(&mut *tx)
            .await
            .context("failed to seed products")?;
        }
        for (position, template) in Template::builtin().into_iter().enumerate() {
            sqlx::query(
                "INSERT OR IGNORE INTO templates (id, position, name, alignment) VALUES (?, ?, ?, ?)",
            )
            .bind(template.id.as_str())
            .bind(position as i64)
            .bind(&template.name)
            .bind(template.alignment.as_str())
            .execute(&mut *tx)
            .await
            .context("failed to seed templates")?;
        }
        tx.commit().await?;
        Ok(())
    }
}

#[async_trait]
impl GridStore for SqliteGridStore {
    async fn products_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql = format!(
            "SELECT id, name, image, price_amount, price_currency
             FROM products WHERE id IN ({placeholders}) ORDER BY position ASC"
        );
        let mut query = sqlx::query(&sql);
        for id in ids {
            query = query.bind(id.as_str());
        }
        let rows = query.fetch_all(&self.pool).await?;

        Ok(rows
            .into_iter()
            .map(|r| Product {
                id: ProductId(r.get::<String, _>(0)),
                name: r.get::<String, _>(1),
                image: r.get::<String, _>(2),
                price: Price {
                    amount: r.get::<f64, _>(3),
                    currency: r.get::<String, _>(4),
                },
            })
            .collect())
    }

    async fn list_templates(&self) -> Result<Vec<Template>> {
        let rows = sqlx::query("SELECT id, name, alignment FROM templates ORDER BY position ASC")
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter()
            .map(|r| -> Result<Template> {
                let alignment = r.get::<String, _>(2).parse::<Alignment>()?;
                Ok(Template {
                    id: TemplateId(r.get::<String, _>(0)),
                    name: r.get::<String, _>(1),
                    alignment,
                })
            })
            .collect()
    }

    async fn list_grids(&self) -> Result<Vec<GridRecord>> {
        let rows = sqlx::query("SELECT id, name, rows_json, created_at FROM grids ORDER BY seq ASC")
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter()
            .map(|r| -> Result<GridRecord> {
                let id: String = r.try_get("id")?;
                let rows_json: String = r.try_get("rows_json")?;
                let rows: Vec<GridRowRecord> = serde_json::from_str(&rows_json)
                    .with_context(|| format!("corrupt rows for grid {id}"))?;
                Ok(GridRecord {
                    id: id.into(),
                    name: r.try_get("name")?,
                    rows,
                    created_at: r.try_get::<DateTime<Utc>, _>("created_at")?,
                })
            })
            .collect()
    }

    async fn insert_grid(&self, grid: GridRecord) -> Result<GridRecord> {
        let rows_json = serde_json::to_string(&grid.rows)?;
        sqlx::query("INSERT INTO grids (id, name, rows_json, created_at) VALUES (?, ?, ?, ?)")
            .bind(grid.id.as_str())
            .bind(&grid.name)
            .bind(rows_json)
            .bind(grid.created_at)
            .execute(&self.pool)
            .await
            .with_context(|| format!("failed to insert grid {}", grid.id))?;
        Ok(grid)
    }

    async fn health_check(&self) -> Result<()> {
        let _: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("sqlite ping failed")?;
        Ok(())
    }
}

fn ensure_sqlite_parent_dir_exists(database_url: &str) -> Result<()> {
    let Some(path) = sqlite_path(database_url) else {
        return Ok(());
    };

    let Some(parent) = path.parent() else {
        return Ok(());
    };

    fs::create_dir_all(parent).with_context(|| {
        format!(
            "failed to create parent directory '{}' for database url '{database_url}'",
            parent.display()
        )
    })?;

    Ok(())
}

fn sqlite_path(database_url: &str) -> Option<PathBuf> {
    if database_url.starts_with(MEMORY_URL) || !database_url.starts_with("sqlite:") {
        return None;
    }

    let path = database_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:")
        .split('?')
        .next()
        .unwrap_or_default();

    if path.is_empty() {
        return None;
    }

    Some(Path::new(path).to_path_buf())
}
