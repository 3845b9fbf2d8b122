//! Product fetching with a small time-bounded cache and retries.

use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use shared::domain::{Product, ProductId};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::transport::{ApiEndpoint, FetchError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachePolicy {
    pub enabled: bool,
    /// How long a cached result is served before it is fetched again.
    pub stale_after: Duration,
    /// Extra attempts after the first failed request.
    pub retries: u32,
    pub retry_delay: Duration,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            stale_after: Duration::from_secs(60),
            retries: 1,
            retry_delay: Duration::from_millis(250),
        }
    }
}

impl CachePolicy {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

struct CachedProducts {
    products: Vec<Product>,
    fetched_at: Instant,
}

pub struct ProductQuery {
    endpoint: ApiEndpoint,
    policy: CachePolicy,
    cache: Mutex<HashMap<Vec<ProductId>, CachedProducts>>,
}

impl ProductQuery {
    pub fn new(endpoint: ApiEndpoint, policy: CachePolicy) -> Self {
        Self {
            endpoint,
            policy,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Fetches the products for `ids`. The server answers in catalog order
    /// and leaves out unknown ids.
    pub async fn fetch(&self, ids: &[ProductId]) -> Result<Vec<Product>, FetchError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        if self.policy.enabled {
            let cache = self.cache.lock().await;
            if let Some(entry) = cache.get(ids) {
                if entry.fetched_at.elapsed() < self.policy.stale_after {
                    debug!(count = ids.len(), "products: cache hit");
                    return Ok(entry.products.clone());
                }
            }
        }

        let products = self.fetch_with_retries(ids).await?;

        if self.policy.enabled {
            let mut cache = self.cache.lock().await;
            let stale_after = self.policy.stale_after;
            cache.retain(|_, entry| entry.fetched_at.elapsed() < stale_after);
            cache.insert(
                ids.to_vec(),
                CachedProducts {
                    products: products.clone(),
                    fetched_at: Instant::now(),
                },
            );
        }
        Ok(products)
    }

    pub async fn invalidate(&self) {
        self.cache.lock().await.clear();
    }

    #[cfg(test)]
    pub(crate) async fn cached_entries(&self) -> usize {
        self.cache.lock().await.len()
    }

    async fn fetch_with_retries(&self, ids: &[ProductId]) -> Result<Vec<Product>, FetchError> {
        let joined = ids
            .iter()
            .map(ProductId::as_str)
            .collect::<Vec<_>>()
            .join(",");

        let mut attempt = 0;
        loop {
            match self
                .endpoint
                .get_json::<Vec<Product>>("products", &[("ids", joined.as_str())])
                .await
            {
                Ok(products) => return Ok(products),
                Err(err) if attempt < self.policy.retries => {
                    attempt += 1;
                    warn!(attempt, error = %err, "products: fetch failed, retrying");
                    tokio::time::sleep(self.policy.retry_delay).await;
                }
                Err(err) => {
                    warn!(error = %err, "products: fetch failed");
                    return Err(err);
                }
            }
        }
    }
}
