//! Transient catalog state for the screen.

use shopping_app_core::{Product, ProductId};
use tokio::sync::{Mutex, RwLock};
use tracing::{error, info, instrument};

use super::CatalogClient;

/// Where the catalog load stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// The fetch has not finished yet.
    Pending,
    /// Products were fetched.
    Loaded,
    /// The fetch failed; the catalog stays empty.
    Failed,
}

impl LoadStatus {
    /// Whether the load has finished, successfully or not.
    #[must_use]
    pub const fn is_settled(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

#[derive(Debug)]
struct CatalogInner {
    status: LoadStatus,
    products: Vec<Product>,
}

/// Products shown on the screen.
///
/// Filled once by [`Catalog::load`]. Later loads are ignored: there is no
/// refresh and no retry.
#[derive(Debug)]
pub struct Catalog {
    inner: RwLock<CatalogInner>,
    loading: Mutex<()>,
}

impl Catalog {
    /// An empty catalog waiting for its load.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inner: RwLock::const_new(CatalogInner {
                status: LoadStatus::Pending,
                products: Vec::new(),
            }),
            loading: Mutex::const_new(()),
        }
    }

    /// Fetch the products and store them.
    ///
    /// On failure the error is logged and reported to Sentry, and the
    /// catalog is left empty.
    #[instrument(skip_all)]
    pub async fn load(&self, client: &CatalogClient) -> LoadStatus {
        // Concurrent callers wait for the one fetch; readers are not blocked
        let _loading = self.loading.lock().await;
        let status = self.status().await;
        if status.is_settled() {
            return status;
        }

        let (status, products) = match client.fetch_products().await {
            Ok(products) => {
                info!(count = products.len(), "Catalog loaded");
                (LoadStatus::Loaded, products)
            }
            Err(e) => {
                let event_id = sentry::capture_error(&e);
                error!(
                    error = %e,
                    sentry_event_id = %event_id,
                    "Error fetching products"
                );
                (LoadStatus::Failed, Vec::new())
            }
        };

        let mut inner = self.inner.write().await;
        inner.status = status;
        inner.products = products;
        status
    }

    /// Current load status.
    pub async fn status(&self) -> LoadStatus {
        self.inner.read().await.status
    }

    /// All products, in catalog order.
    pub async fn products(&self) -> Vec<Product> {
        self.inner.read().await.products.clone()
    }

    /// Look up one product.
    pub async fn find(&self, id: ProductId) -> Option<Product> {
        self.inner
            .read()
            .await
            .products
            .iter()
            .find(|product| product.id == id)
            .cloned()
    }

    #[cfg(test)]
    pub(crate) async fn with_products(products: Vec<Product>) -> Self {
        let catalog = Self::new();
        {
            let mut inner = catalog.inner.write().await;
            inner.products = products;
            inner.status = LoadStatus::Loaded;
        }
        catalog
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}
