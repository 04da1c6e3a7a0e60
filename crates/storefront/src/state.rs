//! Application state shared across handlers.

use std::sync::Arc;

use shopping_app_core::CartStore;

use crate::catalog::{Catalog, CatalogClient, CatalogError};
use crate::config::StorefrontConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and carries the screen's
/// collaborators: the catalog client, the loaded catalog, and the cart store
/// injected by the caller.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog_client: CatalogClient,
    catalog: Catalog,
    cart: CartStore,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration
    /// * `cart` - The cart store the screen dispatches to
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog HTTP client cannot be built.
    pub fn new(config: StorefrontConfig, cart: CartStore) -> Result<Self, CatalogError> {
        let catalog_client = CatalogClient::new(config.catalog_url.clone())?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog_client,
                catalog: Catalog::new(),
                cart,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog HTTP client.
    #[must_use]
    pub fn catalog_client(&self) -> &CatalogClient {
        &self.inner.catalog_client
    }

    /// Get a reference to the loaded catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the cart store.
    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.inner.cart
    }

    /// Start loading the catalog in the background.
    ///
    /// Returns immediately; the screen shows an empty list until the load
    /// settles.
    pub fn start_catalog_load(&self) {
        let state = self.clone();
        tokio::spawn(async move {
            state.catalog().load(state.catalog_client()).await;
        });
    }
}
