//! Catalog browsing commands.
//!
//! # Usage
//!
//! ```bash
//! shop-cli catalog list
//! shop-cli catalog show 3
//! ```
//!
//! # Environment Variables
//!
//! - `CATALOG_URL` - Product catalog endpoint (default: <https://fakestoreapi.com/products>)

use shopping_app_core::{Product, ProductId};
use shopping_app_storefront::catalog::{CatalogClient, CatalogError};
use thiserror::Error;
use tracing::info;
use url::Url;

/// Errors that can occur while browsing the catalog.
#[derive(Debug, Error)]
pub enum CatalogCommandError {
    /// Fetching the catalog failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The requested product is not in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),
}

/// Fetch the whole catalog from the endpoint.
///
/// # Errors
///
/// Returns an error if the client cannot be built or the fetch fails.
pub async fn fetch(catalog_url: Url) -> Result<Vec<Product>, CatalogError> {
    let client = CatalogClient::new(catalog_url)?;
    info!(endpoint = %client.endpoint(), "Fetching catalog");
    client.fetch_products().await
}

/// Log every product in the catalog.
///
/// # Errors
///
/// Returns an error if the catalog cannot be fetched.
pub async fn list(catalog_url: Url) -> Result<(), CatalogCommandError> {
    let products = fetch(catalog_url).await?;

    info!("Catalog ({} products)", products.len());
    for product in &products {
        info!(
            "  {:>4}  {:<10}  {}",
            product.id.as_i64(),
            product.price.to_string(),
            product.title
        );
    }

    Ok(())
}

/// Log one product's detail.
///
/// # Errors
///
/// Returns an error if the catalog cannot be fetched or has no such product.
pub async fn show(catalog_url: Url, id: ProductId) -> Result<(), CatalogCommandError> {
    let products = fetch(catalog_url).await?;
    let product = find(&products, id).ok_or(CatalogCommandError::ProductNotFound(id))?;

    info!("{}", product.title);
    info!("  ID:          {}", product.id);
    info!("  Price:       {}", product.price);
    info!("  Image:       {}", product.image);
    info!("  Description: {}", product.description);

    Ok(())
}

/// Look up a product by ID.
pub fn find(products: &[Product], id: ProductId) -> Option<&Product> {
    products.iter().find(|product| product.id == id)
}
