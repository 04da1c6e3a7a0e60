//! Product catalog loading.
//!
//! # Architecture
//!
//! - [`CatalogClient`] performs the single outbound read: one `GET` to the
//!   configured endpoint, no parameters, expecting a JSON array of products
//! - [`Catalog`] is the screen's transient view state holding the result
//! - No caching, no pagination, no retry. A failed load is logged and leaves
//!   the catalog empty
//!
//! # Example
//!
//! ```rust,ignore
//! use shopping_app_storefront::catalog::{Catalog, CatalogClient};
//!
//! let client = CatalogClient::new(config.catalog_url.clone())?;
//! let catalog = Catalog::new();
//! catalog.load(&client).await;
//!
//! for product in catalog.products().await {
//!     tracing::info!(id = %product.id, title = %product.title);
//! }
//! ```

mod client;
mod view;

pub use client::CatalogClient;
pub use view::{Catalog, LoadStatus};

use thiserror::Error;

/// Errors that can occur when fetching the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Catalog endpoint returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Response body was not a JSON array of products.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = CatalogError::Api {
            status: 503,
            message: "Service Unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 503 - Service Unavailable");
    }

    #[test]
    fn test_parse_error_display() {
        let parse = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        let err = CatalogError::from(parse);
        assert!(err.to_string().starts_with("JSON parse error:"));
    }
}
