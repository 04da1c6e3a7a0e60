//! Handler errors and Sentry breadcrumbs.
//!
//! Cart transitions cannot fail and a failed catalog load is absorbed by
//! [`Catalog::load`](crate::catalog::Catalog::load), so the only error a
//! handler reports is a product ID that is not in the loaded catalog.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use shopping_app_core::{CartCommand, CartState, ProductId};
use thiserror::Error;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// The product is not in the loaded catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::ProductNotFound(_) => StatusCode::NOT_FOUND,
        };

        tracing::debug!(error = %self, %status, "Request rejected");
        (status, self.to_string()).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Leave a Sentry breadcrumb for a cart command and the cart it produced.
///
/// Any error reported later in the same scope carries the trail of cart
/// activity that preceded it.
pub fn cart_breadcrumb(command: &CartCommand, cart: &CartState) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some("cart".to_string()),
        message: Some(command.name().to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    let product_id = match command {
        CartCommand::Add(product) => Some(product.id),
        CartCommand::Increment(id) | CartCommand::Decrement(id) => Some(*id),
        CartCommand::Clear => None,
    };
    if let Some(id) = product_id {
        breadcrumb
            .data
            .insert("product_id".to_string(), id.as_i64().into());
    }
    breadcrumb
        .data
        .insert("item_count".to_string(), cart.item_count().into());

    sentry::add_breadcrumb(breadcrumb);
}
