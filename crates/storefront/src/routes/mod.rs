//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                         - Screen: product list and cart panel
//! GET  /health                   - Liveness check
//! GET  /health/ready             - Readiness (catalog load settled)
//!
//! # Products
//! GET  /products/{id}/quick-view - Product detail overlay (HTMX fragment)
//!
//! # Cart (HTMX fragments)
//! GET  /cart                     - Cart panel
//! POST /cart/add                 - Add product (returns cart panel, closes overlay)
//! POST /cart/increment           - Increment line (returns cart panel)
//! POST /cart/decrement           - Decrement line (returns cart panel)
//! POST /cart/clear               - Clear cart (returns cart panel)
//! GET  /cart/count               - Cart count badge
//!
//! # API
//! GET  /api/cart                 - Cart snapshot as JSON
//! ```

pub mod cart;
pub mod home;
pub mod products;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new().route("/{id}/quick-view", get(products::quick_view))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/increment", post(cart::increment))
        .route("/decrement", post(cart::decrement))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
}

/// Create the JSON API routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new().route("/cart", get(cart::snapshot))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .nest("/api", api_routes())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 until the catalog load has settled. A failed load still
/// counts as ready: the screen renders an empty list.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    if state.catalog().status().await.is_settled() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}
