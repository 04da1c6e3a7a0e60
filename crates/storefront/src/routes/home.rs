//! The storefront screen.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::catalog::LoadStatus;
use crate::filters;
use crate::routes::cart::CartView;
use crate::routes::products::ProductView;
use crate::state::AppState;

/// Screen template: heading, product list, overlay slot, cart panel.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub products: Vec<ProductView>,
    pub cart: CartView,
    /// The catalog is still being fetched; the list polls until it settles.
    pub loading: bool,
}

/// Render the screen from the current catalog and cart snapshot.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    let catalog = state.catalog();
    let loading = catalog.status().await == LoadStatus::Pending;
    let products = catalog.products().await.iter().map(ProductView::from).collect();

    HomeTemplate {
        products,
        cart: CartView::from(&state.cart().snapshot()),
        loading,
    }
}
