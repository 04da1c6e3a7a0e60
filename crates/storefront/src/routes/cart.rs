//! Cart route handlers.
//!
//! Every mutation dispatches one command to the injected [`CartStore`] and
//! re-renders the cart panel from the returned snapshot. Responses carry an
//! `HX-Trigger: cart-updated` header so the count badge refreshes itself.
//!
//! [`CartStore`]: shopping_app_core::CartStore

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Json,
    extract::State,
    response::{AppendHeaders, IntoResponse, Response},
};
use serde::Deserialize;
use shopping_app_core::{CartCommand, CartLine, CartState, ProductId};
use tracing::instrument;

use crate::error::{AppError, Result, cart_breadcrumb};
use crate::filters;
use crate::state::AppState;

/// Event name HTMX listeners use to refresh cart-dependent fragments.
pub const CART_UPDATED_EVENT: &str = "cart-updated";

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub id: ProductId,
    pub title: String,
    pub quantity: u32,
    pub price: String,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub item_count: u64,
}

impl From<&CartLine> for CartItemView {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.id(),
            title: line.product.title.clone(),
            quantity: line.quantity,
            price: line.product.price.to_string(),
        }
    }
}

impl From<&CartState> for CartView {
    fn from(cart: &CartState) -> Self {
        Self {
            items: cart.lines().iter().map(CartItemView::from).collect(),
            item_count: cart.item_count(),
        }
    }
}

/// Form data naming one product.
#[derive(Debug, Deserialize)]
pub struct ProductForm {
    pub product_id: ProductId,
}

/// Cart panel fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_panel.html")]
pub struct CartPanelTemplate {
    pub cart: CartView,
    /// Also clear the product overlay via an out-of-band swap.
    pub close_overlay: bool,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u64,
}

fn dispatch(state: &AppState, command: &CartCommand) -> CartState {
    let cart = state.cart().dispatch(command);
    cart_breadcrumb(command, &cart);
    cart
}

fn panel(cart: &CartState, close_overlay: bool) -> Response {
    (
        AppendHeaders([("HX-Trigger", CART_UPDATED_EVENT)]),
        CartPanelTemplate {
            cart: CartView::from(cart),
            close_overlay,
        },
    )
        .into_response()
}

/// Display the cart panel.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> impl IntoResponse {
    CartPanelTemplate {
        cart: CartView::from(&state.cart().snapshot()),
        close_overlay: false,
    }
}

/// Add one unit of a catalog product (HTMX).
///
/// The product must be in the loaded catalog. Closes the product overlay.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Form(form): Form<ProductForm>,
) -> Result<Response> {
    let product = state
        .catalog()
        .find(form.product_id)
        .await
        .ok_or(AppError::ProductNotFound(form.product_id))?;

    Ok(panel(&dispatch(&state, &CartCommand::Add(product)), true))
}

/// Add one unit to an existing line (HTMX).
#[instrument(skip(state))]
pub async fn increment(
    State(state): State<AppState>,
    Form(form): Form<ProductForm>,
) -> Response {
    panel(&dispatch(&state, &CartCommand::Increment(form.product_id)), false)
}

/// Remove one unit from an existing line, keeping at least one (HTMX).
#[instrument(skip(state))]
pub async fn decrement(
    State(state): State<AppState>,
    Form(form): Form<ProductForm>,
) -> Response {
    panel(&dispatch(&state, &CartCommand::Decrement(form.product_id)), false)
}

/// Empty the cart (HTMX).
#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Response {
    panel(&dispatch(&state, &CartCommand::Clear), false)
}

/// Get cart count badge (HTMX).
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> impl IntoResponse {
    CartCountTemplate {
        count: state.cart().snapshot().item_count(),
    }
}

/// Current cart snapshot as JSON.
#[instrument(skip(state))]
pub async fn snapshot(State(state): State<AppState>) -> Json<CartState> {
    Json(state.cart().snapshot())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopping_app_core::{Price, Product};

    fn product(id: i64, title: &str) -> Product {
        Product {
            id: ProductId::new(id),
            title: title.to_string(),
            price: Price::from_cents(1250),
            image: String::new(),
            description: String::new(),
        }
    }

    #[test]
    fn test_cart_view_from_state() {
        let cart = CartState::new()
            .apply(&CartCommand::Add(product(1, "Backpack")))
            .apply(&CartCommand::Add(product(1, "Backpack")))
            .apply(&CartCommand::Add(product(2, "T-Shirt")));

        let view = CartView::from(&cart);
        assert_eq!(view.item_count, 3);
        assert_eq!(view.items.len(), 2);
        assert_eq!(view.items.first().map(|i| i.quantity), Some(2));
        assert_eq!(view.items.first().map(|i| i.price.as_str()), Some("$12.50"));
    }

    #[test]
    fn test_empty_cart_view() {
        let view = CartView::from(&CartState::new());
        assert!(view.items.is_empty());
        assert_eq!(view.item_count, 0);
    }

    #[test]
    fn test_cart_panel_renders_lines() {
        let cart = CartState::new().apply(&CartCommand::Add(product(7, "Jacket")));
        let html = CartPanelTemplate {
            cart: CartView::from(&cart),
            close_overlay: true,
        }
        .render()
        .unwrap_or_default();

        assert!(html.contains("YOUR CART"));
        assert!(html.contains("Jacket (x1)"));
        assert!(html.contains("hx-swap-oob"));
    }
}
