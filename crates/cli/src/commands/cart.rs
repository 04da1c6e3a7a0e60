//! Cart replay command.
//!
//! Fetches the catalog once, then applies each command to a fresh
//! in-memory cart in order and logs the final lines.
//!
//! # Usage
//!
//! ```bash
//! shop-cli cart replay add:1 add:1 add:2 dec:1 inc:2
//! ```

use shopping_app_core::{CartAction, CartState, CartStore, Product};
use shopping_app_storefront::catalog::CatalogError;
use thiserror::Error;
use tracing::info;
use url::Url;

use super::catalog;

/// Errors that can occur while replaying cart commands.
#[derive(Debug, Error)]
pub enum ReplayError {
    /// Fetching the catalog failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// An `add` named a product the catalog does not have.
    #[error("Cannot apply '{0}': product not in the catalog")]
    UnknownProduct(CartAction),
}

/// Replay cart commands against the remote catalog.
///
/// # Errors
///
/// Returns an error if the catalog cannot be fetched or an `add` names an
/// unknown product.
pub async fn replay(catalog_url: Url, actions: &[CartAction]) -> Result<(), ReplayError> {
    let products = catalog::fetch(catalog_url).await?;
    let cart = apply(&CartStore::new(), &products, actions)?;

    info!(
        "Cart: {} lines, {} items",
        cart.len(),
        cart.item_count()
    );
    for line in cart.lines() {
        info!(
            "  {:>4}  {} (x{})",
            line.id().as_i64(),
            line.product.title,
            line.quantity
        );
    }

    Ok(())
}

/// Dispatch each action to the store in order and return the final cart.
///
/// # Errors
///
/// Returns `ReplayError::UnknownProduct` on the first `add` whose product is
/// missing from `products`. Earlier actions stay applied.
pub fn apply(
    store: &CartStore,
    products: &[Product],
    actions: &[CartAction],
) -> Result<CartState, ReplayError> {
    for action in actions {
        let command = action
            .resolve(|id| catalog::find(products, id).cloned())
            .ok_or(ReplayError::UnknownProduct(*action))?;
        info!(action = %action, "Applying");
        store.dispatch(&command);
    }

    Ok(store.snapshot())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use shopping_app_core::{Price, ProductId};

    fn catalog() -> Vec<Product> {
        (1..=3)
            .map(|id| Product {
                id: ProductId::new(id),
                title: format!("Product {id}"),
                price: Price::from_cents(100 * id),
                image: String::new(),
                description: String::new(),
            })
            .collect()
    }

    fn actions(text: &[&str]) -> Vec<CartAction> {
        text.iter().map(|t| t.parse().unwrap()).collect()
    }

    #[test]
    fn test_replay_scenario() {
        let cart = apply(
            &CartStore::new(),
            &catalog(),
            &actions(&["add:1", "add:1", "add:2", "dec:1", "dec:1", "inc:2", "inc:9"]),
        )
        .unwrap();

        let lines: Vec<_> = cart
            .lines()
            .iter()
            .map(|line| (line.id().as_i64(), line.quantity))
            .collect();
        assert_eq!(lines, vec![(1, 1), (2, 2)]);
    }

    #[test]
    fn test_replay_clear() {
        let cart = apply(
            &CartStore::new(),
            &catalog(),
            &actions(&["add:1", "add:1", "add:1", "add:2", "clear"]),
        )
        .unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_replay_unknown_product_stops() {
        let store = CartStore::new();
        let err = apply(&store, &catalog(), &actions(&["add:1", "add:7", "add:2"])).unwrap_err();

        assert!(matches!(
            err,
            ReplayError::UnknownProduct(CartAction::Add(id)) if id == ProductId::new(7)
        ));
        assert_eq!(
            err.to_string(),
            "Cannot apply 'add:7': product not in the catalog"
        );
        assert_eq!(store.snapshot().len(), 1);
    }
}
