//! Catalog products as served by the remote catalog API.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// A catalog product.
///
/// Deserialized verbatim from the catalog endpoint and never modified after
/// that. Fields the screen does not use (`category`, `rating`, ...) are
/// ignored on input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    /// Image URL, passed through unvalidated.
    pub image: String,
    pub description: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_parses_catalog_payload() {
        let json = r#"{
            "id": 1,
            "title": "Fjallraven - Foldsack No. 1 Backpack, Fits 15 Laptops",
            "price": 109.95,
            "description": "Your perfect pack for everyday use and walks in the forest.",
            "category": "men's clothing",
            "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
            "rating": { "rate": 3.9, "count": 120 }
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.price, Price::from_cents(10995));
        assert!(product.image.ends_with(".jpg"));
    }

    #[test]
    fn test_product_missing_field_is_rejected() {
        let json = r#"{ "id": 2, "title": "No price", "image": "", "description": "" }"#;
        assert!(serde_json::from_str::<Product>(json).is_err());
    }
}
