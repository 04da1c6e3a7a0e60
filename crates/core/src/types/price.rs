//! Type-safe price representation using decimal arithmetic.
//!
//! Catalog prices arrive as bare JSON numbers in a single implied currency,
//! so `Price` carries only the amount. It is never summed or taxed; the cart
//! keeps no derived totals.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A catalog price in the store's currency (dollars, not cents).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from an integer number of cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    /// Format for display (e.g., "$19.99").
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_price_display_pads_to_cents() {
        assert_eq!(Price::from_cents(1995).to_string(), "$19.95");
        assert_eq!(Price::new(Decimal::new(22, 0)).to_string(), "$22.00");
        assert_eq!(Price::new(Decimal::new(1093, 1)).to_string(), "$109.30");
    }

    #[test]
    fn test_price_deserializes_from_json_number() {
        let price: Price = serde_json::from_str("109.95").unwrap();
        assert_eq!(price, Price::from_cents(10995));

        let whole: Price = serde_json::from_str("64").unwrap();
        assert_eq!(whole, Price::from_cents(6400));
    }

    #[test]
    fn test_price_serializes_as_number() {
        let value = serde_json::to_value(Price::from_cents(1599)).unwrap();
        assert!(value.is_number());
    }
}
