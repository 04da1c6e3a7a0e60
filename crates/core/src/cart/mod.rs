//! Cart lines and the pure cart reducer.
//!
//! The cart is an ordered list of [`CartLine`]s keyed by product ID. It only
//! changes through four commands:
//!
//! | Command | Effect |
//! |---------|--------|
//! | [`CartCommand::Add`] | Bump the product's line, or append a new line at quantity 1 |
//! | [`CartCommand::Increment`] | Bump an existing line; no-op if absent |
//! | [`CartCommand::Decrement`] | Lower an existing line, never below 1; no-op if absent |
//! | [`CartCommand::Clear`] | Drop every line |
//!
//! Lines are never removed individually. Decrementing at quantity 1 leaves
//! the line in place.

mod store;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Product, ProductId};

pub use store::CartStore;

/// One product entry in the cart plus its quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(flatten)]
    pub product: Product,
    /// Always >= 1 while the line exists.
    pub quantity: u32,
}

impl CartLine {
    fn new(product: Product) -> Self {
        Self {
            product,
            quantity: 1,
        }
    }

    /// The product ID this line is keyed by.
    #[must_use]
    pub const fn id(&self) -> ProductId {
        self.product.id
    }
}

/// A command issued against the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartCommand {
    /// Add one unit of a product.
    Add(Product),
    /// Add one unit to an existing line.
    Increment(ProductId),
    /// Remove one unit from an existing line, keeping at least one.
    Decrement(ProductId),
    /// Empty the cart.
    Clear,
}

impl CartCommand {
    /// Short name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Add(_) => "add_to_cart",
            Self::Increment(_) => "increment_quantity",
            Self::Decrement(_) => "decrement_quantity",
            Self::Clear => "clear_cart",
        }
    }
}

/// Snapshot of the cart.
///
/// Invariants: at most one line per product ID, and every line has a
/// quantity of at least 1.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartState {
    lines: Vec<CartLine>,
}

impl CartState {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Apply a command and return the resulting state.
    #[must_use]
    pub fn apply(mut self, command: &CartCommand) -> Self {
        self.reduce(command);
        self
    }

    /// Apply a command in place.
    ///
    /// Returns `true` if the state changed.
    pub fn reduce(&mut self, command: &CartCommand) -> bool {
        match command {
            CartCommand::Add(product) => self.add_to_cart(product.clone()),
            CartCommand::Increment(id) => self.increment_quantity(*id),
            CartCommand::Decrement(id) => self.decrement_quantity(*id),
            CartCommand::Clear => self.clear_cart(),
        }
    }

    /// Bump the product's line, or append a new line with quantity 1.
    pub fn add_to_cart(&mut self, product: Product) -> bool {
        if let Some(line) = self.line_mut(product.id) {
            return bump(line);
        }
        self.lines.push(CartLine::new(product));
        true
    }

    /// Bump an existing line. No-op if no line matches.
    pub fn increment_quantity(&mut self, id: ProductId) -> bool {
        self.line_mut(id).is_some_and(bump)
    }

    /// Lower an existing line by one if its quantity is above 1.
    pub fn decrement_quantity(&mut self, id: ProductId) -> bool {
        match self.line_mut(id) {
            Some(line) if line.quantity > 1 => {
                line.quantity -= 1;
                true
            }
            _ => false,
        }
    }

    /// Drop every line.
    pub fn clear_cart(&mut self) -> bool {
        let changed = !self.lines.is_empty();
        self.lines.clear();
        changed
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The line for a product, if present.
    #[must_use]
    pub fn line(&self, id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id() == id)
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of all line quantities, for the cart badge.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    fn line_mut(&mut self, id: ProductId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.id() == id)
    }
}

/// Quantity has no upper bound beyond what `u32` can hold.
fn bump(line: &mut CartLine) -> bool {
    match line.quantity.checked_add(1) {
        Some(quantity) => {
            line.quantity = quantity;
            true
        }
        None => false,
    }
}

// =============================================================================
// Textual Actions
// =============================================================================

/// Errors parsing a textual cart action.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandParseError {
    #[error("Unknown cart action '{0}' (expected add:<id>, inc:<id>, dec:<id> or clear)")]
    UnknownAction(String),
    #[error("Missing product ID in '{0}'")]
    MissingId(String),
    #[error("Invalid product ID in '{0}'")]
    InvalidId(String),
}

/// A cart command addressed by product ID only.
///
/// Written as `add:<id>`, `inc:<id>`, `dec:<id>` or `clear`. An `Add` must be
/// resolved against the catalog with [`CartAction::resolve`] before it can be
/// dispatched, since the cart stores the full product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartAction {
    Add(ProductId),
    Increment(ProductId),
    Decrement(ProductId),
    Clear,
}

impl CartAction {
    /// Turn this action into a dispatchable command.
    ///
    /// Returns `None` when an `Add` names a product the lookup cannot find.
    pub fn resolve<F>(self, lookup: F) -> Option<CartCommand>
    where
        F: FnOnce(ProductId) -> Option<Product>,
    {
        match self {
            Self::Add(id) => lookup(id).map(CartCommand::Add),
            Self::Increment(id) => Some(CartCommand::Increment(id)),
            Self::Decrement(id) => Some(CartCommand::Decrement(id)),
            Self::Clear => Some(CartCommand::Clear),
        }
    }
}

impl FromStr for CartAction {
    type Err = CommandParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("clear") {
            return Ok(Self::Clear);
        }

        let (verb, id) = s
            .split_once(':')
            .ok_or_else(|| CommandParseError::UnknownAction(s.to_string()))?;

        let build: fn(ProductId) -> Self = match verb.to_ascii_lowercase().as_str() {
            "add" => Self::Add,
            "inc" | "increment" => Self::Increment,
            "dec" | "decrement" => Self::Decrement,
            _ => return Err(CommandParseError::UnknownAction(s.to_string())),
        };

        if id.trim().is_empty() {
            return Err(CommandParseError::MissingId(s.to_string()));
        }
        let id = id
            .parse::<ProductId>()
            .map_err(|_| CommandParseError::InvalidId(s.to_string()))?;

        Ok(build(id))
    }
}

impl fmt::Display for CartAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add(id) => write!(f, "add:{id}"),
            Self::Increment(id) => write!(f, "inc:{id}"),
            Self::Decrement(id) => write!(f, "dec:{id}"),
            Self::Clear => f.write_str("clear"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::types::Price;

    fn product(id: i64) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            price: Price::from_cents(1000 + id),
            image: format!("https://img.example/{id}.jpg"),
            description: String::new(),
        }
    }

    fn quantities(state: &CartState) -> Vec<(i64, u32)> {
        state
            .lines()
            .iter()
            .map(|line| (line.id().as_i64(), line.quantity))
            .collect()
    }

    // =========================================================================
    // Add
    // =========================================================================

    #[test]
    fn test_add_to_empty_cart_creates_line() {
        let state = CartState::new().apply(&CartCommand::Add(product(1)));
        assert_eq!(quantities(&state), vec![(1, 1)]);
    }

    #[test]
    fn test_add_existing_product_increments_line() {
        let state = CartState::new()
            .apply(&CartCommand::Add(product(1)))
            .apply(&CartCommand::Add(product(1)));
        assert_eq!(quantities(&state), vec![(1, 2)]);
    }

    #[test]
    fn test_add_new_product_appends_in_order() {
        let mut state = CartState::new();
        for id in [3, 1, 2, 1] {
            state.reduce(&CartCommand::Add(product(id)));
        }
        assert_eq!(quantities(&state), vec![(3, 1), (1, 2), (2, 1)]);
    }

    #[test]
    fn test_add_keeps_one_line_per_product() {
        let mut state = CartState::new();
        for id in [1, 2, 1, 2, 1, 3] {
            let before = state.line(ProductId::new(id)).map(|l| l.quantity);
            let len_before = state.len();
            state.reduce(&CartCommand::Add(product(id)));
            let after = state.line(ProductId::new(id)).map(|l| l.quantity);
            match before {
                Some(q) => {
                    assert_eq!(after, Some(q + 1));
                    assert_eq!(state.len(), len_before);
                }
                None => {
                    assert_eq!(after, Some(1));
                    assert_eq!(state.len(), len_before + 1);
                }
            }
        }
    }

    #[test]
    fn test_add_keeps_first_seen_product_data() {
        let mut renamed = product(1);
        renamed.title = "Renamed".to_string();

        let state = CartState::new()
            .apply(&CartCommand::Add(product(1)))
            .apply(&CartCommand::Add(renamed));
        assert_eq!(state.lines()[0].product.title, "Product 1");
    }

    #[test]
    fn test_add_saturates_at_max_quantity() {
        let mut state = CartState::new().apply(&CartCommand::Add(product(1)));
        state.lines[0].quantity = u32::MAX;
        assert!(!state.add_to_cart(product(1)));
        assert_eq!(state.lines()[0].quantity, u32::MAX);
    }

    // =========================================================================
    // Increment / Decrement
    // =========================================================================

    #[test]
    fn test_increment_existing_line() {
        let mut state = CartState::new().apply(&CartCommand::Add(product(1)));
        assert!(state.reduce(&CartCommand::Increment(ProductId::new(1))));
        assert_eq!(quantities(&state), vec![(1, 2)]);
    }

    #[test]
    fn test_increment_absent_line_is_noop() {
        let mut state = CartState::new().apply(&CartCommand::Add(product(1)));
        let before = state.clone();
        assert!(!state.reduce(&CartCommand::Increment(ProductId::new(9))));
        assert_eq!(state, before);
    }

    #[test]
    fn test_decrement_at_one_is_noop() {
        let mut state = CartState::new().apply(&CartCommand::Add(product(1)));
        assert!(!state.reduce(&CartCommand::Decrement(ProductId::new(1))));
        assert_eq!(quantities(&state), vec![(1, 1)]);
    }

    #[test]
    fn test_decrement_lowers_quantity() {
        let state = CartState::new()
            .apply(&CartCommand::Add(product(1)))
            .apply(&CartCommand::Increment(ProductId::new(1)))
            .apply(&CartCommand::Increment(ProductId::new(1)))
            .apply(&CartCommand::Decrement(ProductId::new(1)));
        assert_eq!(quantities(&state), vec![(1, 2)]);
    }

    #[test]
    fn test_decrement_never_goes_below_one() {
        let mut state = CartState::new()
            .apply(&CartCommand::Add(product(1)))
            .apply(&CartCommand::Add(product(1)));
        for _ in 0..5 {
            state.reduce(&CartCommand::Decrement(ProductId::new(1)));
            assert!(state.lines().iter().all(|line| line.quantity >= 1));
        }
        assert_eq!(quantities(&state), vec![(1, 1)]);
    }

    #[test]
    fn test_decrement_absent_line_is_noop() {
        let mut state = CartState::new();
        assert!(!state.reduce(&CartCommand::Decrement(ProductId::new(1))));
        assert!(state.is_empty());
    }

    // =========================================================================
    // Clear
    // =========================================================================

    #[test]
    fn test_clear_empties_cart() {
        let mut state = CartState::new()
            .apply(&CartCommand::Add(product(1)))
            .apply(&CartCommand::Add(product(1)))
            .apply(&CartCommand::Add(product(1)))
            .apply(&CartCommand::Add(product(2)));
        assert_eq!(quantities(&state), vec![(1, 3), (2, 1)]);

        assert!(state.reduce(&CartCommand::Clear));
        assert!(state.is_empty());
    }

    #[test]
    fn test_clear_empty_cart_reports_no_change() {
        let mut state = CartState::new();
        assert!(!state.reduce(&CartCommand::Clear));
        assert!(state.is_empty());
    }

    #[test]
    fn test_item_count_sums_quantities() {
        let state = CartState::new()
            .apply(&CartCommand::Add(product(1)))
            .apply(&CartCommand::Add(product(1)))
            .apply(&CartCommand::Add(product(2)));
        assert_eq!(state.item_count(), 3);
        assert_eq!(state.len(), 2);
    }

    #[test]
    fn test_cart_line_serializes_flat() {
        let state = CartState::new().apply(&CartCommand::Add(product(4)));
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json[0]["id"], 4);
        assert_eq!(json[0]["quantity"], 1);
        assert_eq!(json[0]["title"], "Product 4");
    }

    // =========================================================================
    // Textual Actions
    // =========================================================================

    #[test]
    fn test_parse_actions() {
        assert_eq!(
            "add:1".parse::<CartAction>().unwrap(),
            CartAction::Add(ProductId::new(1))
        );
        assert_eq!(
            "INC:2".parse::<CartAction>().unwrap(),
            CartAction::Increment(ProductId::new(2))
        );
        assert_eq!(
            "decrement:3".parse::<CartAction>().unwrap(),
            CartAction::Decrement(ProductId::new(3))
        );
        assert_eq!("clear".parse::<CartAction>().unwrap(), CartAction::Clear);
    }

    #[test]
    fn test_parse_action_errors() {
        assert_eq!(
            "remove:1".parse::<CartAction>(),
            Err(CommandParseError::UnknownAction("remove:1".to_string()))
        );
        assert_eq!(
            "add".parse::<CartAction>(),
            Err(CommandParseError::UnknownAction("add".to_string()))
        );
        assert_eq!(
            "add:".parse::<CartAction>(),
            Err(CommandParseError::MissingId("add:".to_string()))
        );
        assert_eq!(
            "dec:x".parse::<CartAction>(),
            Err(CommandParseError::InvalidId("dec:x".to_string()))
        );
    }

    #[test]
    fn test_action_display_matches_parse() {
        for text in ["add:5", "inc:6", "dec:7", "clear"] {
            let action: CartAction = text.parse().unwrap();
            assert_eq!(action.to_string(), text);
        }
    }

    #[test]
    fn test_resolve_add_requires_known_product() {
        let known = CartAction::Add(ProductId::new(1)).resolve(|id| Some(product(id.as_i64())));
        assert_eq!(known, Some(CartCommand::Add(product(1))));

        let unknown = CartAction::Add(ProductId::new(1)).resolve(|_| None);
        assert_eq!(unknown, None);

        let clear = CartAction::Clear.resolve(|_| None);
        assert_eq!(clear, Some(CartCommand::Clear));
    }
}
