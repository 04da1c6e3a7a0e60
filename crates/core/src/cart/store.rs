//! Observable cart store.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use super::{CartCommand, CartState};

/// Shared handle to the cart.
///
/// Constructed explicitly and passed to whatever needs it; clones share the
/// same cart. Transitions are serialized by the channel's lock, so two
/// dispatches never interleave. Subscribers are woken only by dispatches
/// that changed the cart.
#[derive(Clone)]
pub struct CartStore {
    sender: Arc<watch::Sender<CartState>>,
}

impl CartStore {
    /// Create a store holding an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::with_state(CartState::new())
    }

    /// Create a store seeded with an existing snapshot.
    #[must_use]
    pub fn with_state(state: CartState) -> Self {
        let (sender, _) = watch::channel(state);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Apply a command and return the resulting snapshot.
    pub fn dispatch(&self, command: &CartCommand) -> CartState {
        let mut snapshot = CartState::new();
        let changed = self.sender.send_if_modified(|state| {
            let changed = state.reduce(command);
            snapshot.clone_from(state);
            changed
        });

        debug!(
            command = command.name(),
            changed,
            lines = snapshot.len(),
            "Cart command applied"
        );

        snapshot
    }

    /// The current cart.
    #[must_use]
    pub fn snapshot(&self) -> CartState {
        self.sender.borrow().clone()
    }

    /// Watch the cart for changes.
    ///
    /// The receiver starts with the current snapshot marked as seen.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CartState> {
        self.sender.subscribe()
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("lines", &self.sender.borrow().len())
            .finish()
    }
}
