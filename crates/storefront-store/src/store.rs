//! # Cart Store
//!
//! The single authoritative cart for a session, passed explicitly to
//! whatever needs it.
//!
//! ## Mutation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  store.add_item(&product)                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CartState::apply(CartAction::Add)        (pure reducer, storefront-core)│
//! │       │ changed?                                                        │
//! │       ├── no  ──► return                                               │
//! │       ▼                                                                 │
//! │  persistence.save(&state)   failure: warn! and continue                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  subscribers(&state)        in subscription order, synchronously       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  notifier.notify(notice)    Added / Removed / Cleared                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Operations never fail. Persistence errors are logged and swallowed; the
//! in-memory state stays authoritative.

use std::fmt;
use std::sync::Arc;

use storefront_core::{CartAction, CartState, CartSummary, PricingPolicy, Product, ProductId};
use tracing::{debug, warn};

use crate::notify::{CartNotice, CartNotifier, NoOpNotifier};
use crate::persistence::{CartPersistence, NoPersistence};

/// Handle returned by [`CartStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&CartState) + Send>;

// =============================================================================
// Cart Store
// =============================================================================

pub struct CartStore {
    state: CartState,
    persistence: Box<dyn CartPersistence>,
    notifier: Arc<dyn CartNotifier>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl Default for CartStore {
    fn default() -> Self {
        CartStore::in_memory()
    }
}

impl CartStore {
    /// Store with no persistence and no notices. Starts empty.
    pub fn in_memory() -> Self {
        CartStore::with_state(
            CartState::new(),
            Box::new(NoPersistence),
            Arc::new(NoOpNotifier),
        )
    }

    /// Loads the persisted cart once and builds the store around it.
    ///
    /// ## Fallback
    /// Nothing stored, an undecodable record, a record that breaks cart
    /// invariants or an unreadable medium: all yield an empty cart. The
    /// cause is logged, never returned.
    pub fn restore(
        persistence: impl CartPersistence + 'static,
        notifier: Arc<dyn CartNotifier>,
    ) -> Self {
        let state = match persistence.load() {
            Ok(Some(state)) => {
                debug!(
                    lines = state.line_count(),
                    total_items = state.total_items(),
                    "Restored persisted cart"
                );
                state
            }
            Ok(None) => {
                debug!("No persisted cart, starting empty");
                CartState::new()
            }
            Err(e) if e.is_bad_record() => {
                debug!(error = %e, "Ignoring unusable persisted cart");
                CartState::new()
            }
            Err(e) => {
                warn!(error = %e, "Could not read persisted cart, starting empty");
                CartState::new()
            }
        };

        CartStore::with_state(state, Box::new(persistence), notifier)
    }

    fn with_state(
        state: CartState,
        persistence: Box<dyn CartPersistence>,
        notifier: Arc<dyn CartNotifier>,
    ) -> Self {
        CartStore {
            state,
            persistence,
            notifier,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub fn state(&self) -> &CartState {
        &self.state
    }

    /// Order summary for the current cart.
    pub fn summary(&self, policy: &PricingPolicy) -> CartSummary {
        CartSummary::compute(&self.state, policy)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds one unit of `product`. Always raises an `Added` notice.
    pub fn add_item(&mut self, product: &Product) {
        debug!(product_id = %product.id, "Adding to cart");
        let notice = CartNotice::Added {
            product_id: product.id,
            title: product.title.clone(),
        };
        self.dispatch(CartAction::Add(product.clone()), Some(notice));
    }

    /// Removes the product's line. Absent ids are a silent no-op.
    pub fn remove_item(&mut self, product_id: ProductId) {
        debug!(product_id = %product_id, "Removing from cart");
        self.dispatch(
            CartAction::Remove(product_id),
            Some(CartNotice::Removed { product_id }),
        );
    }

    /// Replaces a line's quantity; zero or less removes the line.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: i64) {
        debug!(product_id = %product_id, quantity, "Setting cart quantity");
        self.dispatch(
            CartAction::SetQuantity {
                product_id,
                quantity,
            },
            None,
        );
    }

    pub fn clear(&mut self) {
        debug!("Clearing cart");
        self.dispatch(CartAction::Clear, Some(CartNotice::Cleared));
    }

    /// Applies an action, then persists and notifies if the cart changed.
    ///
    /// `notice` is raised only for a real change; adds always change.
    fn dispatch(&mut self, action: CartAction, notice: Option<CartNotice>) {
        if !self.state.apply(&action) {
            debug!(action = ?action, "Cart action was a no-op");
            return;
        }

        if let Err(e) = self.persistence.save(&self.state) {
            warn!(error = %e, "Failed to persist cart; keeping in-memory state");
        }

        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.state);
        }

        if let Some(notice) = notice {
            self.notifier.notify(&notice);
        }
    }

    // =========================================================================
    // Subscriptions
    // =========================================================================

    /// Registers `listener` to be called with the new state after every
    /// change. Listeners run in subscription order.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&CartState) + Send + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Drops a listener. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
