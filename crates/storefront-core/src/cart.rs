//! # Cart Reducer
//!
//! The cart state machine: line items, quantities and derived totals.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Transitions                               │
//! │                                                                         │
//! │  Action                         Line Sequence Change                    │
//! │  ──────                         ────────────────────                    │
//! │                                                                         │
//! │  Add(product) ────────────────► qty += 1   or   push(product, 1)       │
//! │                                                                         │
//! │  SetQuantity(id, n > 0) ──────► lines[id].qty = n  (absent: no-op)     │
//! │                                                                         │
//! │  SetQuantity(id, n <= 0) ─────┐                                         │
//! │                               ├► retain(line.id != id)  (absent: no-op)│
//! │  Remove(id) ──────────────────┘                                         │
//! │                                                                         │
//! │  Clear ───────────────────────► lines = []                              │
//! │                                                                         │
//! │  After EVERY action: totals = compute_totals(lines)                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one line per product id
//! - Every line has quantity >= 1
//! - `total_items` and `total_price` are always exactly
//!   `compute_totals(lines)`; they are never adjusted incrementally
//!
//! All operations are total: unknown ids are no-ops, never errors.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use ts_rs::TS;

use crate::error::CoreError;
use crate::money::Money;
use crate::types::{Product, ProductId};

// =============================================================================
// Cart Line
// =============================================================================

/// One distinct product in the cart with its quantity.
///
/// ## Snapshot
/// `product` is a frozen copy captured when the line was created. It is not
/// re-fetched, so the cart keeps displaying (and totalling) the price the
/// shopper saw even if the catalog changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    fn new(product: Product) -> Self {
        CartLine {
            product,
            quantity: 1,
        }
    }

    #[inline]
    pub fn product_id(&self) -> ProductId {
        self.product.id
    }

    /// Unit price × quantity, before any discount.
    pub fn line_total(&self) -> Money {
        self.product.price().multiply_quantity(self.quantity)
    }

    /// True when the quantity is above the stock captured in the snapshot.
    pub fn exceeds_stock(&self) -> bool {
        !self.product.can_fulfil(self.quantity)
    }
}

// =============================================================================
// Derived Totals
// =============================================================================

/// Totals derived from a line sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CartTotals {
    pub total_items: u64,
    pub total_price: Money,
}

/// Computes totals from scratch.
///
/// `total_items = Σ quantity`, `total_price = Σ unit price × quantity`.
/// Carts are small; recomputing in full on every mutation keeps the totals
/// from ever drifting away from the lines.
pub fn compute_totals(lines: &[CartLine]) -> CartTotals {
    lines.iter().fold(CartTotals::default(), |acc, line| CartTotals {
        total_items: acc.total_items.saturating_add(u64::from(line.quantity)),
        total_price: acc.total_price + line.line_total(),
    })
}

// =============================================================================
// Cart Action
// =============================================================================

/// A mutation request against the cart.
#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    /// Add one unit of the product (snapshot taken from the value given).
    Add(Product),
    /// Remove the product's line entirely.
    Remove(ProductId),
    /// Replace the quantity; zero or negative removes the line.
    SetQuantity { product_id: ProductId, quantity: i64 },
    /// Discard every line.
    Clear,
}

// =============================================================================
// Cart State
// =============================================================================

/// The authoritative cart: ordered lines plus derived totals.
///
/// Serializes to the persisted record shape
/// `{ items: [{product, quantity}], totalItems, totalPrice }`.
/// Restoring goes through [`CartRecord`] so stored totals are never trusted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartState {
    items: Vec<CartLine>,
    #[ts(type = "number")]
    total_items: u64,
    #[ts(type = "number")]
    total_price: Money,
}

impl CartState {
    /// Creates an empty cart.
    pub fn new() -> Self {
        CartState::default()
    }

    /// Builds a cart from a line sequence, validating the invariants and
    /// deriving the totals.
    pub fn from_lines(items: Vec<CartLine>) -> Result<Self, CoreError> {
        let mut seen = HashSet::with_capacity(items.len());
        for line in &items {
            if line.quantity == 0 {
                return Err(CoreError::InconsistentCart {
                    reason: format!("product {} has quantity 0", line.product_id()),
                });
            }
            if !seen.insert(line.product_id()) {
                return Err(CoreError::DuplicateLine(line.product_id()));
            }
        }

        let mut state = CartState {
            items,
            ..CartState::default()
        };
        state.recompute();
        Ok(state)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Applies an action. Returns `true` if the cart changed.
    pub fn apply(&mut self, action: &CartAction) -> bool {
        match action {
            CartAction::Add(product) => {
                self.add_item(product);
                true
            }
            CartAction::Remove(product_id) => self.remove_item(*product_id),
            CartAction::SetQuantity {
                product_id,
                quantity,
            } => self.set_quantity(*product_id, *quantity),
            CartAction::Clear => self.clear(),
        }
    }

    /// Adds one unit of `product`.
    ///
    /// ## Behavior
    /// - Product already in cart: quantity + 1 (snapshot is kept as-is)
    /// - Product not in cart: new line with quantity 1 appended at the end
    /// - No stock check: gating on `product.stock` is the caller's job
    pub fn add_item(&mut self, product: &Product) {
        match self.line_mut(product.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => self.items.push(CartLine::new(product.clone())),
        }
        self.recompute();
    }

    /// Removes the line for `product_id`. Returns `true` if one was removed.
    pub fn remove_item(&mut self, product_id: ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|line| line.product_id() != product_id);
        let removed = self.items.len() != before;
        self.recompute();
        removed
    }

    /// Replaces the quantity of the line for `product_id`.
    ///
    /// ## Behavior
    /// - `quantity <= 0`: identical to [`CartState::remove_item`]
    /// - Product not in cart: no-op
    /// - No clamping against stock; only against the `u32` range
    ///
    /// Returns `true` if the cart changed.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove_item(product_id);
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        let changed = match self.line_mut(product_id) {
            Some(line) if line.quantity != quantity => {
                line.quantity = quantity;
                true
            }
            _ => false,
        };
        self.recompute();
        changed
    }

    /// Resets to the empty state. Returns `true` if anything was discarded.
    pub fn clear(&mut self) -> bool {
        let had_items = !self.items.is_empty();
        *self = CartState::new();
        had_items
    }

    fn line_mut(&mut self, product_id: ProductId) -> Option<&mut CartLine> {
        self.items
            .iter_mut()
            .find(|line| line.product_id() == product_id)
    }

    fn recompute(&mut self) {
        let totals = compute_totals(&self.items);
        self.total_items = totals.total_items;
        self.total_price = totals.total_price;
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.items
    }

    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.items
            .iter()
            .find(|line| line.product_id() == product_id)
    }

    pub fn contains(&self, product_id: ProductId) -> bool {
        self.line(product_id).is_some()
    }

    /// Quantity of `product_id` in the cart (0 if absent).
    pub fn quantity_of(&self, product_id: ProductId) -> u32 {
        self.line(product_id).map_or(0, |line| line.quantity)
    }

    /// Number of distinct products.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Σ quantity.
    pub fn total_items(&self) -> u64 {
        self.total_items
    }

    /// Σ unit price × quantity, before discounts.
    pub fn total_price(&self) -> Money {
        self.total_price
    }

    pub fn totals(&self) -> CartTotals {
        CartTotals {
            total_items: self.total_items,
            total_price: self.total_price,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Checks every invariant against a fresh recomputation.
    pub fn is_consistent(&self) -> bool {
        let mut seen = HashSet::new();
        self.items
            .iter()
            .all(|line| line.quantity >= 1 && seen.insert(line.product_id()))
            && compute_totals(&self.items) == self.totals()
    }
}

// =============================================================================
// Persisted Record
// =============================================================================

/// Raw persisted cart shape.
///
/// Stored totals are accepted for shape compatibility but ignored: the
/// restored state always derives its own.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartRecord {
    pub items: Vec<CartLine>,
    #[serde(default)]
    pub total_items: Option<u64>,
    #[serde(default)]
    pub total_price: Option<Money>,
}

impl TryFrom<CartRecord> for CartState {
    type Error = CoreError;

    fn try_from(record: CartRecord) -> Result<Self, Self::Error> {
        CartState::from_lines(record.items)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
