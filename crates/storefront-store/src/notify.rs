//! # Notification Port
//!
//! User-visible notices ("toasts") raised by cart mutations.
//!
//! ```text
//!   add_item     ──► Added { title }  ──► "<title> added to cart"
//!   remove_item  ──► Removed          ──► "Item removed from cart"
//!   clear        ──► Cleared          ──► "Cart cleared"
//!   set_quantity ──► (none)
//! ```

use serde::Serialize;
use storefront_core::ProductId;
use tracing::info;

/// A notice raised by a cart mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum CartNotice {
    Added { product_id: ProductId, title: String },
    Removed { product_id: ProductId },
    Cleared,
}

impl CartNotice {
    /// Text shown to the shopper.
    pub fn message(&self) -> String {
        match self {
            CartNotice::Added { title, .. } => format!("{} added to cart", title),
            CartNotice::Removed { .. } => "Item removed from cart".to_string(),
            CartNotice::Cleared => "Cart cleared".to_string(),
        }
    }
}

/// Receives cart notices (implemented by the presentation layer).
pub trait CartNotifier: Send + Sync {
    fn notify(&self, notice: &CartNotice);
}

/// Logs each notice at `info`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl CartNotifier for TracingNotifier {
    fn notify(&self, notice: &CartNotice) {
        info!(notice = ?notice, "{}", notice.message());
    }
}

/// Discards notices. Used when nothing displays them.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpNotifier;

impl CartNotifier for NoOpNotifier {
    fn notify(&self, _notice: &CartNotice) {}
}
