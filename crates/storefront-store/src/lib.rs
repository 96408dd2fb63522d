//! # storefront-store: The Session Cart
//!
//! Wraps the pure cart reducer from `storefront-core` with everything a
//! running session needs around it: restore on startup, persist on change,
//! subscriber callbacks and user-visible notices.
//!
//! ## Module Organization
//! - [`store`] - `CartStore`, the explicit store container
//! - [`persistence`] - Storage port with memory and file adapters
//! - [`notify`] - Notice port ("added to cart", "cart cleared")
//! - [`error`] - Persistence error types
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use storefront_core::{Money, Product, ProductId};
//! use storefront_store::{CartStore, MemoryStorage, NoOpNotifier, StoragePersistence};
//!
//! let mut store = CartStore::restore(
//!     StoragePersistence::new(MemoryStorage::new()),
//!     Arc::new(NoOpNotifier),
//! );
//!
//! let mug = Product {
//!     price: Money::from_cents(450),
//!     ..Product::placeholder(ProductId::new(7), "Mug")
//! };
//! store.add_item(&mug);
//! store.add_item(&mug);
//!
//! assert_eq!(store.state().total_items(), 2);
//! assert_eq!(store.state().total_price().cents(), 900);
//! ```

pub mod error;
pub mod notify;
pub mod persistence;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use notify::{CartNotice, CartNotifier, NoOpNotifier, TracingNotifier};
pub use persistence::{
    CartPersistence, FileStorage, KeyValueStorage, MemoryStorage, NoPersistence,
    StoragePersistence,
};
pub use store::{CartStore, SubscriptionId};
