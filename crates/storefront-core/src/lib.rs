//! # storefront-core: Pure Business Logic for the Storefront
//!
//! This crate is the **heart** of the storefront. It holds the cart
//! reducer, pricing and every listing rule as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Storefront Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Presentation layer (out of tree)              │   │
//! │  │    Home ──► Listing ──► Product Detail ──► Cart ──► Checkout   │   │
//! │  └───────────────┬─────────────────────────────────┬───────────────┘   │
//! │                  │                                 │                    │
//! │  ┌───────────────▼───────────────┐ ┌───────────────▼───────────────┐   │
//! │  │   storefront-catalog          │ │   storefront-store            │   │
//! │  │   HTTP catalog, listing       │ │   CartStore, persistence,     │   │
//! │  │   pipeline, request ordering  │ │   subscribers, notices        │   │
//! │  └───────────────┬───────────────┘ └───────────────┬───────────────┘   │
//! │                  │                                 │                    │
//! │  ┌───────────────▼─────────────────────────────────▼───────────────┐   │
//! │  │               ★ storefront-core (THIS CRATE) ★                  │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐  │   │
//! │  │   │  types  │ │  money  │ │  cart   │ │ refine  │ │  query  │  │   │
//! │  │   │ Product │ │  Money  │ │CartState│ │ Filter  │ │ Sorting │  │   │
//! │  │   │Category │ │   Tax   │ │ Summary │ │ Facets  │ │  Pages  │  │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └─────────┘ └─────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Catalog types (Product, Category, ids and rates)
//! - [`money`] - Money type with integer arithmetic
//! - [`cart`] - Cart reducer with derived totals
//! - [`summary`] - Discount, tax and shipping for the cart page
//! - [`query`] - Server-side listing parameters and sorting
//! - [`refine`] - Client-side refinement filter and facets
//! - [`curate`] - Featured, top deals and related selections
//! - [`pagination`] - Page arithmetic
//! - [`validation`] - Parameter validation
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input, same output
//! 2. **No I/O**: storage and network live in sibling crates
//! 3. **Integer Money**: amounts are cents internally, decimals on the wire
//! 4. **Total Cart Operations**: invalid cart arguments are no-ops, not errors
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::cart::CartState;
//! use storefront_core::money::Money;
//! use storefront_core::types::{Product, ProductId};
//!
//! let phone = Product {
//!     price: Money::from_decimal(549.0),
//!     ..Product::placeholder(ProductId::new(1), "iPhone 9")
//! };
//!
//! let mut cart = CartState::new();
//! cart.add_item(&phone);
//! cart.add_item(&phone);
//!
//! assert_eq!(cart.total_items(), 2);
//! assert_eq!(cart.total_price().cents(), 109_800);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod curate;
pub mod error;
pub mod money;
pub mod pagination;
pub mod query;
pub mod refine;
pub mod summary;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use storefront_core::Money` instead of
// `use storefront_core::money::Money`

pub use cart::{CartAction, CartLine, CartRecord, CartState, CartTotals};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pagination::PageRequest;
pub use query::{ProductPage, ProductQuery, SortKey, SortOrder, SortSpec};
pub use refine::{PageFacets, PriceRange, RefinementFilter};
pub use summary::{CartSummary, LinePricing, PricingPolicy};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Storage key the cart record is persisted under.
pub const CART_STORAGE_KEY: &str = "cart";

/// Products per listing page.
pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// Largest page the catalog is asked for.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Longest accepted search text, in characters.
pub const MAX_SEARCH_LENGTH: usize = 100;

/// Top of the catalog's rating scale.
pub const MAX_RATING: f64 = 5.0;

/// Largest quantity a quantity picker should offer.
///
/// ## Business Reason
/// Guards against typing 1000 instead of 10. Only [`validation`] enforces
/// it; the cart reducer itself accepts any positive quantity.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Flat demo tax rate: 8%.
pub const DEMO_TAX_RATE_BPS: u32 = 800;

/// Orders strictly above $100.00 ship free.
pub const FREE_SHIPPING_THRESHOLD: Money = Money::from_cents(10_000);

/// Shipping fee below the free-shipping threshold.
pub const FLAT_SHIPPING_FEE: Money = Money::from_cents(1_000);
