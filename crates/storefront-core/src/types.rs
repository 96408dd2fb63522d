//! # Domain Types
//!
//! Catalog types consumed by the cart, the refinement filter and the
//! presentation layer.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────────┐   ┌─────────────────┐   ┌─────────────────┐   │
//! │  │      Product        │   │    Category     │   │  DiscountRate   │   │
//! │  │  ─────────────────  │   │  ─────────────  │   │  ─────────────  │   │
//! │  │  id (ProductId)     │   │  slug           │   │  bps (u32)      │   │
//! │  │  title, brand       │   │  name (display) │   │  1296 = 12.96%  │   │
//! │  │  price (Money)      │   │  url            │   └─────────────────┘   │
//! │  │  discountPercentage │   └─────────────────┘                         │
//! │  │  rating, stock      │                         ┌─────────────────┐   │
//! │  │  thumbnail, images  │                         │    TaxRate      │   │
//! │  └─────────────────────┘                         │  bps (u32)      │   │
//! │                                                  │  800 = 8%       │   │
//! │                                                  └─────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! Products are supplied by the remote catalog and are read-only here. The
//! cart keeps its own snapshot of each product it holds.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Product Id
// =============================================================================

/// Catalog identifier of a product. Unique across the catalog.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct ProductId(u32);

impl ProductId {
    #[inline]
    pub const fn new(id: u32) -> Self {
        ProductId(id)
    }

    #[inline]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        ProductId(id)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 800 bps = 8% (the flat demo rate shown on the cart summary)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Discount Rate
// =============================================================================

/// Percentage discount advertised by the catalog, in basis points.
///
/// The catalog sends `"discountPercentage": 12.96`; that becomes
/// `DiscountRate(1296)`. Values are clamped to 0–100%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct DiscountRate(u32);

impl DiscountRate {
    const MAX_BPS: u32 = 10_000;

    /// Creates a discount from basis points, clamped to 100%.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        if bps > Self::MAX_BPS {
            DiscountRate(Self::MAX_BPS)
        } else {
            DiscountRate(bps)
        }
    }

    /// Creates a discount from a percentage such as `12.96`.
    ///
    /// Negative and non-finite input clamp to zero.
    pub fn from_percentage(pct: f64) -> Self {
        if !pct.is_finite() || pct <= 0.0 {
            return DiscountRate(0);
        }
        DiscountRate::from_bps((pct * 100.0).round().min(Self::MAX_BPS as f64) as u32)
    }

    /// No discount.
    #[inline]
    pub const fn none() -> Self {
        DiscountRate(0)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Whole-percent label, e.g. `13` for 12.96%.
    pub fn rounded_percent(&self) -> u32 {
        (self.0 + 50) / 100
    }
}

impl Serialize for DiscountRate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.percentage())
    }
}

impl<'de> Deserialize<'de> for DiscountRate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let pct = f64::deserialize(deserializer)?;
        if pct.is_nan() {
            return Err(de::Error::custom("discount percentage must be a number"));
        }
        Ok(DiscountRate::from_percentage(pct))
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product as supplied by the catalog.
///
/// ## Tolerant Decoding
/// The catalog is a third party. Textual fields that may be missing
/// (`brand`, `description`, `thumbnail`, `images`) default to empty values
/// and unknown fields are ignored, so a catalog schema addition never breaks
/// listing or cart restoration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Unique catalog identifier.
    pub id: ProductId,

    /// Display name shown on cards and in the cart.
    pub title: String,

    #[serde(default)]
    pub description: String,

    /// Unit price before discount.
    #[ts(type = "number")]
    pub price: Money,

    /// Advertised discount (0–100%). Applied for display only.
    #[serde(default)]
    #[ts(type = "number")]
    pub discount_percentage: DiscountRate,

    /// Average review score, 0–5.
    #[serde(default)]
    pub rating: f64,

    /// Units available. The cart does not enforce this.
    #[serde(default)]
    pub stock: u32,

    #[serde(default)]
    pub brand: String,

    /// Category slug, e.g. `smartphones`.
    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub thumbnail: String,

    #[serde(default)]
    pub images: Vec<String>,
}

impl Product {
    /// Returns the undiscounted unit price.
    #[inline]
    pub fn price(&self) -> Money {
        self.price
    }

    /// Returns the unit price after the advertised discount.
    ///
    /// ## Example
    /// ```rust
    /// # use storefront_core::types::{DiscountRate, Product, ProductId};
    /// # use storefront_core::money::Money;
    /// let product = Product {
    ///     price: Money::from_cents(1000),
    ///     discount_percentage: DiscountRate::from_percentage(15.0),
    ///     ..Product::placeholder(ProductId::new(1), "Lipstick")
    /// };
    /// assert_eq!(product.discounted_price().cents(), 850);
    /// ```
    pub fn discounted_price(&self) -> Money {
        self.price.apply_discount(self.discount_percentage)
    }

    /// True when the catalog advertises any discount.
    #[inline]
    pub fn has_discount(&self) -> bool {
        !self.discount_percentage.is_zero()
    }

    /// Whole-percent badge text such as `"13% OFF"`, if discounted.
    pub fn discount_label(&self) -> Option<String> {
        self.has_discount()
            .then(|| format!("{}% OFF", self.discount_percentage.rounded_percent()))
    }

    #[inline]
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Checks whether `quantity` units fit within the advertised stock.
    ///
    /// Presentation code uses this to gate quantity pickers; the cart
    /// itself never clamps.
    pub fn can_fulfil(&self, quantity: u32) -> bool {
        quantity <= self.stock
    }

    /// Builds a minimal product with the given id and title.
    ///
    /// Handy for callers that need a stand-in (tests, demos); every other
    /// field takes its empty value and the price is zero.
    pub fn placeholder(id: ProductId, title: &str) -> Self {
        Product {
            id,
            title: title.to_string(),
            description: String::new(),
            price: Money::zero(),
            discount_percentage: DiscountRate::none(),
            rating: 0.0,
            stock: 0,
            brand: String::new(),
            category: String::new(),
            thumbnail: String::new(),
            images: Vec::new(),
        }
    }
}

// =============================================================================
// Category
// =============================================================================

/// A catalog category augmented with a display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Category {
    /// Identifier used in catalog routes, e.g. `home-decoration`.
    pub slug: String,

    /// Display name, e.g. `home decoration`.
    pub name: String,

    /// Listing URL for the category.
    pub url: String,
}

impl Category {
    /// Augments a bare slug returned by the catalog.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::types::Category;
    ///
    /// let category = Category::from_slug("mens-shirts", "https://dummyjson.com");
    /// assert_eq!(category.name, "mens shirts");
    /// assert_eq!(category.url, "https://dummyjson.com/products/category/mens-shirts");
    /// ```
    pub fn from_slug(slug: &str, base_url: &str) -> Self {
        Category {
            slug: slug.to_string(),
            name: display_name(slug),
            url: format!(
                "{}/products/category/{}",
                base_url.trim_end_matches('/'),
                slug
            ),
        }
    }
}

/// Turns a slug into a display name by replacing hyphens with spaces.
pub fn display_name(slug: &str) -> String {
    slug.replace('-', " ")
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const PHONE_JSON: &str = r#"{
        "id": 1,
        "title": "iPhone 9",
        "description": "An apple mobile which is nothing like apple",
        "price": 549,
        "discountPercentage": 12.96,
        "rating": 4.69,
        "stock": 94,
        "brand": "Apple",
        "category": "smartphones",
        "thumbnail": "https://cdn.dummyjson.com/product-images/1/thumbnail.jpg",
        "images": ["https://cdn.dummyjson.com/product-images/1/1.jpg"],
        "tags": ["ignored"]
    }"#;

    #[test]
    fn test_product_decodes_catalog_json() {
        let product: Product = serde_json::from_str(PHONE_JSON).unwrap();
        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.price.cents(), 54900);
        assert_eq!(product.discount_percentage.bps(), 1296);
        assert_eq!(product.stock, 94);
        assert_eq!(product.images.len(), 1);
    }

    #[test]
    fn test_product_tolerates_missing_optional_fields() {
        let product: Product =
            serde_json::from_str(r#"{"id": 2, "title": "Mascara", "price": 9.99}"#).unwrap();
        assert_eq!(product.brand, "");
        assert!(product.images.is_empty());
        assert!(!product.has_discount());
        assert!(!product.in_stock());
    }

    #[test]
    fn test_product_serializes_camel_case_decimals() {
        let product: Product = serde_json::from_str(PHONE_JSON).unwrap();
        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["discountPercentage"], serde_json::json!(12.96));
        assert_eq!(value["price"], serde_json::json!(549.0));
        assert_eq!(value["id"], serde_json::json!(1));
    }

    #[test]
    fn test_discounted_price_and_label() {
        let product: Product = serde_json::from_str(PHONE_JSON).unwrap();
        // 549.00 × 12.96% = 71.15 off
        assert_eq!(product.discounted_price().cents(), 47785);
        assert_eq!(product.discount_label().as_deref(), Some("13% OFF"));
    }

    #[test]
    fn test_discount_rate_clamps() {
        assert_eq!(DiscountRate::from_percentage(150.0).bps(), 10_000);
        assert_eq!(DiscountRate::from_percentage(-3.0).bps(), 0);
        assert_eq!(DiscountRate::from_bps(20_000).bps(), 10_000);
    }

    #[test]
    fn test_can_fulfil() {
        let mut product = Product::placeholder(ProductId::new(3), "Perfume");
        product.stock = 2;
        assert!(product.can_fulfil(2));
        assert!(!product.can_fulfil(3));
    }

    #[test]
    fn test_category_from_slug() {
        let category = Category::from_slug("home-decoration", "https://dummyjson.com/");
        assert_eq!(category.name, "home decoration");
        assert_eq!(
            category.url,
            "https://dummyjson.com/products/category/home-decoration"
        );
    }
}
