//! # Refinement Filter
//!
//! Client-side narrowing of an already-fetched page by price, brand and
//! rating. This is stage two of the listing pipeline; stage one
//! (category, search, sort, pagination) happens at the catalog.
//!
//! ```text
//!   ProductPage.items ──► refine(&items, &filter) ──► visible products
//!          │
//!          └──► PageFacets::from_products ──► brand checkboxes, price slider
//! ```
//!
//! `refine` is total and side-effect free: it never fails, never reorders,
//! and returns the input unchanged for an empty filter.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::CoreResult;
use crate::money::Money;
use crate::types::Product;
use crate::validation::{validate_price_range, validate_rating};

// =============================================================================
// Price Range
// =============================================================================

/// Inclusive price bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Money,
    pub max: Money,
}

impl PriceRange {
    /// Builds a validated range.
    pub fn new(min: Money, max: Money) -> CoreResult<Self> {
        validate_price_range(min, max)?;
        Ok(PriceRange { min, max })
    }

    #[inline]
    pub fn contains(&self, price: Money) -> bool {
        self.min <= price && price <= self.max
    }

    /// True when this range excludes part of `bounds`.
    pub fn narrows(&self, bounds: &PriceRange) -> bool {
        self.min > bounds.min || self.max < bounds.max
    }
}

// =============================================================================
// Refinement Filter
// =============================================================================

/// Client-side filter criteria. Every criterion is optional.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RefinementFilter {
    #[serde(default)]
    pub price_range: Option<PriceRange>,

    /// Brands to keep, stored lowercased. Empty keeps every brand.
    #[serde(default)]
    brands: BTreeSet<String>,

    /// Minimum rating, inclusive. `None` or `0` keeps everything.
    #[serde(default)]
    pub min_rating: Option<f64>,
}

impl RefinementFilter {
    pub fn new() -> Self {
        RefinementFilter::default()
    }

    pub fn with_price_range(mut self, range: PriceRange) -> Self {
        self.price_range = Some(range);
        self
    }

    pub fn with_brand(mut self, brand: &str) -> Self {
        self.toggle_brand(brand, true);
        self
    }

    /// Sets the minimum rating after validating it.
    pub fn with_min_rating(mut self, rating: f64) -> CoreResult<Self> {
        validate_rating(rating)?;
        self.min_rating = Some(rating);
        Ok(self)
    }

    /// Checks or unchecks a brand. Matching ignores case.
    pub fn toggle_brand(&mut self, brand: &str, selected: bool) {
        let key = normalize_brand(brand);
        if key.is_empty() {
            return;
        }
        if selected {
            self.brands.insert(key);
        } else {
            self.brands.remove(&key);
        }
    }

    pub fn brands(&self) -> impl Iterator<Item = &str> {
        self.brands.iter().map(String::as_str)
    }

    pub fn has_brand_filter(&self) -> bool {
        !self.brands.is_empty()
    }

    fn effective_min_rating(&self) -> Option<f64> {
        self.min_rating.filter(|r| *r > 0.0)
    }

    /// True when no criterion would exclude anything.
    pub fn is_empty(&self) -> bool {
        self.price_range.is_none()
            && self.brands.is_empty()
            && self.effective_min_rating().is_none()
    }

    /// Resets every criterion.
    pub fn clear(&mut self) {
        *self = RefinementFilter::default();
    }

    /// Whether a single product passes every criterion.
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(range) = &self.price_range {
            if !range.contains(product.price()) {
                return false;
            }
        }

        if !self.brands.is_empty() && !self.brands.contains(&normalize_brand(&product.brand)) {
            return false;
        }

        if let Some(min) = self.effective_min_rating() {
            if product.rating < min {
                return false;
            }
        }

        true
    }
}

fn normalize_brand(brand: &str) -> String {
    brand.trim().to_lowercase()
}

/// Applies `filter` to `products`, preserving order.
///
/// ## Example
/// ```rust
/// use storefront_core::refine::{refine, RefinementFilter};
/// use storefront_core::types::{Product, ProductId};
///
/// let mut apple = Product::placeholder(ProductId::new(1), "iPhone");
/// apple.brand = "Apple".to_string();
/// let mut samsung = Product::placeholder(ProductId::new(2), "Galaxy");
/// samsung.brand = "Samsung".to_string();
///
/// let filter = RefinementFilter::new().with_brand("apple");
/// let visible = refine(&[apple, samsung], &filter);
/// assert_eq!(visible.len(), 1);
/// assert_eq!(visible[0].title, "iPhone");
/// ```
pub fn refine(products: &[Product], filter: &RefinementFilter) -> Vec<Product> {
    if filter.is_empty() {
        return products.to_vec();
    }
    products
        .iter()
        .filter(|p| filter.matches(p))
        .cloned()
        .collect()
}

// =============================================================================
// Facets
// =============================================================================

/// Filter options offered for the current (unrefined) page.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PageFacets {
    /// Distinct non-empty brands in first-seen order.
    pub brands: Vec<String>,
    /// Cheapest and dearest price on the page, `None` when empty.
    pub price_bounds: Option<PriceRange>,
}

impl PageFacets {
    pub fn from_products(products: &[Product]) -> Self {
        let mut brands: Vec<String> = Vec::new();
        for product in products {
            let brand = product.brand.trim();
            if brand.is_empty() {
                continue;
            }
            if !brands.iter().any(|b| b.eq_ignore_ascii_case(brand)) {
                brands.push(brand.to_string());
            }
        }

        let price_bounds = products
            .iter()
            .map(Product::price)
            .fold(None, |acc: Option<PriceRange>, price| {
                Some(match acc {
                    None => PriceRange {
                        min: price,
                        max: price,
                    },
                    Some(r) => PriceRange {
                        min: r.min.min(price),
                        max: r.max.max(price),
                    },
                })
            });

        PageFacets {
            brands,
            price_bounds,
        }
    }
}

/// Number of active filters, for the "Filters (n)" badge.
///
/// Counts a real category selection, a brand selection, a positive minimum
/// rating and a price range narrower than `bounds`.
pub fn active_filter_count(
    category: Option<&str>,
    filter: &RefinementFilter,
    bounds: Option<&PriceRange>,
) -> usize {
    let mut count = 0;

    if category
        .map(str::trim)
        .is_some_and(|c| !c.is_empty() && c != crate::query::ALL_CATEGORIES)
    {
        count += 1;
    }
    if filter.has_brand_filter() {
        count += 1;
    }
    if filter.effective_min_rating().is_some() {
        count += 1;
    }
    if let Some(range) = &filter.price_range {
        let narrows = match bounds {
            Some(b) => range.narrows(b),
            None => true,
        };
        if narrows {
            count += 1;
        }
    }

    count
}

// =============================================================================
// Unit Tests
// =============================================================================
