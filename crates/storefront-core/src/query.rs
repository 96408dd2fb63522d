//! # Catalog Query Model
//!
//! What a listing asks the catalog for, and what comes back.
//!
//! ## Two-Stage Filter Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Stage 1: server side (ProductQuery, this module)                      │
//! │  ├── category slug     ─► /products/category/{slug}                    │
//! │  ├── search text       ─► /products/search?q=…                         │
//! │  ├── sort key + order  ─► sortBy / order (+ client-side page sort)     │
//! │  └── skip + limit      ─► pagination                                   │
//! │           │                                                             │
//! │           ▼  ProductPage { products, total, skip, limit }              │
//! │                                                                         │
//! │  Stage 2: client side (refine module)                                  │
//! │  └── price range, brand set, minimum rating                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::pagination::PageRequest;
use crate::types::Product;
use crate::validation::{validate_category_slug, validate_page_limit, validate_search_text};

/// Category value meaning "no category filter".
pub const ALL_CATEGORIES: &str = "all";

// =============================================================================
// Sorting
// =============================================================================

/// Field a listing can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum SortKey {
    Price,
    Rating,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Price => "price",
            SortKey::Rating => "rating",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "price" => Ok(SortKey::Price),
            "rating" => Ok(SortKey::Rating),
            other => Err(CoreError::UnknownSortKey(other.to_string())),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Asc),
            "desc" | "descending" => Ok(SortOrder::Desc),
            other => Err(CoreError::UnknownSortOrder(other.to_string())),
        }
    }
}

/// A sort key with its direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: SortKey,
    #[serde(default)]
    pub order: SortOrder,
}

impl SortSpec {
    pub const fn new(key: SortKey, order: SortOrder) -> Self {
        SortSpec { key, order }
    }

    fn compare(&self, a: &Product, b: &Product) -> Ordering {
        let ordering = match self.key {
            SortKey::Price => a.price.cmp(&b.price),
            SortKey::Rating => a.rating.total_cmp(&b.rating),
        };
        match self.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

/// Stable in-place sort of a fetched page.
///
/// Ties keep the catalog's order.
pub fn sort_products(products: &mut [Product], spec: SortSpec) {
    products.sort_by(|a, b| spec.compare(a, b));
}

// =============================================================================
// Product Query
// =============================================================================

/// Server-side listing parameters.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProductQuery {
    /// Category slug; `None` or `"all"` lists every category.
    #[serde(default)]
    pub category: Option<String>,

    /// Free-text search. Takes precedence over `category` when both are set.
    #[serde(default)]
    pub search: Option<String>,

    #[serde(default)]
    pub sort: Option<SortSpec>,

    #[serde(default)]
    pub page: PageRequest,
}

impl ProductQuery {
    /// Query for the first page of everything.
    pub fn new() -> Self {
        ProductQuery::default()
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_sort(mut self, key: SortKey, order: SortOrder) -> Self {
        self.sort = Some(SortSpec::new(key, order));
        self
    }

    pub fn with_page(mut self, page: PageRequest) -> Self {
        self.page = page;
        self
    }

    /// Category slug to filter on, ignoring empty values and `"all"`.
    pub fn category_filter(&self) -> Option<&str> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty() && *c != ALL_CATEGORIES)
    }

    /// Trimmed search text, ignoring blank values.
    pub fn search_text(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Validates the parameters before a request is built.
    pub fn validate(&self) -> CoreResult<()> {
        validate_page_limit(self.page.limit)?;
        if let Some(search) = self.search_text() {
            validate_search_text(search)?;
        }
        if let Some(category) = self.category_filter() {
            validate_category_slug(category)?;
        }
        Ok(())
    }
}

// =============================================================================
// Product Page
// =============================================================================

/// One page of catalog results.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProductPage {
    #[serde(rename = "products")]
    pub items: Vec<Product>,
    /// Total matches across all pages.
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub skip: u32,
    #[serde(default)]
    pub limit: u32,
}

impl ProductPage {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::ProductId;

    fn product(id: u32, price_cents: i64, rating: f64) -> Product {
        Product {
            price: Money::from_cents(price_cents),
            rating,
            ..Product::placeholder(ProductId::new(id), "Item")
        }
    }

    fn ids(products: &[Product]) -> Vec<u32> {
        products.iter().map(|p| p.id.get()).collect()
    }

    #[test]
    fn test_sort_key_parsing() {
        assert_eq!("price".parse::<SortKey>().unwrap(), SortKey::Price);
        assert_eq!("Rating".parse::<SortKey>().unwrap(), SortKey::Rating);
        assert!("title".parse::<SortKey>().is_err());

        assert_eq!("desc".parse::<SortOrder>().unwrap(), SortOrder::Desc);
        assert!("sideways".parse::<SortOrder>().is_err());
    }

    #[test]
    fn test_sort_by_price_both_directions() {
        let mut products = vec![product(1, 300, 4.0), product(2, 100, 3.0), product(3, 200, 5.0)];

        sort_products(&mut products, SortSpec::new(SortKey::Price, SortOrder::Asc));
        assert_eq!(ids(&products), vec![2, 3, 1]);

        sort_products(&mut products, SortSpec::new(SortKey::Price, SortOrder::Desc));
        assert_eq!(ids(&products), vec![1, 3, 2]);
    }

    #[test]
    fn test_sort_by_rating_is_stable() {
        let mut products = vec![product(1, 100, 4.5), product(2, 100, 4.9), product(3, 100, 4.5)];
        sort_products(&mut products, SortSpec::new(SortKey::Rating, SortOrder::Desc));
        assert_eq!(ids(&products), vec![2, 1, 3]);
    }

    #[test]
    fn test_category_filter_ignores_all_and_blank() {
        assert_eq!(ProductQuery::new().with_category("all").category_filter(), None);
        assert_eq!(ProductQuery::new().with_category("  ").category_filter(), None);
        assert_eq!(
            ProductQuery::new().with_category("laptops").category_filter(),
            Some("laptops")
        );
    }

    #[test]
    fn test_validate_rejects_bad_parameters() {
        let query = ProductQuery::new().with_page(PageRequest::new(0, 0));
        assert!(query.validate().is_err());

        let query = ProductQuery::new().with_category("Home Decor");
        assert!(query.validate().is_err());

        let query = ProductQuery::new().with_search("x".repeat(101));
        assert!(query.validate().is_err());

        let query = ProductQuery::new()
            .with_category("home-decoration")
            .with_search("lamp")
            .with_sort(SortKey::Price, SortOrder::Desc);
        assert!(query.validate().is_ok());
    }

    #[test]
    fn test_product_page_decodes_listing_envelope() {
        let json = r#"{
            "products": [{"id": 1, "title": "A", "price": 1.5}],
            "total": 100, "skip": 12, "limit": 12
        }"#;
        let page: ProductPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total, 100);
        assert_eq!(page.skip, 12);
    }
}
