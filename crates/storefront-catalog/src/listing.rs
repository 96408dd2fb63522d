//! # Listing Pipeline
//!
//! Page-level orchestration on top of a [`CatalogSource`].
//!
//! ## Two-Stage Filter Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Listing::load(query, filter)                                          │
//! │       │                                                                 │
//! │       ├── ticket = sequencer.issue()                                   │
//! │       ▼                                                                 │
//! │  Stage 1: source.list_products(query)     category/search/sort/page    │
//! │       │                                                                 │
//! │       ├── ticket stale?  ──► Ok(None)  (a newer load owns the view)     │
//! │       ▼                                                                 │
//! │  Stage 2: refine(page.items, filter)      price/brand/rating           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ListingView { visible, facets, page numbers }                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Also assembles the home page and the product detail page, which reuse
//! the same source and the curation helpers from `storefront-core`.

use std::sync::Arc;

use serde::Serialize;
use storefront_core::curate::{
    self, FEATURED_LIMIT, FEATURED_MIN_RATING, RELATED_LIMIT, TOP_DEALS_LIMIT,
};
use storefront_core::pagination::{self, total_pages};
use storefront_core::refine::{refine, PageFacets, RefinementFilter};
use storefront_core::{Category, PageRequest, Product, ProductId, ProductPage, ProductQuery};
use tracing::{debug, warn};

use crate::error::CatalogResult;
use crate::sequence::RequestSequencer;
use crate::source::CatalogSource;

/// Products fetched to pick the home page strips from.
pub const HOME_POOL_SIZE: u32 = 20;

// =============================================================================
// Views
// =============================================================================

/// Everything a product listing page renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingView {
    /// The page exactly as the catalog returned it.
    pub page: ProductPage,
    /// `page.items` after client-side refinement.
    pub visible: Vec<Product>,
    /// Filter options computed from the unrefined page.
    pub facets: PageFacets,
    pub current_page: u32,
    pub total_pages: u32,
    /// Page buttons to show.
    pub page_window: Vec<u32>,
}

impl ListingView {
    pub fn build(page: ProductPage, filter: &RefinementFilter) -> Self {
        let visible = refine(&page.items, filter);
        let facets = PageFacets::from_products(&page.items);

        let limit = if page.limit == 0 {
            page.items.len() as u32
        } else {
            page.limit
        };
        let current_page = PageRequest::new(page.skip, limit).page_number();
        let total_pages = total_pages(page.total, limit);
        let page_window =
            pagination::page_window(current_page, total_pages, pagination::PAGE_WINDOW_WIDTH);

        ListingView {
            page,
            visible,
            facets,
            current_page,
            total_pages,
            page_window,
        }
    }

    pub fn has_previous(&self) -> bool {
        pagination::has_previous(self.current_page)
    }

    pub fn has_next(&self) -> bool {
        pagination::has_next(self.current_page, self.total_pages)
    }
}

/// The home page strips.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomeView {
    pub categories: Vec<Category>,
    pub featured: Vec<Product>,
    pub top_deals: Vec<Product>,
}

/// A product with suggestions from its category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductDetailView {
    pub product: Product,
    pub related: Vec<Product>,
}

// =============================================================================
// Listing
// =============================================================================

pub struct Listing {
    source: Arc<dyn CatalogSource>,
    sequencer: RequestSequencer,
}

impl Listing {
    pub fn new(source: Arc<dyn CatalogSource>) -> Self {
        Listing {
            source,
            sequencer: RequestSequencer::new(),
        }
    }

    pub fn source(&self) -> &Arc<dyn CatalogSource> {
        &self.source
    }

    /// Fetches one page and refines it.
    ///
    /// Returns `Ok(None)` when another `load` started after this one; the
    /// newer call's result is the one to show. A stale failure is dropped
    /// the same way.
    pub async fn load(
        &self,
        query: &ProductQuery,
        filter: &RefinementFilter,
    ) -> CatalogResult<Option<ListingView>> {
        let ticket = self.sequencer.issue();
        let result = self.source.list_products(query).await;

        if !self.sequencer.is_current(ticket) {
            warn!(ticket = ticket.get(), "Discarding stale listing response");
            return Ok(None);
        }

        let view = ListingView::build(result?, filter);
        debug!(
            ticket = ticket.get(),
            fetched = view.page.items.len(),
            visible = view.visible.len(),
            "Listing loaded"
        );
        Ok(Some(view))
    }

    /// Categories, top-rated products and biggest discounts.
    pub async fn home(&self) -> CatalogResult<HomeView> {
        let pool_query = ProductQuery::new().with_page(PageRequest::new(0, HOME_POOL_SIZE));
        let (categories, pool) = tokio::try_join!(
            self.source.list_categories(),
            self.source.list_products(&pool_query)
        )?;

        Ok(HomeView {
            categories,
            featured: curate::featured(&pool.items, FEATURED_MIN_RATING, FEATURED_LIMIT),
            top_deals: curate::top_deals(&pool.items, TOP_DEALS_LIMIT),
        })
    }

    /// One product plus up to eight others from its category.
    ///
    /// Failing to load suggestions does not fail the page.
    pub async fn product_detail(&self, id: ProductId) -> CatalogResult<ProductDetailView> {
        let product = self.source.get_product(id).await?;

        let related = if product.category.is_empty() {
            Vec::new()
        } else {
            let query = ProductQuery::new()
                .with_category(product.category.clone())
                .with_page(PageRequest::new(0, RELATED_LIMIT as u32 + 1));
            match self.source.list_products(&query).await {
                Ok(page) => curate::related(&page.items, product.id, RELATED_LIMIT),
                Err(e) => {
                    warn!(product_id = %id, error = %e, "Could not load related products");
                    Vec::new()
                }
            }
        };

        Ok(ProductDetailView { product, related })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
