//! # storefront-demo
//!
//! Headless walkthrough: restore the cart, browse the catalog, refine a
//! listing, add a deal to the cart and print the order summary.
//!
//! ## Usage
//! ```text
//! storefront-demo [CONFIG_PATH]
//!
//! RUST_LOG=debug STOREFRONT_CATALOG_URL=http://localhost:4000 storefront-demo
//! ```

mod config;

use std::path::PathBuf;
use std::sync::Arc;

use storefront_catalog::{HttpCatalog, Listing};
use storefront_core::pagination::PageRequest;
use storefront_core::refine::RefinementFilter;
use storefront_core::{ProductQuery, SortKey, SortOrder};
use storefront_store::{
    CartPersistence, CartStore, FileStorage, MemoryStorage, StoragePersistence, TracingNotifier,
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = AppConfig::load_or_default(config_path);
    info!(
        catalog = %config.catalog.base_url,
        page_size = config.catalog.page_size,
        "Starting storefront demo"
    );

    // Cart
    let mut store = CartStore::restore(persistence_for(&config), Arc::new(TracingNotifier));
    store.subscribe(|cart| {
        info!(
            items = cart.total_items(),
            total = %cart.total_price(),
            "Cart badge updated"
        );
    });
    info!(
        lines = store.state().line_count(),
        total = %store.state().total_price(),
        "Cart restored"
    );

    // Catalog
    let catalog = HttpCatalog::new(&config.catalog)?;
    let listing = Listing::new(Arc::new(catalog));

    let home = match listing.home().await {
        Ok(home) => home,
        Err(e) => {
            error!(error = %e, "{}", e.user_message());
            return Ok(());
        }
    };
    info!(
        categories = home.categories.len(),
        featured = home.featured.len(),
        "Home page loaded"
    );
    for category in home.categories.iter().take(5) {
        info!(slug = %category.slug, name = %category.name, "Category");
    }

    // Listing: first category, cheapest first, rated 4+.
    let query = ProductQuery::new()
        .with_sort(SortKey::Price, SortOrder::Asc)
        .with_page(PageRequest::for_page(1, config.catalog.page_size));
    let query = match home.categories.first() {
        Some(category) => query.with_category(category.slug.clone()),
        None => query,
    };
    let filter = RefinementFilter::new().with_min_rating(4.0)?;

    match listing.load(&query, &filter).await {
        Ok(Some(view)) => {
            info!(
                fetched = view.page.items.len(),
                visible = view.visible.len(),
                page = view.current_page,
                pages = view.total_pages,
                brands = ?view.facets.brands,
                "Listing loaded"
            );
            for product in &view.visible {
                info!(
                    id = %product.id,
                    title = %product.title,
                    price = %product.price(),
                    badge = %product.discount_label().unwrap_or_default(),
                    "Product"
                );
            }
        }
        Ok(None) => warn!("Listing superseded by a newer request"),
        Err(e) => error!(error = %e, "{}", e.user_message()),
    }

    // Cart: add the best deal twice, then view the summary.
    if let Some(deal) = home.top_deals.first() {
        match listing.product_detail(deal.id).await {
            Ok(detail) => {
                info!(
                    title = %detail.product.title,
                    related = detail.related.len(),
                    "Product detail loaded"
                );
                if detail.product.can_fulfil(store.state().quantity_of(deal.id) + 2) {
                    store.add_item(&detail.product);
                    store.add_item(&detail.product);
                } else {
                    warn!(product_id = %deal.id, "Not enough stock to add");
                }
            }
            Err(e) => error!(error = %e, "{}", e.user_message()),
        }
    }

    let summary = store.summary(&config.pricing);
    info!(
        items = summary.total_items,
        subtotal = %summary.subtotal,
        savings = %summary.savings,
        tax = %summary.tax,
        shipping = %summary.shipping,
        total = %summary.grand_total,
        free_shipping = summary.qualifies_for_free_shipping,
        "Order summary"
    );

    Ok(())
}

/// File-backed persistence when a data directory is known, else in-memory.
fn persistence_for(config: &AppConfig) -> Box<dyn CartPersistence> {
    match config.storage.resolve_data_dir() {
        Some(dir) => {
            info!(dir = %dir.display(), "Persisting cart to disk");
            Box::new(StoragePersistence::new(FileStorage::new(dir)))
        }
        None => {
            warn!("No data directory available; cart will not survive restarts");
            Box::new(StoragePersistence::new(MemoryStorage::new()))
        }
    }
}

/// Initializes the tracing subscriber.
///
/// Reads `RUST_LOG`, defaulting to `info,storefront=debug`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,storefront=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}
