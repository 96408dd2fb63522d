//! HttpCatalog against the in-process mock catalog.

mod common;

use std::sync::Arc;

use common::{MockCatalog, Override};
use storefront_catalog::{CatalogConfig, CatalogError, CatalogSource, HttpCatalog, Listing};
use storefront_core::refine::RefinementFilter;
use storefront_core::{PageRequest, ProductId, ProductQuery, SortKey, SortOrder};

fn client(mock: &MockCatalog) -> HttpCatalog {
    HttpCatalog::new(&CatalogConfig::new(mock.base_url())).unwrap()
}

fn ids(products: &[storefront_core::Product]) -> Vec<u32> {
    products.iter().map(|p| p.id.get()).collect()
}

#[tokio::test]
async fn test_lists_first_page() {
    let mock = MockCatalog::start().await;
    let catalog = client(&mock);

    let page = catalog
        .list_products(&ProductQuery::new().with_page(PageRequest::new(0, 3)))
        .await
        .unwrap();

    assert_eq!(ids(&page.items), vec![1, 2, 3]);
    assert_eq!(page.total, 5);
    assert_eq!(page.items[0].price.cents(), 54900);
    assert_eq!(page.items[0].discount_label().as_deref(), Some("13% OFF"));
    assert_eq!(mock.requests(), vec!["/products?limit=3&skip=0"]);
}

#[tokio::test]
async fn test_category_route_and_client_side_sort() {
    let mock = MockCatalog::start().await;
    let catalog = client(&mock);

    let query = ProductQuery::new()
        .with_category("smartphones")
        .with_sort(SortKey::Price, SortOrder::Desc);
    let page = catalog.list_products(&query).await.unwrap();

    assert_eq!(ids(&page.items), vec![3, 2, 1]);
    assert_eq!(
        mock.requests(),
        vec!["/products/category/smartphones?limit=12&skip=0&sortBy=price&order=desc"]
    );
}

#[tokio::test]
async fn test_search_route() {
    let mock = MockCatalog::start().await;
    let catalog = client(&mock);

    let query = ProductQuery::new().with_category("laptops").with_search("iphone");
    let page = catalog.list_products(&query).await.unwrap();

    assert_eq!(ids(&page.items), vec![1, 2]);
    assert!(mock.requests()[0].starts_with("/products/search?q=iphone&"));
}

#[tokio::test]
async fn test_tolerates_missing_and_unknown_fields() {
    let mock = MockCatalog::start().await;
    let product = client(&mock).get_product(ProductId::new(30)).await.unwrap();

    assert_eq!(product.title, "Key Holder");
    assert_eq!(product.brand, "");
    assert!(product.images.is_empty());
}

#[tokio::test]
async fn test_categories_are_augmented() {
    let mock = MockCatalog::start().await;
    let categories = client(&mock).list_categories().await.unwrap();

    assert_eq!(categories.len(), 3);
    assert_eq!(categories[2].slug, "home-decoration");
    assert_eq!(categories[2].name, "home decoration");
    assert_eq!(
        categories[2].url,
        format!("{}/products/category/home-decoration", mock.base_url())
    );
}

#[tokio::test]
async fn test_missing_product_is_a_status_error() {
    let mock = MockCatalog::start().await;
    let err = client(&mock)
        .get_product(ProductId::new(999))
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.user_message(), "Failed to fetch data. Please try again.");
}

#[tokio::test]
async fn test_server_error_is_not_retried() {
    let mock = MockCatalog::start().await;
    mock.set_override(Override::Status(503));

    let err = client(&mock)
        .list_products(&ProductQuery::new())
        .await
        .unwrap_err();

    assert!(matches!(err, CatalogError::Status { status: 503, .. }));
    assert_eq!(mock.requests().len(), 1);
}

#[tokio::test]
async fn test_bad_body_is_a_decode_error() {
    let mock = MockCatalog::start().await;
    mock.set_override(Override::RawBody("<html>oops</html>".into()));

    let err = client(&mock).list_categories().await.unwrap_err();
    assert!(matches!(err, CatalogError::Decode(_)));
    assert!(err.is_fetch_failure());
}

#[tokio::test]
async fn test_unreachable_catalog_is_a_transport_error() {
    // Reserve a port, then release it so nothing listens there.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();

    let catalog = HttpCatalog::new(&CatalogConfig::new(format!("http://{}", addr))).unwrap();
    let err = catalog.list_categories().await.unwrap_err();

    assert!(matches!(err, CatalogError::Transport(_)));
    assert_eq!(err.user_message(), "Failed to fetch data. Please try again.");
}

#[tokio::test]
async fn test_invalid_query_sends_nothing() {
    let mock = MockCatalog::start().await;
    let query = ProductQuery::new().with_page(PageRequest::new(0, 500));

    let err = client(&mock).list_products(&query).await.unwrap_err();
    assert!(matches!(err, CatalogError::InvalidQuery(_)));
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn test_listing_pipeline_over_http() {
    let mock = MockCatalog::start().await;
    let listing = Listing::new(Arc::new(client(&mock)));

    let filter = RefinementFilter::new().with_brand("apple").with_min_rating(4.5).unwrap();
    let view = listing
        .load(&ProductQuery::new(), &filter)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(ids(&view.visible), vec![1, 6]);
    assert_eq!(view.facets.brands, vec!["Apple", "Samsung"]);

    let home = listing.home().await.unwrap();
    assert_eq!(ids(&home.featured), vec![1, 6, 30]);
    assert_eq!(ids(&home.top_deals), vec![2, 3, 1, 6]);
}
