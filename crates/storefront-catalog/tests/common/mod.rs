//! In-process mock of the catalog HTTP API for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// What every route answers with, regardless of the request.
#[derive(Debug, Clone)]
pub enum Override {
    Status(u16),
    RawBody(String),
}

#[derive(Clone)]
struct MockState {
    products: Arc<Vec<Value>>,
    requests: Arc<Mutex<Vec<String>>>,
    override_response: Arc<Mutex<Option<Override>>>,
}

/// Mock catalog bound to an ephemeral localhost port.
pub struct MockCatalog {
    pub addr: SocketAddr,
    state: MockState,
    shutdown: tokio::sync::watch::Sender<bool>,
}

impl MockCatalog {
    pub async fn start() -> Self {
        let state = MockState {
            products: Arc::new(fixture_products()),
            requests: Arc::new(Mutex::new(Vec::new())),
            override_response: Arc::new(Mutex::new(None)),
        };

        let (shutdown_tx, mut shutdown_rx) = tokio::sync::watch::channel(false);

        let app = Router::new()
            .route("/products", get(list_all))
            .route("/products/search", get(search))
            .route("/products/categories", get(categories))
            .route("/products/category/{slug}", get(by_category))
            .route("/products/{id}", get(single))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock catalog");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.changed().await;
                })
                .await
                .ok();
        });

        MockCatalog {
            addr,
            state,
            shutdown: shutdown_tx,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Path and query of every request received so far.
    pub fn requests(&self) -> Vec<String> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn set_override(&self, response: Override) {
        *self.state.override_response.lock().unwrap() = Some(response);
    }

    pub fn shutdown(&self) {
        let _ = self.shutdown.send(true);
    }
}

impl Drop for MockCatalog {
    fn drop(&mut self) {
        self.shutdown();
    }
}

// =============================================================================
// Handlers
// =============================================================================

fn record(state: &MockState, uri: &Uri) -> Option<Response> {
    state.requests.lock().unwrap().push(
        uri.path_and_query()
            .map(|pq| pq.to_string())
            .unwrap_or_default(),
    );

    match state.override_response.lock().unwrap().clone() {
        Some(Override::Status(code)) => {
            let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            Some((status, Json(json!({ "message": "mock failure" }))).into_response())
        }
        Some(Override::RawBody(body)) => Some(
            (
                StatusCode::OK,
                [("content-type", "application/json")],
                body,
            )
                .into_response(),
        ),
        None => None,
    }
}

fn paginate(items: Vec<Value>, params: &HashMap<String, String>) -> Value {
    let limit: usize = params.get("limit").and_then(|v| v.parse().ok()).unwrap_or(30);
    let skip: usize = params.get("skip").and_then(|v| v.parse().ok()).unwrap_or(0);
    let total = items.len();
    let page: Vec<Value> = items.into_iter().skip(skip).take(limit).collect();
    json!({ "products": page, "total": total, "skip": skip, "limit": limit })
}

async fn list_all(
    State(state): State<MockState>,
    uri: Uri,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if let Some(response) = record(&state, &uri) {
        return response;
    }
    Json(paginate(state.products.to_vec(), &params)).into_response()
}

async fn search(
    State(state): State<MockState>,
    uri: Uri,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if let Some(response) = record(&state, &uri) {
        return response;
    }
    let needle = params.get("q").cloned().unwrap_or_default().to_lowercase();
    let matches = state
        .products
        .iter()
        .filter(|p| {
            p["title"]
                .as_str()
                .unwrap_or_default()
                .to_lowercase()
                .contains(&needle)
        })
        .cloned()
        .collect();
    Json(paginate(matches, &params)).into_response()
}

async fn categories(State(state): State<MockState>, uri: Uri) -> Response {
    if let Some(response) = record(&state, &uri) {
        return response;
    }
    Json(json!(["smartphones", "laptops", "home-decoration"])).into_response()
}

async fn by_category(
    State(state): State<MockState>,
    uri: Uri,
    Path(slug): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if let Some(response) = record(&state, &uri) {
        return response;
    }
    let matches = state
        .products
        .iter()
        .filter(|p| p["category"] == slug.as_str())
        .cloned()
        .collect();
    Json(paginate(matches, &params)).into_response()
}

async fn single(State(state): State<MockState>, uri: Uri, Path(id): Path<String>) -> Response {
    if let Some(response) = record(&state, &uri) {
        return response;
    }
    let found = id
        .parse::<u64>()
        .ok()
        .and_then(|id| state.products.iter().find(|p| p["id"] == id).cloned());
    match found {
        Some(product) => Json(product).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": format!("Product with id '{}' not found", id) })),
        )
            .into_response(),
    }
}

// =============================================================================
// Fixtures
// =============================================================================

fn fixture_products() -> Vec<Value> {
    vec![
        json!({
            "id": 1, "title": "iPhone 9", "description": "An apple mobile",
            "price": 549, "discountPercentage": 12.96, "rating": 4.69, "stock": 94,
            "brand": "Apple", "category": "smartphones",
            "thumbnail": "https://cdn.dummyjson.com/1/thumbnail.jpg",
            "images": ["https://cdn.dummyjson.com/1/1.jpg"]
        }),
        json!({
            "id": 2, "title": "iPhone X", "description": "SIM-Free",
            "price": 899, "discountPercentage": 17.94, "rating": 4.44, "stock": 34,
            "brand": "Apple", "category": "smartphones",
            "thumbnail": "https://cdn.dummyjson.com/2/thumbnail.jpg", "images": []
        }),
        json!({
            "id": 3, "title": "Samsung Universe 9", "description": "Samsung's new variant",
            "price": 1249, "discountPercentage": 15.46, "rating": 4.09, "stock": 36,
            "brand": "Samsung", "category": "smartphones",
            "thumbnail": "https://cdn.dummyjson.com/3/thumbnail.jpg", "images": []
        }),
        json!({
            "id": 6, "title": "MacBook Pro", "description": "MacBook Pro 2021",
            "price": 1749, "discountPercentage": 11.02, "rating": 4.57, "stock": 83,
            "brand": "Apple", "category": "laptops",
            "thumbnail": "https://cdn.dummyjson.com/6/thumbnail.jpg", "images": []
        }),
        json!({
            "id": 30, "title": "Key Holder", "description": "Wooden key holder",
            "price": 30, "discountPercentage": 2.92, "rating": 4.92, "stock": 54,
            "category": "home-decoration",
            "thumbnail": "https://cdn.dummyjson.com/30/thumbnail.jpg",
            "extraField": "ignored"
        }),
    ]
}
