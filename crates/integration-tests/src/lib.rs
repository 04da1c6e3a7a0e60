//! Integration tests for the Shopping App.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopping-app-integration-tests
//! ```
//!
//! No network access is needed: each test serves its own stub catalog on a
//! loopback port and drives the storefront router in-process.
//!
//! # Test Categories
//!
//! - `catalog_loading` - Catalog client and load-once behavior
//! - `storefront_cart` - Cart commands through the HTTP routes
//! - `storefront_screen` - Screen, overlay and health endpoints

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    routing::get,
};
use shopping_app_core::CartStore;
use shopping_app_storefront::config::StorefrontConfig;
use shopping_app_storefront::state::AppState;
use tower::ServiceExt;
use url::Url;

/// A catalog payload shaped like the production endpoint.
#[must_use]
pub fn sample_catalog() -> serde_json::Value {
    serde_json::json!([
        {
            "id": 1,
            "title": "Fjallraven - Foldsack No. 1 Backpack, Fits 15 Laptops",
            "price": 109.95,
            "description": "Your perfect pack for everyday use and walks in the forest.",
            "category": "men's clothing",
            "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
            "rating": { "rate": 3.9, "count": 120 }
        },
        {
            "id": 2,
            "title": "Mens Casual Premium Slim Fit T-Shirts",
            "price": 22.3,
            "description": "Slim-fitting style, contrast raglan long sleeve.",
            "category": "men's clothing",
            "image": "https://fakestoreapi.com/img/71-3HjGNDUL._AC_SY879._SX._UX._SY._UY_.jpg",
            "rating": { "rate": 4.1, "count": 259 }
        },
        {
            "id": 3,
            "title": "Mens Cotton Jacket",
            "price": 55.99,
            "description": "Great outerwear jackets for Spring/Autumn/Winter.",
            "category": "men's clothing",
            "image": "https://fakestoreapi.com/img/71li-ujtlUL._AC_UX679_.jpg",
            "rating": { "rate": 4.7, "count": 500 }
        }
    ])
}

/// A catalog endpoint served on a loopback port.
pub struct StubCatalog {
    pub url: Url,
    hits: Arc<AtomicUsize>,
}

impl StubCatalog {
    /// Serve `body` with `status` at `/products`.
    pub async fn serve(status: StatusCode, body: String) -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);

        let app = Router::new().route(
            "/products",
            get(move || {
                let counter = Arc::clone(&counter);
                let body = body.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    (status, [(header::CONTENT_TYPE, "application/json")], body)
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            url: Url::parse(&format!("http://{addr}/products")).unwrap(),
            hits,
        }
    }

    /// Serve the sample catalog.
    pub async fn sample() -> Self {
        Self::serve(StatusCode::OK, sample_catalog().to_string()).await
    }

    /// Number of requests the endpoint has answered.
    #[must_use]
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// The storefront wired to a stub catalog.
pub struct TestApp {
    pub state: AppState,
    pub catalog: StubCatalog,
    router: Router,
}

impl TestApp {
    /// Build the storefront against `catalog` without loading it.
    #[must_use]
    pub fn new(catalog: StubCatalog) -> Self {
        let config = StorefrontConfig::with_catalog_url(catalog.url.clone());
        let state = AppState::new(config, CartStore::new()).unwrap();
        let router = shopping_app_storefront::app(state.clone(), "static");
        Self {
            state,
            catalog,
            router,
        }
    }

    /// Build the storefront against the sample catalog and load it.
    pub async fn loaded() -> Self {
        let app = Self::new(StubCatalog::sample().await);
        app.state.catalog().load(app.state.catalog_client()).await;
        app
    }

    /// Send a request and return the status, headers and body text.
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        TestResponse {
            status,
            headers,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }

    /// `GET uri`.
    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    /// `POST uri` with a url-encoded form body.
    pub async fn post_form(&self, uri: &str, form: &str) -> TestResponse {
        self.send(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form.to_string()))
                .unwrap(),
        )
        .await
    }
}

/// A buffered response.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// Parse the body as JSON.
    #[must_use]
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }
}
