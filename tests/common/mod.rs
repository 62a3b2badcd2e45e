use std::sync::Arc;

use axum::{
    body::{self, Body},
    http::{Method, Request},
    response::Response,
    Router,
};
use serde_json::{json, Value};
use shopcart_api::{
    config::AppConfig,
    db::{self, DbConfig},
    AppState,
};
use tower::ServiceExt;

/// Helper harness for spinning up the application over a private in-memory SQLite database.
#[derive(Clone)]
pub struct TestApp {
    router: Router,
    #[allow(dead_code)]
    pub state: AppState,
}

impl TestApp {
    /// Construct a new test application with fresh database state.
    pub async fn new() -> Self {
        let cfg = AppConfig::new(
            "sqlite::memory:".to_string(),
            "127.0.0.1".to_string(),
            18_000,
            "test".to_string(),
        );

        let pool = db::establish_connection_with_config(&DbConfig::in_memory_sqlite())
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        Self::with_pool(pool, cfg)
    }

    /// Construct a test application over `database_url` using the pool sizing
    /// the server derives from its configuration.
    #[allow(dead_code)]
    pub async fn with_database_url(database_url: &str) -> Self {
        let cfg = AppConfig::new(
            database_url.to_string(),
            "127.0.0.1".to_string(),
            18_000,
            "test".to_string(),
        );

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to open test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        Self::with_pool(pool, cfg)
    }

    fn with_pool(pool: db::DbPool, cfg: AppConfig) -> Self {
        let state = AppState::new(Arc::new(pool), cfg);
        let router = shopcart_api::app_router(state.clone());

        Self { router, state }
    }

    /// Send a request against the router.
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> Response {
        self.request_with_headers(method, uri, body, &[]).await
    }

    pub async fn request_with_headers(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        headers: &[(&str, &str)],
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }

        let body = if let Some(json) = body {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).expect("failed to serialize json request body"))
        } else {
            Body::empty()
        };

        let request = builder.body(body).expect("failed to build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    /// Creates a product through the API and returns its JSON body.
    #[allow(dead_code)]
    pub async fn create_product(&self, name: &str, price: f64, stock: i32) -> Value {
        let response = self
            .request(
                Method::POST,
                "/products/",
                Some(json!({
                    "name": name,
                    "price": price,
                    "description": format!("{name} description"),
                    "stock": stock
                })),
            )
            .await;
        assert_eq!(response.status(), 200, "product creation should succeed");
        response_json(response).await
    }

    /// Creates the cart the cart endpoints operate on.
    #[allow(dead_code)]
    pub async fn create_cart(&self) -> Value {
        let response = self.request(Method::POST, "/cart/create", None).await;
        assert_eq!(response.status(), 200, "cart creation should succeed");
        response_json(response).await
    }
}

pub async fn response_json(response: Response) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body bytes");
    serde_json::from_slice(&bytes).expect("json response")
}
