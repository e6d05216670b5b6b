//! Shared fixtures for service and HTTP tests

use std::sync::Arc;
use std::time::Duration;

use axum_test::TestServer;
use jsonwebtoken::Algorithm;
use serde_json::{json, Value};

use crate::app::{api_router, AppServices, Repositories};
use crate::core::config::AuthConfig;
use crate::features::auth::services::TokenService;
use crate::features::categories::repositories::memory::InMemoryCategoryRepository;
use crate::features::products::repositories::memory::InMemoryProductRepository;
use crate::features::users::dtos::TokenPairDto;
use crate::features::users::repositories::memory::InMemoryUserRepository;

pub const TEST_PASSWORD: &str = "password123";

pub fn test_auth_config() -> AuthConfig {
    AuthConfig {
        secret_key: "test_secret".to_string(),
        algorithm: Algorithm::HS256,
        access_token_ttl: Duration::from_secs(30 * 60),
        refresh_token_ttl: Duration::from_secs(7 * 24 * 60 * 60),
        jwt_leeway: Duration::from_secs(0),
    }
}

pub fn test_token_service() -> TokenService {
    TokenService::new(&test_auth_config())
}

/// Full API router over in-memory repositories
pub struct TestApp {
    pub server: TestServer,
}

impl TestApp {
    pub fn new() -> Self {
        let repos = Repositories {
            users: Arc::new(InMemoryUserRepository::new()),
            categories: Arc::new(InMemoryCategoryRepository::new()),
            products: Arc::new(InMemoryProductRepository::new()),
        };
        let services = AppServices::new(repos, Arc::new(test_token_service()));
        let server = TestServer::new(api_router(&services)).expect("test server");

        Self { server }
    }

    /// Register through the API and return the created user
    pub async fn register(&self, email: &str, password: &str, role: &str) -> Value {
        let response = self
            .server
            .post("/users")
            .json(&json!({ "email": email, "password": password, "role": role }))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        response.json::<Value>()["data"].clone()
    }

    pub async fn login(&self, email: &str, password: &str) -> TokenPairDto {
        let response = self
            .server
            .post("/users/token")
            .form(&[("username", email), ("password", password)])
            .await;
        response.assert_status_ok();
        response.json::<TokenPairDto>()
    }

    /// Register a seller and return an access token
    pub async fn seller_token(&self, email: &str) -> String {
        self.register(email, TEST_PASSWORD, "seller").await;
        self.login(email, TEST_PASSWORD).await.access_token
    }

    pub async fn buyer_token(&self, email: &str) -> String {
        self.register(email, TEST_PASSWORD, "buyer").await;
        self.login(email, TEST_PASSWORD).await.access_token
    }

    pub async fn create_category(&self, name: &str, parent_id: Option<i32>) -> i32 {
        let response = self
            .server
            .post("/categories")
            .json(&json!({ "name": name, "parent_id": parent_id }))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        id_of(&response.json::<Value>())
    }

    pub async fn create_product(&self, token: &str, payload: Value) -> i32 {
        let response = self
            .server
            .post("/products")
            .authorization_bearer(token)
            .json(&payload)
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        id_of(&response.json::<Value>())
    }
}

fn id_of(body: &Value) -> i32 {
    body["data"]["id"].as_i64().expect("id in response") as i32
}
