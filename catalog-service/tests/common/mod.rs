#![allow(dead_code)]

use std::sync::Arc;

use auth::Authenticator;
use catalog_service::brand::models::Brand;
use catalog_service::config::ApiConfig;
use catalog_service::domain::user::models::CreateUserCommand;
use catalog_service::domain::user::models::EmailAddress;
use catalog_service::domain::user::models::Password;
use catalog_service::domain::user::models::Username;
use catalog_service::inbound::http::create_router;
use catalog_service::inbound::http::AppState;
use catalog_service::product::models::Product;
use catalog_service::repositories::MemoryRepository;
use catalog_service::user::models::User;
use chrono::Duration;
use serde_json::json;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin123";

/// Test application that spawns a real server over the in-memory store
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub state: AppState,
    pub api_client: reqwest::Client,
    pub authenticator: Arc<Authenticator>,
}

impl TestApp {
    /// Spawn the application in a background task with a seeded admin account
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let authenticator = Arc::new(Authenticator::new(JWT_SECRET, Duration::minutes(30)));

        let state = AppState::new(
            Arc::new(MemoryRepository::<User>::new()),
            Arc::new(MemoryRepository::<Product>::new()),
            Arc::new(MemoryRepository::<Brand>::new()),
            Arc::clone(&authenticator),
            ApiConfig {
                prefix: "/api/v1".to_string(),
                project_name: "Catalog Test".to_string(),
            },
        );

        // Every user endpoint is gated, so the first account is seeded directly.
        state
            .user_service
            .bootstrap_user(CreateUserCommand::new(
                Username::new(ADMIN_USERNAME.to_string()).unwrap(),
                EmailAddress::new("admin@example.com".to_string()).unwrap(),
                Password::new(ADMIN_PASSWORD.to_string()).unwrap(),
            ))
            .await
            .expect("Failed to seed admin user");

        let router = create_router(state.clone());

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            state,
            api_client: reqwest::Client::new(),
            authenticator,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(self.url(path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(self.url(path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client.put(self.url(path)).bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(self.url(path)).bearer_auth(token)
    }

    /// Log in through the JSON endpoint and return the access token
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .post("/api/v1/auth/login-json")
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["access_token"]
            .as_str()
            .expect("Missing access_token")
            .to_string()
    }

    pub async fn admin_token(&self) -> String {
        self.login(ADMIN_USERNAME, ADMIN_PASSWORD).await
    }
}
