#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use reqwest::{Client, Response, StatusCode};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use campus_kart::config::{AppConfig, Environment};
use campus_kart::database::{MemoryStore, Store};
use campus_kart::{app, AppState};

pub const PASSWORD: &str = "password123";
pub const TINY_IMAGE: &str = "data:image/png;base64,iVBORw0KGgo=";

/// One router per test, served in-process over a fresh memory store
pub struct TestServer {
    pub base_url: String,
    pub client: Client,
}

fn test_config() -> AppConfig {
    let mut config = AppConfig::for_environment(
        Environment::Development,
        "integration-test-secret".to_string(),
        "memory://".to_string(),
    );
    // Cheap hashing keeps the suite fast
    config.security.password_hash_memory_kib = 64;
    config.security.password_hash_iterations = 1;
    config.api.enable_request_logging = false;
    config
}

impl TestServer {
    pub async fn spawn() -> Result<Self> {
        Self::spawn_with(|_| {}).await
    }

    /// Spawn with the test defaults adjusted by `configure`
    pub async fn spawn_with(configure: impl FnOnce(&mut AppConfig)) -> Result<Self> {
        let mut config = test_config();
        configure(&mut config);
        let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
        let router = app(AppState::new(config, store)?);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .context("failed to bind test listener")?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Ok(Self {
            base_url: format!("http://{}", addr),
            client: Client::new(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    pub async fn post(&self, path: &str, body: &Value, token: Option<&str>) -> Result<Response> {
        let mut req = self.client.post(self.url(path)).json(body);
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        Ok(req.send().await?)
    }

    pub async fn put(&self, path: &str, body: &Value, token: Option<&str>) -> Result<Response> {
        let mut req = self.client.put(self.url(path)).json(body);
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        Ok(req.send().await?)
    }

    pub async fn delete(&self, path: &str, token: Option<&str>) -> Result<Response> {
        let mut req = self.client.delete(self.url(path));
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        Ok(req.send().await?)
    }

    /// Sign up and return the session token
    pub async fn signup(&self, name: &str, email: &str) -> Result<String> {
        let res = self
            .post(
                "/api/auth/signup",
                &json!({"name": name, "email": email, "password": PASSWORD}),
                None,
            )
            .await?;
        let (status, body) = read(res).await?;
        anyhow::ensure!(status == StatusCode::CREATED, "signup failed: {}", body);
        body["data"]["token"]
            .as_str()
            .map(str::to_string)
            .context("signup response has no token")
    }

    pub async fn create_product(&self, token: &str, body: &Value) -> Result<Value> {
        let (status, body) = read(self.post("/api/products", body, Some(token)).await?).await?;
        anyhow::ensure!(status == StatusCode::CREATED, "product create failed: {}", body);
        Ok(body["data"].clone())
    }

    pub async fn create_lost_item(&self, token: &str, body: &Value) -> Result<Value> {
        let (status, body) = read(self.post("/api/lost-items", body, Some(token)).await?).await?;
        anyhow::ensure!(status == StatusCode::CREATED, "lost item create failed: {}", body);
        Ok(body["data"].clone())
    }
}

pub async fn read(res: Response) -> Result<(StatusCode, Value)> {
    let status = res.status();
    let body = res.json::<Value>().await.context("response is not JSON")?;
    Ok((status, body))
}

pub fn product_body(name: &str) -> Value {
    json!({
        "name": name,
        "category": "Books",
        "price": 350,
        "condition": "Very Good",
        "description": "Second year electronics textbook, no markings",
        "phone": "9876543210",
        "year": "2nd",
        "branch": "ECE",
        "image": TINY_IMAGE
    })
}

pub fn lost_item_body(item_name: &str) -> Value {
    json!({
        "itemName": item_name,
        "description": "Black wallet with a college ID inside",
        "location": "Boys Hostel 3 mess",
        "dateLost": "2024-02-14",
        "contactNumber": "9876543210",
        "email": "ravi@nitj.ac.in",
        "image": TINY_IMAGE
    })
}
