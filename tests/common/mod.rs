#![allow(dead_code)]

use std::time::Duration;

use anyhow::{Context, Result};
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use category_api::config::AppConfig;
use category_api::server::{self, AppState};

pub const API_KEY: &str = "rahasia";

/// Development config pointed at a private in-memory store
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::development();
    config.database.url = "sqlite::memory:".to_string();
    config.security.api_key = API_KEY.to_string();
    config
}

/// A router over a fresh, empty store, plus the state to inspect it with
pub async fn test_app() -> Result<(Router, AppState)> {
    let config = test_config();
    let state = AppState::from_config(&config)
        .await
        .context("failed to open in-memory store")?;
    Ok((server::app(state.clone(), &config), state))
}

pub async fn row_count(state: &AppState) -> Result<i64> {
    let count = sqlx::query_scalar("SELECT COUNT(*) FROM category")
        .fetch_one(state.categories.store().pool())
        .await?;
    Ok(count)
}

/// Send one request through the router; returns the status and parsed body
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<&str>,
    api_key: Option<&str>,
) -> Result<(StatusCode, Value)> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(key) = api_key {
        builder = builder.header("X-API-Key", key);
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))?,
        None => builder.body(Body::empty())?,
    };

    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let body = serde_json::from_slice(&bytes)
        .with_context(|| format!("response body is not JSON: {:?}", String::from_utf8_lossy(&bytes)))?;
    Ok((status, body))
}

/// Authenticated request shorthand
pub async fn call(app: &Router, method: Method, uri: &str, body: Option<&str>) -> Result<(StatusCode, Value)> {
    send(app, method, uri, body, Some(API_KEY)).await
}

/// Create a category through the API and return its id
pub async fn create_category(app: &Router, name: &str) -> Result<i64> {
    let body = serde_json::json!({ "name": name }).to_string();
    let (status, json) = call(app, Method::POST, "/api/categories", Some(&body)).await?;
    anyhow::ensure!(status == StatusCode::OK, "create failed: {} {}", status, json);
    json["data"]["id"].as_i64().context("created category has no id")
}

/// A real listener on a free port, serving a fresh app until dropped
pub struct TestServer {
    pub base_url: String,
    shutdown: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    pub async fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let (app, _state) = test_app().await?;
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .with_context(|| format!("failed to bind port {}", port))?;

        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        tokio::spawn(async move {
            let _ = server::serve(listener, app, async {
                let _ = rx.await;
            })
            .await;
        });

        let server = Self { base_url, shutdown: Some(tx) };
        server.wait_ready(Duration::from_secs(10)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = tokio::time::Instant::now() + timeout;
        while tokio::time::Instant::now() < deadline {
            // Any HTTP answer (401 without a key) means the listener is up
            if client.get(format!("{}/api/categories", self.base_url)).send().await.is_ok() {
                return Ok(());
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}
