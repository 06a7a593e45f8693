#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use bookmarks_api::database::MemoryStore;
use bookmarks_api::{app, AppConfig, AppState};
use reqwest::StatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A server bound to a free local port, backed by a fresh in-memory store.
/// Each test gets its own, so no cleanup between tests is needed.
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub client: reqwest::Client,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn spawn() -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let state = AppState::new(AppConfig::for_tests(), Arc::new(MemoryStore::new()))?;
        let listener = TcpListener::bind(("127.0.0.1", port))
            .await
            .with_context(|| format!("failed to bind {}", base_url))?;

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app(state)).await {
                eprintln!("test server stopped: {}", e);
            }
        });

        let server = Self {
            port,
            base_url,
            client: reqwest::Client::new(),
            handle,
        };
        server.wait_ready(Duration::from_secs(10)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sign up and return the access token
    pub async fn signup(&self, email: &str, password: &str) -> Result<String> {
        let res = self
            .client
            .post(self.url("/auth/signup"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        anyhow::ensure!(res.status() == StatusCode::CREATED, "signup failed: {}", res.status());
        access_token(res.json().await?)
    }

    /// Sign in and return the access token
    pub async fn signin(&self, email: &str, password: &str) -> Result<String> {
        let res = self
            .client
            .post(self.url("/auth/signin"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        anyhow::ensure!(res.status() == StatusCode::OK, "signin failed: {}", res.status());
        access_token(res.json().await?)
    }

    pub async fn signin_after_signup(&self, email: &str, password: &str) -> Result<String> {
        self.signup(email, password).await?;
        self.signin(email, password).await
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn access_token(body: Value) -> Result<String> {
    body["access_token"]
        .as_str()
        .map(str::to_string)
        .with_context(|| format!("missing access_token in {}", body))
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}
