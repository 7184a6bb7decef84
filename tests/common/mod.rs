use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::Value;

use cake_api::database::MemoryCakeStore;
use cake_api::{app, AppConfig, AppState};

/// In-process server backed by a fresh in-memory store.
/// Each test gets its own, so ids always start at 1.
#[allow(dead_code)]
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub store: Arc<MemoryCakeStore>,
    pub client: reqwest::Client,
}

#[allow(dead_code)]
impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get(&self, path: &str) -> Result<(StatusCode, Value)> {
        let res = self.client.get(self.url(path)).send().await?;
        read_json(res).await
    }

    pub async fn post(&self, path: &str, body: &Value) -> Result<(StatusCode, Value)> {
        let res = self.client.post(self.url(path)).json(body).send().await?;
        read_json(res).await
    }

    pub async fn put(&self, path: &str, body: &Value) -> Result<(StatusCode, Value)> {
        let res = self.client.put(self.url(path)).json(body).send().await?;
        read_json(res).await
    }

    pub async fn delete(&self, path: &str) -> Result<(StatusCode, Value)> {
        let res = self.client.delete(self.url(path)).send().await?;
        read_json(res).await
    }

    /// POST a body that is not JSON-encoded by the client
    pub async fn post_raw(
        &self,
        path: &str,
        body: impl Into<reqwest::Body>,
    ) -> Result<(StatusCode, Value)> {
        let res = self
            .client
            .post(self.url(path))
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await?;
        read_json(res).await
    }

    /// Send any method with no body; used for routes outside the API surface
    pub async fn request(&self, method: reqwest::Method, path: &str) -> Result<(StatusCode, Value)> {
        let res = self.client.request(method, self.url(path)).send().await?;
        read_json(res).await
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

async fn read_json(res: reqwest::Response) -> Result<(StatusCode, Value)> {
    let status = res.status();
    let bytes = res.bytes().await?;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    Ok((status, body))
}

pub async fn spawn_server() -> Result<TestServer> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let base_url = format!("http://127.0.0.1:{}", port);

    let store = Arc::new(MemoryCakeStore::new());
    let router = app(AppState::new(store.clone(), AppConfig::testing()));

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .context("failed to bind test server")?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            eprintln!("test server stopped: {}", e);
        }
    });

    let server = TestServer {
        port,
        base_url,
        store,
        client: reqwest::Client::new(),
    };
    server.wait_ready(Duration::from_secs(5)).await?;
    Ok(server)
}
