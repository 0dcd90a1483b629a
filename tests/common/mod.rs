#![allow(dead_code)]

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::Value;

use devconnector_api::auth::generate_jwt;
use devconnector_api::config::AppConfig;
use devconnector_api::database::models::User;
use devconnector_api::database::UserStore;
use devconnector_api::AppState;

/// In-process server over a fresh in-memory store. Each test gets its own,
/// so state never leaks between tests.
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub state: AppState,
    pub client: reqwest::Client,
}

/// A seeded user and a valid bearer token for it
pub struct TestUser {
    pub user: User,
    pub token: String,
}

impl TestServer {
    pub async fn spawn() -> Result<Self> {
        Self::spawn_with(AppConfig::for_tests()).await
    }

    pub async fn spawn_with(config: AppConfig) -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let state = AppState::from_config(config).await?;
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind test port")?;
        let app = devconnector_api::app(state.clone());
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let server = Self { port, base_url, state, client: reqwest::Client::new() };
        server.wait_ready(Duration::from_secs(5)).await?;
        Ok(server)
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

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Insert a user straight into the store and mint a token for it
    pub async fn seed_user(&self, name: &str) -> Result<TestUser> {
        let user = User::new(
            name,
            format!("{}@example.com", name.to_lowercase()),
            format!("//www.gravatar.com/avatar/{}", name.to_lowercase()),
        );
        let user = self.state.users.insert_user(&user).await?;
        let token = generate_jwt(&user, &self.state.config.security)?;
        Ok(TestUser { user, token })
    }

    pub async fn get(&self, path: &str) -> Result<(StatusCode, Value)> {
        let res = self.client.get(self.url(path)).send().await?;
        read(res).await
    }

    pub async fn get_as(&self, who: &TestUser, path: &str) -> Result<(StatusCode, Value)> {
        let res = self.client.get(self.url(path)).bearer_auth(&who.token).send().await?;
        read(res).await
    }

    pub async fn post_as(&self, who: &TestUser, path: &str, body: Value) -> Result<(StatusCode, Value)> {
        let res = self
            .client
            .post(self.url(path))
            .bearer_auth(&who.token)
            .json(&body)
            .send()
            .await?;
        read(res).await
    }

    pub async fn delete_as(&self, who: &TestUser, path: &str) -> Result<(StatusCode, Value)> {
        let res = self.client.delete(self.url(path)).bearer_auth(&who.token).send().await?;
        read(res).await
    }
}

async fn read(res: reqwest::Response) -> Result<(StatusCode, Value)> {
    let status = res.status();
    let body = res.json::<Value>().await.unwrap_or(Value::Null);
    Ok((status, body))
}
