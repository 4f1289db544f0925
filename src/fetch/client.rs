use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::error::{AppError, Context, Result};

/// Transport seam shared by all pipeline stages: one GET per call, decoded
/// as JSON. Tests substitute a canned implementation.
#[async_trait]
pub trait JsonFetch: Send + Sync {
    async fn fetch_json(&self, url: &str) -> Result<Value>;
}

pub struct HttpJsonClient {
    client: Client,
}

impl HttpJsonClient {
    pub fn new(user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()
            .context("Failed to construct HTTP client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl JsonFetch for HttpJsonClient {
    async fn fetch_json(&self, url: &str) -> Result<Value> {
        log::debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Http {
                url: url.to_string(),
                status,
                body,
            });
        }

        let value = response.json::<Value>().await?;
        Ok(value)
    }
}
