use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use super::types::RawPair;
use crate::core::config::DexConfig;

/// Source of raw pair batches. The driver loop only depends on this trait so
/// tests can feed it scripted batches instead of live HTTP responses.
#[async_trait]
pub trait PairSource: Send + Sync {
    async fn latest_pairs(&self) -> Result<Vec<RawPair>>;
}

pub struct DexClient {
    client: Client,
    base_url: String,
}

impl DexClient {
    pub fn new(config: &DexConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }
}

#[async_trait]
impl PairSource for DexClient {
    /// One GET per cycle. No auth, no query parameters. A body whose
    /// top-level shape carries no `pairs` array is treated as an empty batch;
    /// transport, status, and decode failures surface as `Err` and are turned
    /// into an empty batch by the caller.
    async fn latest_pairs(&self) -> Result<Vec<RawPair>> {
        let response = self
            .client
            .get(&self.base_url)
            .send()
            .await
            .context("Request failed")?
            .error_for_status()
            .context("Non-success HTTP status")?;

        let body: Value = response
            .json()
            .await
            .context("Failed to decode response body")?;

        match body.get("pairs") {
            Some(pairs) => serde_json::from_value(pairs.clone())
                .context("Malformed `pairs` array in response"),
            None => Ok(Vec::new()),
        }
    }
}
