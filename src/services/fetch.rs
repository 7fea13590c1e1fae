// src/services/fetch.rs

//! Page retrieval.
//!
//! The traversal loop only needs raw page text; the trait seam keeps it
//! testable without a network.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{AppError, Result};
use crate::models::CrawlerConfig;

/// Source of rendered page text.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch one page. Implementations own their retry policy; an error
    /// here means retries are already exhausted.
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// HTTP fetcher with a bounded retry loop.
pub struct HttpFetcher {
    client: Client,
    max_retries: usize,
    retry_delay: Duration,
}

impl HttpFetcher {
    /// Create a configured HTTP fetcher.
    pub fn new(config: &CrawlerConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            max_retries: config.max_retries,
            retry_delay: Duration::from_millis(config.request_delay_ms),
        })
    }

    async fn try_fetch(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let mut attempt = 0;
        loop {
            match self.try_fetch(url).await {
                Ok(body) => return Ok(body),
                Err(error) => {
                    attempt += 1;
                    if attempt > self.max_retries {
                        return Err(AppError::crawl(
                            url.to_string(),
                            format!("gave up after {attempt} attempts: {error}"),
                        ));
                    }
                    log::warn!(
                        "Fetch attempt {}/{} failed for {}: {}",
                        attempt,
                        self.max_retries,
                        url,
                        error
                    );
                    tokio::time::sleep(self.retry_delay).await;
                }
            }
        }
    }
}
