use async_trait::async_trait;
use reqwest::Url;
use std::time::Duration;

use crate::error::Result;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Fetches chart pages as text.
/// Implementations surface their failures as `ChartError::Transport`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn fetch_text(&self, url: &Url) -> Result<String>;
}

/// reqwest-backed transport
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch_text(&self, url: &Url) -> Result<String> {
        tracing::info!("Fetching chart page: {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await?
            .error_for_status()?;
        let body = response.text().await?;

        tracing::debug!("Received {} bytes from {}", body.len(), url);
        Ok(body)
    }
}
