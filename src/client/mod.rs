//! Client for the AI Scanner backend
//!
//! Every real request is preceded by a `GET {base}/health` probe; when the
//! probe fails the request is never sent.

pub mod types;

pub use types::{AiAnalysis, AnalyzeRequest, ChatRequest, ChatResponse, PageAnalysis, PageField};

use crate::config::AssistantConfig;
use crate::error::{AssistantError, Result};
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// The operations the widget needs from a backend
#[async_trait]
pub trait ScannerBackend: Send + Sync {
    /// Pre-flight probe; `Err(BackendUnreachable)` when the service is down
    async fn health(&self) -> Result<()>;

    /// Question about the current page or scan
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse>;

    /// Question needing no page context
    async fn ask(&self, request: ChatRequest) -> Result<ChatResponse>;

    /// Full-page scan of a URL
    async fn analyze(&self, url: &str) -> Result<PageAnalysis>;
}

/// HTTP implementation of [`ScannerBackend`]
#[derive(Debug, Clone)]
pub struct ScannerClient {
    client: reqwest::Client,
    base: String,
    health_check: bool,
}

impl ScannerClient {
    /// Create a client from a validated configuration
    pub fn new(config: &AssistantConfig) -> Result<Self> {
        let base = config.validate()?;
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| AssistantError::Request(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base,
            health_check: config.health_check,
        })
    }

    /// Client for the default local backend
    pub fn local() -> Result<Self> {
        Self::new(&AssistantConfig::default())
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned + Send,
    {
        if self.health_check {
            self.health().await?;
        }

        let url = self.endpoint(path);
        log::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .header("Accept", "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::warn!("{} answered {}: {}", url, status.as_u16(), body);
            return Err(AssistantError::Http {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl ScannerBackend for ScannerClient {
    async fn health(&self) -> Result<()> {
        let unreachable = || AssistantError::BackendUnreachable {
            base: self.base.clone(),
        };

        let response = self
            .client
            .get(self.endpoint("/health"))
            .header("Accept", "text/plain")
            .send()
            .await
            .map_err(|e| {
                log::warn!("Health check failed: {}", e);
                unreachable()
            })?;

        if !response.status().is_success() {
            log::warn!("Health check answered {}", response.status());
            return Err(unreachable());
        }
        Ok(())
    }

    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        self.post("/chat", &request).await
    }

    async fn ask(&self, request: ChatRequest) -> Result<ChatResponse> {
        self.post("/ask", &request).await
    }

    async fn analyze(&self, url: &str) -> Result<PageAnalysis> {
        let request = AnalyzeRequest {
            url: url.trim().to_string(),
        };
        self.post("/analyze", &request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_is_normalized() {
        let client = ScannerClient::new(&AssistantConfig::new().api_base("http://localhost:9000/api/scanner/")).unwrap();
        assert_eq!(client.base(), "http://localhost:9000/api/scanner");
        assert_eq!(client.endpoint("/chat"), "http://localhost:9000/api/scanner/chat");
    }

    #[test]
    fn test_local_client_uses_default_base() {
        let client = ScannerClient::local().unwrap();
        assert_eq!(client.base(), crate::config::DEFAULT_API_BASE);
    }

    #[test]
    fn test_invalid_base_is_rejected() {
        let err = ScannerClient::new(&AssistantConfig::new().api_base("localhost")).unwrap_err();
        assert!(matches!(err, AssistantError::InvalidConfig(_)));
    }
}
