//! Promotions sources.

use std::time::Duration;

use async_trait::async_trait;
use marquee::promotions::wire::{self, Decoded};
use mockall::automock;
use reqwest::Client;

use crate::gateway::errors::GatewayError;

/// Where promotion records come from.
#[automock]
#[async_trait]
pub trait PromotionsSource: Send + Sync {
    /// Fetch and validate the full record list.
    async fn list_promotions(&self) -> Result<Decoded, GatewayError>;
}

/// REST API source.
#[derive(Debug, Clone)]
pub struct HttpPromotionsSource {
    url: String,
    http: Client,
}

impl HttpPromotionsSource {
    /// Create a source reading `path` under `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn new(base_url: &str, path: &str, timeout: Duration) -> Result<Self, GatewayError> {
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            url: join_url(base_url, path),
            http,
        })
    }

    /// Endpoint this source reads.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl PromotionsSource for HttpPromotionsSource {
    async fn list_promotions(&self) -> Result<Decoded, GatewayError> {
        let response = self
            .http
            .get(&self.url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();

            return Err(GatewayError::UnexpectedStatus { status, body });
        }

        let body = response.bytes().await?;

        Ok(wire::decode(&body)?)
    }
}

fn join_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        return base.to_string();
    }

    format!("{base}/{path}")
}
