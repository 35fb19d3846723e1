//! Promotions API Config

use std::{num::NonZeroU32, time::Duration};

use clap::Args;

use crate::gateway::RetryPolicy;

/// Remote promotions API settings.
#[derive(Debug, Args)]
pub struct ApiConfig {
    /// Base URL of the REST API
    #[arg(long, env = "PROMOTIONS_API_URL", default_value = "http://localhost:5000")]
    pub api_url: String,

    /// Path of the promotions list endpoint
    #[arg(long, env = "PROMOTIONS_API_PATH", default_value = "/api/banners")]
    pub api_path: String,

    /// Request timeout in seconds
    #[arg(long, env = "PROMOTIONS_API_TIMEOUT_SECONDS", default_value_t = 10_u64)]
    pub api_timeout_seconds: u64,

    /// Attempts per fetch, including the first
    #[arg(long, env = "PROMOTIONS_FETCH_ATTEMPTS", default_value = "1")]
    pub fetch_attempts: NonZeroU32,

    /// Base delay between fetch attempts in milliseconds
    #[arg(long, env = "PROMOTIONS_FETCH_BACKOFF_MS", default_value_t = 500_u64)]
    pub fetch_backoff_ms: u64,
}

impl ApiConfig {
    /// Request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.api_timeout_seconds)
    }

    /// Retry policy for fetch triggers.
    #[must_use]
    pub const fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            attempts: self.fetch_attempts,
            backoff: Duration::from_millis(self.fetch_backoff_ms),
        }
    }
}
