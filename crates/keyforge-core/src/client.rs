//! HTTP client for the KeyForge deck listing API
//!
//! This module builds deck listing requests, wraps them in the retry policy
//! and decodes the linked cards and houses of each page.

use std::time::Duration;

use tracing::debug;

use crate::error::{KeyforgeError, Result};
use crate::retry::{retry, RetryPolicy};
use crate::types::DeckPage;

/// Base URL for the KeyForge API host
const KEYFORGE_BASE_URL: &str = "https://www.keyforgegame.com";

/// User-Agent sent with every request
const DEFAULT_USER_AGENT: &str = "KFTBS_mod/1.0.0";

/// Default request timeout (in seconds)
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the KeyForge HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Scheme and host requests are sent to, without a trailing slash
    pub base_url: String,
    /// User-Agent header value
    pub user_agent: String,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
    /// Retry policy for failed status responses
    pub retry: RetryPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: KEYFORGE_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            retry: RetryPolicy::default(),
        }
    }
}

/// HTTP client for the KeyForge API with retry logic
///
/// Every non-success status is retried with exponential backoff as
/// configured by [`ClientConfig::retry`]. Transport failures and malformed
/// bodies are returned straight away.
pub struct KeyforgeClient {
    /// Underlying HTTP client
    client: reqwest::Client,
    base_url: String,
    retry: RetryPolicy,
}

impl KeyforgeClient {
    /// Create a new client with default configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            retry: config.retry,
        })
    }

    /// URL of one deck listing page with linked cards embedded
    pub fn deck_page_url(&self, expansion_id: u64, page: u32) -> String {
        format!(
            "{}/api/decks/?page={}&expansion={}&links=cards",
            self.base_url, page, expansion_id
        )
    }

    /// Fetch and decode one page of decks for an expansion.
    ///
    /// # Errors
    /// - `KeyforgeError::HttpStatus` - non-success status after all retries
    /// - `KeyforgeError::Http` - network failure, not retried
    /// - `KeyforgeError::Json` - body is not a deck listing
    pub async fn fetch_page(&self, expansion_id: u64, page: u32) -> Result<DeckPage> {
        let url = self.deck_page_url(expansion_id, page);
        let body = retry(&self.retry, KeyforgeError::is_retryable, || self.get_text(&url)).await?;
        debug!(url = %url, bytes = body.len(), "received deck page");

        Ok(serde_json::from_str(&body)?)
    }

    async fn get_text(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(KeyforgeError::HttpStatus {
                status,
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }
}
