//! Practicum homework-statuses API client
//!
//! Implements `HomeworkApi` over HTTP with an OAuth token header.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::api::client::HomeworkApi;
use crate::error::{BotError, Result};

/// Homework statuses endpoint
pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Configuration for the Practicum client
#[derive(Debug, Clone)]
pub struct PracticumConfig {
    pub endpoint: String,
    pub timeout: Duration,
}

impl Default for PracticumConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl PracticumConfig {
    /// Create a config pointing at a different endpoint
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }
}

/// Practicum API client
pub struct PracticumClient {
    client: Client,
    token: String,
    config: PracticumConfig,
}

impl PracticumClient {
    pub fn new(token: String, config: PracticumConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| BotError::TransportFailure {
                reason: format!("failed to create HTTP client: {}", e),
            })?;

        Ok(Self { client, token, config })
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    fn authorization(&self) -> String {
        format!("OAuth {}", self.token)
    }
}

#[async_trait]
impl HomeworkApi for PracticumClient {
    async fn fetch(&self, from_date: i64) -> Result<Value> {
        tracing::info!(from_date, "Requesting homework statuses");

        let response = self
            .client
            .get(&self.config.endpoint)
            .header(AUTHORIZATION, self.authorization())
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(|e| BotError::TransportFailure { reason: e.to_string() })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(BotError::AuthRejected {
                status: status.as_u16(),
            });
        }
        if !status.is_success() {
            return Err(BotError::ServiceFailure {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| BotError::TransportFailure { reason: e.to_string() })?;

        let value = serde_json::from_str(&body).map_err(|e| BotError::MalformedBody { reason: e.to_string() })?;

        tracing::info!(from_date, "Homework statuses received");
        Ok(value)
    }
}

// Keep the token out of logs
impl std::fmt::Debug for PracticumClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PracticumClient")
            .field("endpoint", &self.config.endpoint)
            .field("timeout", &self.config.timeout)
            .finish()
    }
}
