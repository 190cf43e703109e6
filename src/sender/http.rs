//! Sender that posts emails to an HTTP email API.
//!
//! The client is synchronous (`ureq`) and is driven from async code through
//! `tokio::task::spawn_blocking`, so a slow API never blocks the runtime.

use super::{MessageSender, SendOutcome};
use crate::config::Config;
use crate::error::{ConfigError, ConfigResult, SendError, SendResult};
use crate::metrics::SubmissionMetrics;
use crate::models::OutgoingEmail;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Optional receipt returned by the email API on a 2xx response.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct DeliveryReceipt {
    success: Option<bool>,
    sent_at: Option<DateTime<Utc>>,
}

/// HTTP client for an email delivery API.
#[derive(Clone)]
pub struct HttpMessageSender {
    /// Base URL of the email API
    base_url: String,

    /// API key sent as a bearer token
    api_key: String,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    /// Metrics collector
    metrics: SubmissionMetrics,
}

impl HttpMessageSender {
    /// Create a sender from configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingVar` if no email API URL is configured.
    pub fn new(config: &Config) -> ConfigResult<Self> {
        let base_url = config
            .email_api_url
            .clone()
            .ok_or_else(|| ConfigError::MissingVar("EMAIL_API_URL".to_string()))?;

        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout))
            .build();

        Ok(Self {
            base_url,
            api_key: config.email_api_key.clone().unwrap_or_default(),
            agent: Arc::new(agent),
            metrics: SubmissionMetrics::new(),
        })
    }

    /// Create a sender with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String, api_key: String) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(10))
            .build();

        Self {
            base_url,
            api_key,
            agent: Arc::new(agent),
            metrics: SubmissionMetrics::new(),
        }
    }

    /// Share a metrics collector with this sender.
    pub fn with_metrics(mut self, metrics: SubmissionMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &SubmissionMetrics {
        &self.metrics
    }

    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// Deliver an email, blocking the current thread.
    ///
    /// # Errors
    ///
    /// Returns a `SendError` when the request cannot be made or the API
    /// answers with a non-2xx status.
    pub fn deliver(&self, email: &OutgoingEmail) -> SendResult<SendOutcome> {
        let start = Instant::now();
        let url = self.build_url("/send");
        let body = serde_json::to_value(email)?;

        tracing::debug!("POST {}", url);

        let result = self
            .agent
            .post(&url)
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .set("Content-Type", "application/json")
            .send_json(&body)
            .map_err(|e| self.map_error(e));

        self.metrics.record_http_request(start.elapsed());

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("POST {} - Error: {:?}", url, e);
                self.metrics.record_http_error();
                return Err(e);
            }
        };

        tracing::debug!("POST {} - Success (status: {})", url, response.status());

        let raw = response
            .into_string()
            .map_err(|e| SendError::HttpError(format!("Failed to read response: {}", e)))?;

        // An empty or non-JSON body from a 2xx response still means accepted.
        let receipt: DeliveryReceipt = serde_json::from_str(&raw).unwrap_or_default();

        if receipt.success == Some(false) {
            tracing::warn!("Email API declined message for {}", email.to);
            return Ok(SendOutcome::failed());
        }

        Ok(SendOutcome::delivered(
            receipt.sent_at.unwrap_or_else(Utc::now),
        ))
    }

    fn map_error(&self, error: ureq::Error) -> SendError {
        match error {
            ureq::Error::Status(code, response) => {
                let message = response
                    .into_string()
                    .unwrap_or_else(|_| "Unknown error".to_string());

                match code {
                    401 => SendError::Unauthorized,
                    429 => SendError::RateLimitExceeded,
                    _ => SendError::ApiError {
                        status: code,
                        message,
                    },
                }
            }
            ureq::Error::Transport(transport) => {
                if transport.kind() == ureq::ErrorKind::ConnectionFailed {
                    SendError::HttpError("Connection failed".to_string())
                } else if transport.kind() == ureq::ErrorKind::Io {
                    SendError::Timeout
                } else {
                    SendError::HttpError(transport.to_string())
                }
            }
        }
    }
}

#[async_trait]
impl MessageSender for HttpMessageSender {
    async fn send(&self, email: &OutgoingEmail) -> SendResult<SendOutcome> {
        let sender = self.clone();
        let email = email.clone();

        tokio::task::spawn_blocking(move || sender.deliver(&email))
            .await
            .map_err(|e| SendError::HttpError(format!("Task join error: {}", e)))?
    }
}
