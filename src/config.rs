//! Configuration management for the portfolio contact service.
//!
//! This module handles loading and validating configuration from environment variables.
//! A `.env` file is read if present; `dotenvy` never prints to stdout, which MCP
//! uses for communication.

use crate::domain::EmailAddress;
use crate::error::{ConfigError, ConfigResult};
use std::env;
use std::time::Duration;

/// Configuration for the portfolio contact service.
#[derive(Debug, Clone)]
pub struct Config {
    /// Inbox that receives contact form emails
    pub contact_recipient: String,

    /// Email API base URL; when unset emails are only simulated
    pub email_api_url: Option<String>,

    /// Email API key, required when `email_api_url` is set
    pub email_api_key: Option<String>,

    /// Simulated delivery delay for the contact form in milliseconds (default: 2000)
    pub contact_send_delay_ms: u64,

    /// Simulated delivery delay for conversational messages in milliseconds (default: 1500)
    pub conversational_send_delay_ms: u64,

    /// Pipeline send timeout in seconds, 0 disables it (default: 30)
    pub send_timeout_secs: u64,

    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `CONTACT_RECIPIENT`: Inbox that receives the emails
    ///
    /// Optional environment variables:
    /// - `EMAIL_API_URL`: Email API base URL (enables real delivery)
    /// - `EMAIL_API_KEY`: Email API key (required with `EMAIL_API_URL`)
    /// - `CONTACT_SEND_DELAY_MS`: Simulated contact delay (default: 2000)
    /// - `CONVERSATIONAL_SEND_DELAY_MS`: Simulated conversational delay (default: 1500)
    /// - `SEND_TIMEOUT_SECS`: Pipeline send timeout, 0 disables (default: 30).
    ///   With `EMAIL_API_URL` set it must be greater than `REQUEST_TIMEOUT`.
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 10)
    pub fn from_env() -> ConfigResult<Self> {
        // Try to load .env file if it exists (but don't fail if it doesn't)
        let _ = dotenvy::dotenv();

        let contact_recipient = env::var("CONTACT_RECIPIENT")
            .map_err(|_| ConfigError::MissingVar("CONTACT_RECIPIENT".to_string()))?;

        if !EmailAddress::is_valid(contact_recipient.trim()) {
            return Err(ConfigError::InvalidValue {
                var: "CONTACT_RECIPIENT".to_string(),
                reason: format!("Must be an email address, got: {}", contact_recipient),
            });
        }

        let email_api_url = Self::optional_var("EMAIL_API_URL");
        let email_api_key = Self::optional_var("EMAIL_API_KEY");

        if let Some(url) = &email_api_url {
            // Validate API URL format
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::InvalidValue {
                    var: "EMAIL_API_URL".to_string(),
                    reason: "Must start with http:// or https://".to_string(),
                });
            }

            if email_api_key.is_none() {
                return Err(ConfigError::MissingVar("EMAIL_API_KEY".to_string()));
            }
        }

        let contact_send_delay_ms = Self::parse_env_u64("CONTACT_SEND_DELAY_MS", 2000)?;
        let conversational_send_delay_ms =
            Self::parse_env_u64("CONVERSATIONAL_SEND_DELAY_MS", 1500)?;
        let send_timeout_secs = Self::parse_env_u64("SEND_TIMEOUT_SECS", 30)?;
        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 10)?;

        // A blocking HTTP send outlives the pipeline timeout, so a shorter
        // pipeline timeout could report failure for a message that was delivered.
        if email_api_url.is_some()
            && send_timeout_secs != 0
            && send_timeout_secs <= request_timeout
        {
            return Err(ConfigError::InvalidValue {
                var: "SEND_TIMEOUT_SECS".to_string(),
                reason: format!(
                    "Must exceed REQUEST_TIMEOUT ({}s) when EMAIL_API_URL is set, got: {}",
                    request_timeout, send_timeout_secs
                ),
            });
        }

        Ok(Config {
            contact_recipient: contact_recipient.trim().to_string(),
            email_api_url,
            email_api_key,
            contact_send_delay_ms,
            conversational_send_delay_ms,
            send_timeout_secs,
            request_timeout,
        })
    }

    /// Pipeline send timeout, `None` when disabled.
    pub fn send_timeout(&self) -> Option<Duration> {
        match self.send_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    /// Read a variable, treating blank values as unset.
    fn optional_var(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|val| val.trim().to_string())
            .filter(|val| !val.is_empty())
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            contact_recipient: String::new(),
            email_api_url: None,
            email_api_key: None,
            contact_send_delay_ms: 2000,
            conversational_send_delay_ms: 1500,
            send_timeout_secs: 30,
            request_timeout: 10,
        }
    }
}
