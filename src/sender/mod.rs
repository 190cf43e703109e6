//! Message delivery.
//!
//! The pipeline never talks to a transport directly; it hands each rendered
//! email to a [`MessageSender`]. Two implementations ship with the crate:
//! [`SimulatedSender`] (no network, fixed delay) and [`HttpMessageSender`]
//! (JSON POST to an email API).

mod http;
mod simulated;

pub use http::HttpMessageSender;
pub use simulated::SimulatedSender;

use crate::error::SendResult;
use crate::models::OutgoingEmail;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Result of a delivery attempt that reached the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendOutcome {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sent_at: Option<DateTime<Utc>>,
}

impl SendOutcome {
    /// The transport accepted the email at `sent_at`.
    pub fn delivered(sent_at: DateTime<Utc>) -> Self {
        Self {
            success: true,
            sent_at: Some(sent_at),
        }
    }

    /// The transport declined the email.
    pub fn failed() -> Self {
        Self {
            success: false,
            sent_at: None,
        }
    }
}

/// Delivers rendered emails.
///
/// A sender may report failure either as `Ok(SendOutcome::failed())` or as
/// an `Err`; callers treat both the same way.
#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> SendResult<SendOutcome>;
}
