//! Sender that pretends to deliver after a fixed delay.

use super::{MessageSender, SendOutcome};
use crate::error::SendResult;
use crate::models::{MessageKind, OutgoingEmail};
use async_trait::async_trait;
use chrono::Utc;
use std::time::Duration;

/// Stands in for a real email backend.
///
/// Waits a per-kind delay to mimic network latency, logs the email and
/// reports success. Nothing leaves the process.
#[derive(Debug, Clone)]
pub struct SimulatedSender {
    contact_delay: Duration,
    conversational_delay: Duration,
}

impl SimulatedSender {
    pub fn new(contact_delay: Duration, conversational_delay: Duration) -> Self {
        Self {
            contact_delay,
            conversational_delay,
        }
    }

    /// A sender that resolves immediately.
    pub fn instant() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    fn delay_for(&self, kind: MessageKind) -> Duration {
        match kind {
            MessageKind::Contact => self.contact_delay,
            MessageKind::Conversational => self.conversational_delay,
        }
    }
}

impl Default for SimulatedSender {
    fn default() -> Self {
        Self::new(Duration::from_millis(2000), Duration::from_millis(1500))
    }
}

#[async_trait]
impl MessageSender for SimulatedSender {
    async fn send(&self, email: &OutgoingEmail) -> SendResult<SendOutcome> {
        let delay = self.delay_for(email.kind);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        tracing::info!(
            to = %email.to,
            from = %email.from,
            subject = %email.subject,
            kind = email.kind.as_str(),
            "Simulated email sent"
        );

        Ok(SendOutcome::delivered(Utc::now()))
    }
}
