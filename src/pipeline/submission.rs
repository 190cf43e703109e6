//! The submission pipeline.
//!
//! `submit` stamps a [`Submission`], renders it, hands it to the injected
//! [`MessageSender`] and reports whether delivery succeeded. At most one
//! submission is in flight per pipeline: the `Idle -> Sending` check-and-set
//! happens before the first `.await`, and a guard puts the state back to
//! `Idle` however the attempt ends. A sender that panics is reported as a
//! failed send rather than unwinding into the caller.

use crate::domain::EmailAddress;
use crate::error::{SendError, SendResult};
use crate::metrics::{SendTimer, SubmissionMetrics};
use crate::models::{OutgoingEmail, SentMessage, Submission};
use crate::render::render_email;
use crate::sender::{MessageSender, SendOutcome};
use chrono::Utc;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

const DEFAULT_SEND_TIMEOUT: Duration = Duration::from_secs(30);

/// Whether a submission is currently in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Sending,
}

/// Holds the pipeline in `Sending`; dropping it returns the pipeline to `Idle`.
struct SendingGuard<'a> {
    state: &'a Mutex<PipelineState>,
}

impl Drop for SendingGuard<'_> {
    fn drop(&mut self) {
        *lock(self.state) = PipelineState::Idle;
        tracing::debug!("Pipeline state: Sending -> Idle");
    }
}

/// Lock a mutex, recovering the data if a previous holder panicked.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Sends already-validated submissions, one at a time.
pub struct SubmissionPipeline {
    sender: Arc<dyn MessageSender>,
    recipient: EmailAddress,
    state: Mutex<PipelineState>,
    history: Mutex<Vec<SentMessage>>,
    send_timeout: Option<Duration>,
    metrics: SubmissionMetrics,
}

impl SubmissionPipeline {
    /// Create a pipeline that delivers to `recipient` through `sender`.
    pub fn new(sender: Arc<dyn MessageSender>, recipient: EmailAddress) -> Self {
        Self {
            sender,
            recipient,
            state: Mutex::new(PipelineState::Idle),
            history: Mutex::new(Vec::new()),
            send_timeout: Some(DEFAULT_SEND_TIMEOUT),
            metrics: SubmissionMetrics::new(),
        }
    }

    /// Set how long a send may take before it counts as failed.
    /// `None` waits indefinitely.
    pub fn with_send_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.send_timeout = timeout;
        self
    }

    /// Share a metrics collector with this pipeline.
    pub fn with_metrics(mut self, metrics: SubmissionMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn state(&self) -> PipelineState {
        *lock(&self.state)
    }

    pub fn is_sending(&self) -> bool {
        self.state() == PipelineState::Sending
    }

    pub fn metrics(&self) -> &SubmissionMetrics {
        &self.metrics
    }

    /// Snapshot of every successfully sent message, oldest first.
    pub fn sent_messages(&self) -> Vec<SentMessage> {
        lock(&self.history).clone()
    }

    /// Move `Idle -> Sending`, or return `None` if a send is in flight.
    fn try_begin(&self) -> Option<SendingGuard<'_>> {
        let mut state = lock(&self.state);
        if *state == PipelineState::Sending {
            return None;
        }
        *state = PipelineState::Sending;
        tracing::debug!("Pipeline state: Idle -> Sending");

        Some(SendingGuard { state: &self.state })
    }

    /// Submit a message.
    ///
    /// Resolves to `true` iff the sender delivered it. Returns `false`
    /// without contacting the sender if another submission is in flight.
    pub async fn submit(&self, submission: Submission) -> bool {
        let Some(_guard) = self.try_begin() else {
            tracing::warn!(
                kind = submission.kind().as_str(),
                "Submission rejected: another submission is in flight"
            );
            self.metrics.record_rejected_busy();
            return false;
        };
        self.metrics.record_submission();

        let message = submission.into_message(Utc::now());
        let email = match render_email(&message, &self.recipient) {
            Ok(email) => email,
            Err(e) => {
                tracing::error!("Failed to render email: {}", e);
                self.metrics.record_send(Duration::ZERO, false);
                return false;
            }
        };

        let timer = SendTimer::new(self.metrics.clone());
        let result = self.dispatch(&email).await;

        match result {
            Ok(SendOutcome {
                success: true,
                sent_at,
            }) => {
                let elapsed = timer.complete(true);
                tracing::info!(
                    subject = %email.subject,
                    kind = email.kind.as_str(),
                    duration_ms = elapsed.as_millis() as u64,
                    "Email sent successfully"
                );
                lock(&self.history).push(SentMessage {
                    sent_at: sent_at.unwrap_or_else(Utc::now),
                    email,
                });
                true
            }
            Ok(_) => {
                timer.complete(false);
                tracing::warn!(
                    subject = %email.subject,
                    kind = email.kind.as_str(),
                    "Email sender reported failure"
                );
                false
            }
            Err(e) => {
                timer.complete(false);
                tracing::error!(
                    subject = %email.subject,
                    kind = email.kind.as_str(),
                    "Email sending failed: {}",
                    e
                );
                false
            }
        }
    }

    /// Hand the email to the sender. A panicking sender counts as a failed send.
    async fn dispatch(&self, email: &OutgoingEmail) -> SendResult<SendOutcome> {
        let send = async {
            AssertUnwindSafe(self.sender.send(email))
                .catch_unwind()
                .await
                .unwrap_or_else(|_| Err(SendError::Other("message sender panicked".to_string())))
        };

        match self.send_timeout {
            Some(limit) => tokio::time::timeout(limit, send)
                .await
                .map_err(|_| SendError::Timeout)?,
            None => send.await,
        }
    }
}
