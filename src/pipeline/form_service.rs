//! Contact form service layer.
//!
//! Validate → build → submit for raw form input. Invalid forms are reported
//! back with every field error and never reach the pipeline.

use super::SubmissionPipeline;
use crate::metrics::MetricsSummary;
use crate::models::{MessageKind, SentMessage, Submission};
use crate::validation::{form_fields, validate_form, FormValues, ValidationResult};
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

/// What happened to a submitted form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FormOutcome {
    /// At least one field failed validation; nothing was sent.
    Invalid { validation: ValidationResult },
    /// The message was delivered.
    Sent,
    /// The pipeline was busy or delivery failed; the visitor may retry.
    NotSent,
}

/// Contact form service trait for business operations.
#[async_trait]
pub trait ContactFormService: Send + Sync {
    /// Validate raw input for a form without sending anything.
    fn validate(&self, kind: MessageKind, values: &FormValues) -> ValidationResult;

    /// Validate and, if valid, submit a form.
    async fn submit_form(&self, kind: MessageKind, values: &FormValues) -> FormOutcome;

    /// Messages delivered so far, oldest first.
    fn sent_messages(&self) -> Vec<SentMessage>;

    /// Current submission metrics.
    fn metrics(&self) -> MetricsSummary;
}

/// Default implementation of ContactFormService.
pub struct ContactFormServiceImpl {
    pipeline: Arc<SubmissionPipeline>,
}

impl ContactFormServiceImpl {
    /// Create a new contact form service.
    pub fn new(pipeline: Arc<SubmissionPipeline>) -> Self {
        Self { pipeline }
    }
}

#[async_trait]
impl ContactFormService for ContactFormServiceImpl {
    fn validate(&self, kind: MessageKind, values: &FormValues) -> ValidationResult {
        validate_form(&form_fields(kind), values)
    }

    async fn submit_form(&self, kind: MessageKind, values: &FormValues) -> FormOutcome {
        let validation = self.validate(kind, values);
        if !validation.all_valid {
            tracing::debug!(
                kind = kind.as_str(),
                invalid_fields = validation.errors().count(),
                "Form failed validation"
            );
            return FormOutcome::Invalid { validation };
        }

        let submission = match Submission::from_values(kind, values) {
            Ok(submission) => submission,
            Err(e) => {
                tracing::error!("Validated form could not be built: {}", e);
                return FormOutcome::NotSent;
            }
        };

        if self.pipeline.submit(submission).await {
            FormOutcome::Sent
        } else {
            FormOutcome::NotSent
        }
    }

    fn sent_messages(&self) -> Vec<SentMessage> {
        self.pipeline.sent_messages()
    }

    fn metrics(&self) -> MetricsSummary {
        self.pipeline.metrics().summary()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EmailAddress;
    use crate::sender::SimulatedSender;

    fn service() -> ContactFormServiceImpl {
        let pipeline = SubmissionPipeline::new(
            Arc::new(SimulatedSender::instant()),
            EmailAddress::new("owner@example.com").unwrap(),
        );
        ContactFormServiceImpl::new(Arc::new(pipeline))
    }

    fn values(pairs: &[(&str, &str)]) -> FormValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn test_conversational_form_is_sent() {
        let service = service();
        let outcome = service
            .submit_form(
                MessageKind::Conversational,
                &values(&[
                    ("name", "Sam"),
                    ("email", "sam@example.org"),
                    ("subject", "Project"),
                    ("specifics", "Rust"),
                    ("message", "Let's talk"),
                ]),
            )
            .await;

        assert_eq!(outcome, FormOutcome::Sent);
        let sent = service.sent_messages();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].email.subject, "Conversational Contact: Project");
    }

    #[tokio::test]
    async fn test_missing_consent_is_invalid() {
        let service = service();
        let outcome = service
            .submit_form(
                MessageKind::Contact,
                &values(&[
                    ("firstName", "Jane"),
                    ("lastName", "Doe"),
                    ("email", "jane@x.com"),
                    ("subject", "Hello"),
                    ("message", "Hi there"),
                ]),
            )
            .await;

        match outcome {
            FormOutcome::Invalid { validation } => {
                assert_eq!(validation.errors().count(), 1);
                assert!(!validation.get("privacy").unwrap().valid);
            }
            other => panic!("Expected Invalid outcome, got: {:?}", other),
        }
        assert_eq!(service.metrics().submissions_total, 0);
    }

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_value(FormOutcome::Sent).unwrap();
        assert_eq!(json["status"], "sent");
    }
}
