//! Submission pipeline and the form service built on it.
//!
//! The pipeline owns the one-at-a-time guarantee and the history of sent
//! messages; the service adds validation of raw form input in front of it.

mod form_service;
mod submission;

pub use form_service::{ContactFormService, ContactFormServiceImpl, FormOutcome};
pub use submission::{PipelineState, SubmissionPipeline};
