//! Portfolio Contact - contact form validation and delivery for a portfolio website.
//!
//! The crate validates contact form input, turns valid forms into emails and
//! delivers them through an injected sender, never more than one at a time.
//!
//! # Architecture
//!
//! - **domain**: Value objects (email addresses, field declarations) and field errors
//! - **validation**: Per-field and per-form validation, form declarations
//! - **models**: Submissions, stamped messages and outgoing emails
//! - **render**: HTML and plain-text email bodies
//! - **sender**: The `MessageSender` seam with simulated and HTTP implementations
//! - **pipeline**: One-at-a-time submission pipeline and the form service
//! - **metrics**: Submission and delivery counters
//! - **config**: Configuration management from environment variables
//! - **error**: Custom error types for precise error handling
//! - **server**: MCP protocol server

pub mod config;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod models;
pub mod pipeline;
pub mod render;
pub mod sender;
pub mod server;
pub mod validation;

// Re-export commonly used types
pub use config::Config;
pub use domain::{EmailAddress, FieldError, FieldKind, FieldSpec};
pub use error::{ConfigError, RenderError, SendError};
pub use metrics::{MetricsSummary, SubmissionMetrics};
pub use models::{
    ContactForm, ContactMessage, ConversationalForm, ConversationalMessage, Message, MessageKind,
    OutgoingEmail, SentMessage, Submission,
};
pub use pipeline::{
    ContactFormService, ContactFormServiceImpl, FormOutcome, PipelineState, SubmissionPipeline,
};
pub use render::render_email;
pub use sender::{HttpMessageSender, MessageSender, SendOutcome, SimulatedSender};
pub use server::ContactFormServer;
pub use validation::{validate_field, validate_form, FieldResult, FormValues, ValidationResult};
