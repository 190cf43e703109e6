//! Contact and conversational messages.
//!
//! A form is first turned into a [`Submission`] (validated, not yet
//! timestamped). The pipeline stamps it into a [`Message`] when the send
//! begins.

use crate::domain::{EmailAddress, ValidationError};
use crate::validation::forms::names;
use crate::validation::FormValues;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which of the two forms a message came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    Contact,
    Conversational,
}

impl MessageKind {
    /// Prefix placed before the visitor's subject in the email subject line.
    pub fn subject_prefix(&self) -> &'static str {
        match self {
            MessageKind::Contact => "Portfolio Contact",
            MessageKind::Conversational => "Conversational Contact",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::Contact => "contact",
            MessageKind::Conversational => "conversational",
        }
    }
}

/// Fetch a required value, trimmed.
fn required(values: &FormValues, field: &str) -> Result<String, ValidationError> {
    let value = values.get(field).map(|v| v.trim()).unwrap_or("");
    if value.is_empty() {
        return Err(ValidationError::EmptyField(field.to_string()));
    }
    Ok(value.to_string())
}

/// Fetch an optional value, trimmed; blank counts as absent.
fn optional(values: &FormValues, field: &str) -> Option<String> {
    values
        .get(field)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Payload of the direct contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactForm {
    pub first_name: String,
    pub last_name: String,
    pub email: EmailAddress,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    /// Build from raw form values.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` for the first blank required field or a
    /// malformed email address.
    pub fn from_values(values: &FormValues) -> Result<Self, ValidationError> {
        Ok(Self {
            first_name: required(values, names::FIRST_NAME)?,
            last_name: required(values, names::LAST_NAME)?,
            email: EmailAddress::new(required(values, names::EMAIL)?)?,
            company: optional(values, names::COMPANY),
            subject: required(values, names::SUBJECT)?,
            message: required(values, names::MESSAGE)?,
        })
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Payload of the conversational contact flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationalForm {
    pub name: String,
    pub email: EmailAddress,
    #[serde(default)]
    pub company: String,
    pub subject: String,
    pub specifics: String,
    pub message: String,
}

impl ConversationalForm {
    /// Build from raw form values.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` for the first blank required field or a
    /// malformed email address.
    pub fn from_values(values: &FormValues) -> Result<Self, ValidationError> {
        Ok(Self {
            name: required(values, names::NAME)?,
            email: EmailAddress::new(required(values, names::EMAIL)?)?,
            company: optional(values, names::COMPANY).unwrap_or_default(),
            subject: required(values, names::SUBJECT)?,
            specifics: required(values, names::SPECIFICS)?,
            message: required(values, names::MESSAGE)?,
        })
    }
}

/// A validated form awaiting submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Contact(ContactForm),
    Conversational(ConversationalForm),
}

impl Submission {
    /// Build the submission for `kind` from raw form values.
    pub fn from_values(kind: MessageKind, values: &FormValues) -> Result<Self, ValidationError> {
        match kind {
            MessageKind::Contact => ContactForm::from_values(values).map(Submission::Contact),
            MessageKind::Conversational => {
                ConversationalForm::from_values(values).map(Submission::Conversational)
            }
        }
    }

    pub fn kind(&self) -> MessageKind {
        match self {
            Submission::Contact(_) => MessageKind::Contact,
            Submission::Conversational(_) => MessageKind::Conversational,
        }
    }

    /// Timestamp the submission, producing the message to send.
    pub fn into_message(self, submitted_at: DateTime<Utc>) -> Message {
        match self {
            Submission::Contact(form) => Message::Contact(ContactMessage { form, submitted_at }),
            Submission::Conversational(form) => {
                Message::Conversational(ConversationalMessage { form, submitted_at })
            }
        }
    }
}

impl From<ContactForm> for Submission {
    fn from(form: ContactForm) -> Self {
        Submission::Contact(form)
    }
}

impl From<ConversationalForm> for Submission {
    fn from(form: ConversationalForm) -> Self {
        Submission::Conversational(form)
    }
}

/// A contact form message stamped with its submission time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    #[serde(flatten)]
    pub form: ContactForm,
    pub submitted_at: DateTime<Utc>,
}

/// A conversational message stamped with its submission time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationalMessage {
    #[serde(flatten)]
    pub form: ConversationalForm,
    pub submitted_at: DateTime<Utc>,
}

/// Either message shape, tagged by kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Message {
    Contact(ContactMessage),
    Conversational(ConversationalMessage),
}

impl Message {
    pub fn kind(&self) -> MessageKind {
        match self {
            Message::Contact(_) => MessageKind::Contact,
            Message::Conversational(_) => MessageKind::Conversational,
        }
    }

    /// Email subject line, e.g. `Portfolio Contact: Hello`.
    pub fn subject_line(&self) -> String {
        let subject = match self {
            Message::Contact(m) => &m.form.subject,
            Message::Conversational(m) => &m.form.subject,
        };
        format!("{}: {}", self.kind().subject_prefix(), subject)
    }

    /// Address of the visitor who wrote the message.
    pub fn reply_to(&self) -> &EmailAddress {
        match self {
            Message::Contact(m) => &m.form.email,
            Message::Conversational(m) => &m.form.email,
        }
    }

    pub fn submitted_at(&self) -> DateTime<Utc> {
        match self {
            Message::Contact(m) => m.submitted_at,
            Message::Conversational(m) => m.submitted_at,
        }
    }
}
