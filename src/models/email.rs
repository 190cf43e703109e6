//! The rendered email handed to a message sender.

use super::MessageKind;
use crate::domain::EmailAddress;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An email ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutgoingEmail {
    /// Site owner's inbox
    pub to: EmailAddress,

    /// Visitor's address, used for replies
    pub from: EmailAddress,

    pub subject: String,
    pub html: String,
    pub text: String,

    /// When the visitor submitted the form
    pub timestamp: DateTime<Utc>,

    pub kind: MessageKind,
}

/// An email the pipeline delivered successfully.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentMessage {
    pub email: OutgoingEmail,
    pub sent_at: DateTime<Utc>,
}
