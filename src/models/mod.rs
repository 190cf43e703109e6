//! Data models for contact form messages and outgoing emails.

pub mod email;
pub mod message;

pub use email::{OutgoingEmail, SentMessage};
pub use message::{
    ContactForm, ContactMessage, ConversationalForm, ConversationalMessage, Message, MessageKind,
    Submission,
};
