//! Domain validation errors.

use std::fmt;

/// Errors that can occur during domain value object construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is empty after trimming.
    EmptyField(String),

    /// The provided email address is invalid.
    InvalidEmail(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "Field cannot be empty: {}", field),
            Self::InvalidEmail(email) => write!(f, "Invalid email address: {}", email),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Why a single form field failed validation.
///
/// The `Display` output is the message shown next to the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    /// Free-text field left blank.
    Empty,

    /// Email field left blank.
    MissingEmail,

    /// Email field does not look like `local@domain.tld`.
    MalformedEmail,

    /// Single-select field has no option chosen.
    NoSelection,

    /// Consent checkbox left unchecked.
    ConsentRequired,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Self::Empty => "Please enter this field",
            Self::MissingEmail => "Please enter your email address",
            Self::MalformedEmail => "Please enter a valid email address",
            Self::NoSelection => "Please select an option",
            Self::ConsentRequired => "Please agree to the privacy policy",
        };
        f.write_str(message)
    }
}

impl std::error::Error for FieldError {}
