//! Form validation.
//!
//! Pure functions from raw field values to per-field validity and display
//! messages, plus the declarations of the contact and conversational forms.

pub mod forms;
mod validator;

pub use forms::{contact_form_fields, conversational_form_fields, form_fields};
pub use validator::{
    is_checked, validate_field, validate_form, FieldResult, FormValues, ValidationResult,
};
