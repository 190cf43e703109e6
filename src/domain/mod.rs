//! Domain value objects and types.
//!
//! This module contains type-safe wrappers for domain concepts like
//! email addresses and form field declarations. Value objects validate at
//! construction time so invalid data cannot be represented further in.

pub mod email;
pub mod errors;
pub mod field;

pub use email::EmailAddress;
pub use errors::{FieldError, ValidationError};
pub use field::{FieldKind, FieldSpec};
