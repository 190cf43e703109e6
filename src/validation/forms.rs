//! Declarations of the two forms the site submits.

use crate::domain::FieldSpec;
use crate::models::MessageKind;

/// Field names used by the forms, matching the input ids on the page.
pub mod names {
    pub const FIRST_NAME: &str = "firstName";
    pub const LAST_NAME: &str = "lastName";
    pub const NAME: &str = "name";
    pub const EMAIL: &str = "email";
    pub const COMPANY: &str = "company";
    pub const SUBJECT: &str = "subject";
    pub const SPECIFICS: &str = "specifics";
    pub const MESSAGE: &str = "message";
    pub const PRIVACY: &str = "privacy";
}

/// Fields of the direct contact form. `company` is optional and not declared.
pub fn contact_form_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::text(names::FIRST_NAME),
        FieldSpec::text(names::LAST_NAME),
        FieldSpec::email(names::EMAIL),
        FieldSpec::single_select(names::SUBJECT),
        FieldSpec::text(names::MESSAGE),
        FieldSpec::checkbox(names::PRIVACY),
    ]
}

/// Fields of the conversational contact flow.
pub fn conversational_form_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::text(names::NAME),
        FieldSpec::email(names::EMAIL),
        FieldSpec::text(names::SUBJECT),
        FieldSpec::text(names::SPECIFICS),
        FieldSpec::text(names::MESSAGE),
    ]
}

/// Fields declared for a given message kind.
pub fn form_fields(kind: MessageKind) -> Vec<FieldSpec> {
    match kind {
        MessageKind::Contact => contact_form_fields(),
        MessageKind::Conversational => conversational_form_fields(),
    }
}
