//! Form field declarations.

use serde::{Deserialize, Serialize};

/// How a form field is validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKind {
    /// Free text (input or textarea); must be non-blank.
    Text,
    /// Email address; must be non-blank and `local@domain.tld` shaped.
    Email,
    /// Drop-down with a placeholder option; a non-empty option must be chosen.
    SingleSelect,
    /// Required consent control; must be checked.
    Checkbox,
}

/// A named field of a form together with its validation kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Text)
    }

    pub fn email(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Email)
    }

    pub fn single_select(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::SingleSelect)
    }

    pub fn checkbox(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Checkbox)
    }
}
