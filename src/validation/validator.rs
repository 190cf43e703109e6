//! Field and form validation.
//!
//! Validation never fails: every field is evaluated and the outcome is
//! returned as data so the caller can display all errors at once.

use crate::domain::{EmailAddress, FieldError, FieldKind, FieldSpec};
use serde::Serialize;
use std::collections::HashMap;

/// Raw form input keyed by field name.
pub type FormValues = HashMap<String, String>;

/// Checkbox values browsers and front ends send for a ticked box.
const CHECKED_VALUES: &[&str] = &["on", "true", "checked", "yes", "1"];

/// Validate a single raw value against its field kind.
pub fn validate_field(value: &str, kind: FieldKind) -> Result<(), FieldError> {
    let value = value.trim();

    match kind {
        FieldKind::Text if value.is_empty() => Err(FieldError::Empty),
        FieldKind::Text => Ok(()),
        FieldKind::Email if value.is_empty() => Err(FieldError::MissingEmail),
        FieldKind::Email if !EmailAddress::is_valid(value) => Err(FieldError::MalformedEmail),
        FieldKind::Email => Ok(()),
        FieldKind::SingleSelect if value.is_empty() => Err(FieldError::NoSelection),
        FieldKind::SingleSelect => Ok(()),
        FieldKind::Checkbox if !is_checked(value) => Err(FieldError::ConsentRequired),
        FieldKind::Checkbox => Ok(()),
    }
}

/// Whether a checkbox value represents a ticked box.
pub fn is_checked(value: &str) -> bool {
    let value = value.trim();
    CHECKED_VALUES
        .iter()
        .any(|checked| value.eq_ignore_ascii_case(checked))
}

/// Outcome of validating one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldResult {
    pub field: String,
    pub valid: bool,
    /// Display message; empty when the field is valid.
    pub message: String,
}

/// Outcome of validating a whole form, in field declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub fields: Vec<FieldResult>,
    pub all_valid: bool,
}

impl ValidationResult {
    /// Look up the result for a field by name.
    pub fn get(&self, field: &str) -> Option<&FieldResult> {
        self.fields.iter().find(|result| result.field == field)
    }

    /// Iterate over the invalid fields only.
    pub fn errors(&self) -> impl Iterator<Item = &FieldResult> {
        self.fields.iter().filter(|result| !result.valid)
    }
}

/// Validate every declared field of a form.
///
/// Values missing from `values` are treated as empty input.
pub fn validate_form(fields: &[FieldSpec], values: &FormValues) -> ValidationResult {
    let fields: Vec<FieldResult> = fields
        .iter()
        .map(|spec| {
            let value = values.get(&spec.name).map(String::as_str).unwrap_or("");
            match validate_field(value, spec.kind) {
                Ok(()) => FieldResult {
                    field: spec.name.clone(),
                    valid: true,
                    message: String::new(),
                },
                Err(error) => FieldResult {
                    field: spec.name.clone(),
                    valid: false,
                    message: error.to_string(),
                },
            }
        })
        .collect();

    let all_valid = fields.iter().all(|result| result.valid);

    ValidationResult { fields, all_valid }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> FormValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_blank_values_are_invalid() {
        for kind in [FieldKind::Text, FieldKind::Email, FieldKind::SingleSelect] {
            assert!(validate_field("", kind).is_err(), "{:?} accepted empty", kind);
            assert!(
                validate_field("   \t\n", kind).is_err(),
                "{:?} accepted whitespace",
                kind
            );
        }
    }

    #[test]
    fn test_text_field() {
        assert_eq!(validate_field("Jane", FieldKind::Text), Ok(()));
        assert_eq!(
            validate_field(" ", FieldKind::Text).unwrap_err().to_string(),
            "Please enter this field"
        );
    }

    #[test]
    fn test_email_field() {
        assert_eq!(validate_field("jane@example.com", FieldKind::Email), Ok(()));
        assert_eq!(
            validate_field("jane@example", FieldKind::Email),
            Err(FieldError::MalformedEmail)
        );
        assert_eq!(
            validate_field("", FieldKind::Email),
            Err(FieldError::MissingEmail)
        );
        assert_eq!(
            validate_field("  jane@example.com  ", FieldKind::Email),
            Ok(())
        );
    }

    #[test]
    fn test_select_field() {
        assert_eq!(validate_field("collaboration", FieldKind::SingleSelect), Ok(()));
        assert_eq!(
            validate_field("", FieldKind::SingleSelect).unwrap_err().to_string(),
            "Please select an option"
        );
    }

    #[test]
    fn test_checkbox_field() {
        assert_eq!(validate_field("on", FieldKind::Checkbox), Ok(()));
        assert_eq!(validate_field("TRUE", FieldKind::Checkbox), Ok(()));
        assert_eq!(
            validate_field("", FieldKind::Checkbox),
            Err(FieldError::ConsentRequired)
        );
        assert_eq!(
            validate_field("off", FieldKind::Checkbox),
            Err(FieldError::ConsentRequired)
        );
        assert_eq!(
            FieldError::ConsentRequired.to_string(),
            "Please agree to the privacy policy"
        );
    }

    #[test]
    fn test_validate_form_reports_every_error() {
        let fields = vec![
            FieldSpec::text("firstName"),
            FieldSpec::email("email"),
            FieldSpec::checkbox("privacy"),
        ];
        let result = validate_form(&fields, &values(&[("email", "nope")]));

        assert!(!result.all_valid);
        assert_eq!(result.errors().count(), 3);
        assert_eq!(
            result.get("email").unwrap().message,
            "Please enter a valid email address"
        );
        assert_eq!(
            result.get("firstName").unwrap().message,
            "Please enter this field"
        );
    }

    #[test]
    fn test_validate_form_preserves_declaration_order() {
        let fields = vec![FieldSpec::text("b"), FieldSpec::text("a")];
        let result = validate_form(&fields, &FormValues::new());
        let names: Vec<&str> = result.fields.iter().map(|r| r.field.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_all_valid_iff_no_field_invalid() {
        let fields = vec![
            FieldSpec::text("name"),
            FieldSpec::email("email"),
            FieldSpec::single_select("subject"),
        ];
        let good = ["Jane", "jane@example.com", "hiring"];
        let bad = ["", "jane@", ""];

        for mask in 0..8u8 {
            let mut input = FormValues::new();
            for (i, spec) in fields.iter().enumerate() {
                let value = if mask & (1 << i) != 0 { bad[i] } else { good[i] };
                input.insert(spec.name.clone(), value.to_string());
            }

            let result = validate_form(&fields, &input);
            let any_invalid = result.fields.iter().any(|r| !r.valid);
            assert_eq!(result.all_valid, !any_invalid, "mask {:03b}", mask);
            assert_eq!(result.all_valid, mask == 0, "mask {:03b}", mask);
        }
    }

    #[test]
    fn test_empty_form_is_valid() {
        let result = validate_form(&[], &FormValues::new());
        assert!(result.all_valid);
        assert!(result.fields.is_empty());
    }
}
