//! Form validation support.
//!
//! Drafts declare their rules with the `validator` derive; this module
//! provides the shared date rule and [`FieldErrors`], the field-scoped
//! error map the UI renders adjacent to each input.

use std::borrow::Cow;
use std::fmt;

use chrono::NaiveDate;
use indexmap::IndexMap;
use validator::{ValidationError, ValidationErrors};

/// Date format accepted by date fields and used for display.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One form field: the identifier validation errors are keyed by (the
/// field name in the draft struct) and the label shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub id: &'static str,
    pub label: &'static str,
}

impl FieldSpec {
    pub const fn new(id: &'static str, label: &'static str) -> Self {
        Self { id, label }
    }
}

/// Parse a date field value in the accepted format.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

/// Rule for required date fields: empty reports the field as missing,
/// non-empty must parse as [`DATE_FORMAT`].
pub fn required_date(value: &str, label: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        let mut error = ValidationError::new("required");
        error.message = Some(Cow::Owned(format!("{label} is required")));
        return Err(error);
    }
    if parse_date(value).is_none() {
        let mut error = ValidationError::new("date");
        error.message = Some(Cow::Owned(format!("{label} must be a valid date")));
        return Err(error);
    }
    Ok(())
}

/// Field-scoped failures from one submit attempt.
///
/// Holds one message per field, in form field order, so each message can
/// be rendered next to the input it belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    by_field: IndexMap<&'static str, String>,
}

impl FieldErrors {
    /// Collect derive-produced errors into form field order, keeping the
    /// first message per field.
    pub fn from_validation(errors: &ValidationErrors, fields: &'static [FieldSpec]) -> Self {
        let by_field = errors.field_errors();
        let mut out = Self::default();
        for spec in fields {
            if let Some(first) = by_field.get(spec.id).and_then(|list| list.first()) {
                let message = first
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", spec.label));
                out.by_field.insert(spec.id, message);
            }
        }
        out
    }

    /// A single field failure, for rules checked outside the derive.
    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        let mut out = Self::default();
        out.by_field.insert(field, message.into());
        out
    }

    /// Message for a field, if it failed.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.by_field.get(field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.by_field.iter().map(|(id, message)| (*id, message.as_str()))
    }

    pub fn len(&self) -> usize {
        self.by_field.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_field.is_empty()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (_, message) in self.by_field.iter() {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{message}")?;
            first = false;
        }
        Ok(())
    }
}
