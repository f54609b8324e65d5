//! Author record and its form draft.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::{Record, RecordDraft};
use crate::validation::{self, FieldErrors, FieldSpec};

/// Author form fields, in display order.
pub const AUTHOR_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("name", "Name"),
    FieldSpec::new("birth_date", "Birth date"),
    FieldSpec::new("biography", "Biography"),
];

/// A catalog author. `name` is the key field for update/delete matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub name: String,
    pub birth_date: NaiveDate,
    pub biography: String,
}

/// Raw author form values, validated on submit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AuthorDraft {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(custom(function = birth_date_rule))]
    pub birth_date: String,
    #[validate(length(min = 1, message = "Biography is required"))]
    pub biography: String,
}

fn birth_date_rule(value: &str) -> Result<(), ValidationError> {
    validation::required_date(value, "Birth date")
}

impl Record for Author {
    type Draft = AuthorDraft;

    const KIND: &'static str = "Author";

    fn key(&self) -> &str {
        &self.name
    }

    fn to_draft(&self) -> AuthorDraft {
        AuthorDraft {
            name: self.name.clone(),
            birth_date: self.birth_date.format(validation::DATE_FORMAT).to_string(),
            biography: self.biography.clone(),
        }
    }
}

impl RecordDraft for AuthorDraft {
    type Record = Author;

    fn fields() -> &'static [FieldSpec] {
        AUTHOR_FIELDS
    }

    fn from_values(values: &[String]) -> Self {
        Self {
            name: values.first().cloned().unwrap_or_default(),
            birth_date: values.get(1).cloned().unwrap_or_default(),
            biography: values.get(2).cloned().unwrap_or_default(),
        }
    }

    fn values(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.birth_date.clone(),
            self.biography.clone(),
        ]
    }

    fn finalize(&self) -> Result<Author, FieldErrors> {
        self.validate()
            .map_err(|errors| FieldErrors::from_validation(&errors, AUTHOR_FIELDS))?;
        let birth_date = validation::parse_date(&self.birth_date).ok_or_else(|| {
            FieldErrors::single("birth_date", "Birth date must be a valid date")
        })?;
        Ok(Author {
            name: self.name.clone(),
            birth_date,
            biography: self.biography.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn herbert() -> AuthorDraft {
        AuthorDraft {
            name: "Frank Herbert".to_string(),
            birth_date: "1920-10-08".to_string(),
            biography: "Wrote Dune.".to_string(),
        }
    }

    #[test]
    fn test_finalize_valid() {
        let author = herbert().finalize().unwrap();
        assert_eq!(author.key(), "Frank Herbert");
        assert_eq!(
            author.birth_date,
            NaiveDate::from_ymd_opt(1920, 10, 8).unwrap()
        );
    }

    #[test]
    fn test_draft_roundtrip() {
        let author = herbert().finalize().unwrap();
        assert_eq!(author.to_draft(), herbert());
        assert_eq!(AuthorDraft::from_values(&herbert().values()), herbert());
    }

    #[test]
    fn test_empty_draft_reports_every_field() {
        let errors = AuthorDraft::default().finalize().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get("name"), Some("Name is required"));
        assert_eq!(errors.get("birth_date"), Some("Birth date is required"));
        assert_eq!(errors.get("biography"), Some("Biography is required"));
    }

    #[test]
    fn test_serializes_with_camel_case_field_names() {
        let author = herbert().finalize().unwrap();
        let json = serde_json::to_value(&author).unwrap();
        assert_eq!(json["name"], "Frank Herbert");
        assert_eq!(json["birthDate"], "1920-10-08");
    }
}
