//! Book record and its form draft.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::{Record, RecordDraft};
use crate::validation::{self, FieldErrors, FieldSpec};

/// Book form fields, in display order.
pub const BOOK_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("title", "Title"),
    FieldSpec::new("author", "Author"),
    FieldSpec::new("isbn", "ISBN number"),
    FieldSpec::new("publication_date", "Publication date"),
];

/// A catalog book. `isbn` is the key field for update/delete matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub publication_date: NaiveDate,
}

/// Raw book form values, validated on submit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BookDraft {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,
    #[validate(length(min = 1, message = "ISBN number is required"))]
    pub isbn: String,
    #[validate(custom(function = publication_date_rule))]
    pub publication_date: String,
}

fn publication_date_rule(value: &str) -> Result<(), ValidationError> {
    validation::required_date(value, "Publication date")
}

impl Record for Book {
    type Draft = BookDraft;

    const KIND: &'static str = "Book";

    fn key(&self) -> &str {
        &self.isbn
    }

    fn to_draft(&self) -> BookDraft {
        BookDraft {
            title: self.title.clone(),
            author: self.author.clone(),
            isbn: self.isbn.clone(),
            publication_date: self
                .publication_date
                .format(validation::DATE_FORMAT)
                .to_string(),
        }
    }
}

impl RecordDraft for BookDraft {
    type Record = Book;

    fn fields() -> &'static [FieldSpec] {
        BOOK_FIELDS
    }

    fn from_values(values: &[String]) -> Self {
        Self {
            title: values.first().cloned().unwrap_or_default(),
            author: values.get(1).cloned().unwrap_or_default(),
            isbn: values.get(2).cloned().unwrap_or_default(),
            publication_date: values.get(3).cloned().unwrap_or_default(),
        }
    }

    fn values(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.author.clone(),
            self.isbn.clone(),
            self.publication_date.clone(),
        ]
    }

    fn finalize(&self) -> Result<Book, FieldErrors> {
        self.validate()
            .map_err(|errors| FieldErrors::from_validation(&errors, BOOK_FIELDS))?;
        let publication_date = validation::parse_date(&self.publication_date).ok_or_else(|| {
            FieldErrors::single("publication_date", "Publication date must be a valid date")
        })?;
        Ok(Book {
            title: self.title.clone(),
            author: self.author.clone(),
            isbn: self.isbn.clone(),
            publication_date,
        })
    }
}
