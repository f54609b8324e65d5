//! Data models for Biblio
//!
//! Each record type comes in two shapes: the typed record stored in its
//! collection, and a draft of raw form strings carrying the validation
//! schema. Books and authors share one manager and one form state machine
//! through the [`Record`] / [`RecordDraft`] seams.

pub mod author;
pub mod book;

// Re-export commonly used types
pub use author::{Author, AuthorDraft, AUTHOR_FIELDS};
pub use book::{Book, BookDraft, BOOK_FIELDS};

use crate::validation::{FieldErrors, FieldSpec};

/// A catalog record with a designated key field.
pub trait Record: Clone {
    /// Raw form values this record is edited through.
    type Draft: RecordDraft<Record = Self>;

    /// Display name for status messages and log lines.
    const KIND: &'static str;

    /// Value of the key field used to match rows for update and delete.
    /// Matching only; uniqueness is never enforced.
    fn key(&self) -> &str;

    /// Load this record's values back into a draft for editing.
    fn to_draft(&self) -> Self::Draft;
}

/// Raw form values for a record type.
pub trait RecordDraft: Clone + Default {
    type Record: Record<Draft = Self>;

    /// Form fields in display order.
    fn fields() -> &'static [FieldSpec];

    /// Build a draft from per-field input buffers, in `fields` order.
    fn from_values(values: &[String]) -> Self;

    /// Per-field values in `fields` order, for prefilling input buffers.
    fn values(&self) -> Vec<String>;

    /// Validate the raw values and build the typed record.
    fn finalize(&self) -> Result<Self::Record, FieldErrors>;
}
