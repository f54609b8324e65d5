//! Record manager: CRUD over one collection plus the form state machine.

use crate::{
    models::{Record, RecordDraft},
    repository::Collection,
    validation::FieldErrors,
};

/// What a successful submit did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Idle submit: the record was appended.
    Created,
    /// Editing submit: rows matching the edit target's key were replaced
    /// and the selection cleared. `replaced` is 0 when the target rows
    /// were deleted while editing.
    Updated { replaced: usize },
}

/// CRUD manager for one record type.
///
/// Owns the collection and the editing selection, and drives the per-form
/// state machine: Idle + submit appends; Editing + submit replaces every
/// row matching the key captured when editing began, then returns to Idle.
#[derive(Debug)]
pub struct RecordManager<R: Record> {
    collection: Collection<R>,
    editing: Option<R>,
}

impl<R: Record> RecordManager<R> {
    pub fn new() -> Self {
        Self {
            collection: Collection::new(),
            editing: None,
        }
    }

    /// Rows in insertion order.
    pub fn rows(&self) -> &[R] {
        self.collection.rows()
    }

    pub fn len(&self) -> usize {
        self.collection.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collection.is_empty()
    }

    /// The record currently loaded for editing, if any.
    pub fn editing(&self) -> Option<&R> {
        self.editing.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Load the row at `index` into the editing selection. Selecting while
    /// already editing replaces the previous selection; there is no
    /// cancel action.
    pub fn begin_edit(&mut self, index: usize) -> Option<&R> {
        let record = self.collection.get(index)?.clone();
        tracing::debug!("{} edit started (key={})", R::KIND, record.key());
        self.editing = Some(record);
        self.editing.as_ref()
    }

    /// Validate `draft` and apply it: append when idle, replace the rows
    /// matching the edit target's key when editing. A failed validation
    /// leaves the collection and the editing selection untouched.
    pub fn submit(&mut self, draft: &R::Draft) -> Result<SubmitOutcome, FieldErrors> {
        let record = draft.finalize().map_err(|errors| {
            tracing::debug!("{} submit rejected: {}", R::KIND, errors);
            errors
        })?;
        match self.editing.take() {
            None => {
                tracing::info!("{} added (key={})", R::KIND, record.key());
                self.collection.add(record);
                Ok(SubmitOutcome::Created)
            }
            Some(target) => {
                // Match against the key captured when editing began, not
                // any key in the submitted values: editing the key field
                // still replaces the original row, under its old key.
                let replaced = self.collection.replace_matching(target.key(), &record);
                tracing::info!(
                    "{} updated (key={}, rows={})",
                    R::KIND,
                    target.key(),
                    replaced
                );
                Ok(SubmitOutcome::Updated { replaced })
            }
        }
    }

    /// Remove every row whose key matches. Always permitted; deleting the
    /// record being edited leaves the selection active.
    pub fn delete(&mut self, key: &str) -> usize {
        let removed = self.collection.delete(key);
        tracing::info!("{} deleted (key={}, rows={})", R::KIND, key, removed);
        removed
    }
}

impl<R: Record> Default for RecordManager<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Author, AuthorDraft, Book, BookDraft};

    fn draft(title: &str, isbn: &str, date: &str) -> BookDraft {
        BookDraft {
            title: title.to_string(),
            author: "someone".to_string(),
            isbn: isbn.to_string(),
            publication_date: date.to_string(),
        }
    }

    #[test]
    fn test_idle_submit_appends() {
        let mut books: RecordManager<Book> = RecordManager::new();
        let outcome = books.submit(&draft("Dune", "123", "1965-08-01")).unwrap();
        assert_eq!(outcome, SubmitOutcome::Created);
        assert_eq!(books.len(), 1);
        assert!(!books.is_editing());
    }

    #[test]
    fn test_invalid_submit_changes_nothing() {
        let mut books: RecordManager<Book> = RecordManager::new();
        let errors = books.submit(&BookDraft::default()).unwrap_err();
        assert!(!errors.is_empty());
        assert!(books.is_empty());
    }

    #[test]
    fn test_editing_submit_replaces_and_clears() {
        let mut books: RecordManager<Book> = RecordManager::new();
        books.submit(&draft("Dune", "123", "1965-08-01")).unwrap();
        books.begin_edit(0).unwrap();

        let outcome = books
            .submit(&draft("Dune Messiah", "123", "1969-01-01"))
            .unwrap();
        assert_eq!(outcome, SubmitOutcome::Updated { replaced: 1 });
        assert_eq!(books.len(), 1);
        assert_eq!(books.rows()[0].title, "Dune Messiah");
        assert!(!books.is_editing());

        // Next submit appends again.
        books.submit(&draft("Children of Dune", "456", "1976-01-01")).unwrap();
        assert_eq!(books.len(), 2);
    }

    #[test]
    fn test_failed_submit_keeps_editing_selection() {
        let mut books: RecordManager<Book> = RecordManager::new();
        books.submit(&draft("Dune", "123", "1965-08-01")).unwrap();
        books.begin_edit(0).unwrap();

        books.submit(&draft("", "123", "1965-08-01")).unwrap_err();
        assert!(books.is_editing());
        assert_eq!(books.rows()[0].title, "Dune");
    }

    #[test]
    fn test_update_key_change_replaces_original_slot() {
        // Editing the key field itself still replaces the row selected for
        // editing: the match runs against the key captured at selection
        // time, not the submitted one.
        let mut books: RecordManager<Book> = RecordManager::new();
        books.submit(&draft("Dune", "123", "1965-08-01")).unwrap();
        books.begin_edit(0).unwrap();

        let outcome = books.submit(&draft("Dune", "999", "1965-08-01")).unwrap();
        assert_eq!(outcome, SubmitOutcome::Updated { replaced: 1 });
        assert_eq!(books.len(), 1);
        assert_eq!(books.rows()[0].isbn, "999");
    }

    #[test]
    fn test_update_replaces_every_matching_row() {
        let mut books: RecordManager<Book> = RecordManager::new();
        books.submit(&draft("first", "1", "2000-01-01")).unwrap();
        books.submit(&draft("second", "1", "2000-01-02")).unwrap();
        books.begin_edit(1).unwrap();

        let outcome = books.submit(&draft("both", "1", "2000-01-03")).unwrap();
        assert_eq!(outcome, SubmitOutcome::Updated { replaced: 2 });
        let titles: Vec<_> = books.rows().iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["both", "both"]);
    }

    #[test]
    fn test_update_after_target_deleted_is_noop() {
        let mut books: RecordManager<Book> = RecordManager::new();
        books.submit(&draft("Dune", "123", "1965-08-01")).unwrap();
        books.begin_edit(0).unwrap();

        // Delete is independent of the state machine and leaves the
        // selection active.
        assert_eq!(books.delete("123"), 1);
        assert!(books.is_editing());

        // The later submit matches zero rows, appends nothing, and clears
        // the selection.
        let outcome = books.submit(&draft("Dune", "123", "1965-08-01")).unwrap();
        assert_eq!(outcome, SubmitOutcome::Updated { replaced: 0 });
        assert!(books.is_empty());
        assert!(!books.is_editing());
    }

    #[test]
    fn test_begin_edit_replaces_selection() {
        let mut books: RecordManager<Book> = RecordManager::new();
        books.submit(&draft("one", "1", "2000-01-01")).unwrap();
        books.submit(&draft("two", "2", "2000-01-02")).unwrap();

        books.begin_edit(0).unwrap();
        books.begin_edit(1).unwrap();
        assert_eq!(books.editing().unwrap().isbn, "2");

        assert!(books.begin_edit(5).is_none());
        // A failed selection does not disturb the previous one.
        assert_eq!(books.editing().unwrap().isbn, "2");
    }

    #[test]
    fn test_author_manager_shares_the_contract() {
        let mut authors: RecordManager<Author> = RecordManager::new();
        let outcome = authors
            .submit(&AuthorDraft {
                name: "A".to_string(),
                birth_date: "1900-01-01".to_string(),
                biography: "bio".to_string(),
            })
            .unwrap();
        assert_eq!(outcome, SubmitOutcome::Created);
        assert_eq!(authors.rows()[0].key(), "A");
        assert_eq!(authors.delete("A"), 1);
        assert!(authors.is_empty());
    }
}
