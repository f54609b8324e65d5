//! Insertion-ordered row store for one record type.

use crate::models::Record;

/// Rows of one record type, in insertion order.
///
/// No uniqueness is enforced on the key field: duplicate keys produce
/// duplicate rows, and key-based operations touch every matching row.
#[derive(Debug, Clone)]
pub struct Collection<R: Record> {
    rows: Vec<R>,
}

impl<R: Record> Collection<R> {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Append a record unconditionally.
    pub fn add(&mut self, record: R) {
        self.rows.push(record);
    }

    /// Replace every row whose key equals `key` with a clone of `record`.
    /// Returns the number of rows replaced (0 when nothing matches).
    pub fn replace_matching(&mut self, key: &str, record: &R) -> usize {
        let mut replaced = 0;
        for row in &mut self.rows {
            if row.key() == key {
                *row = record.clone();
                replaced += 1;
            }
        }
        replaced
    }

    /// Remove every row whose key equals `key`. Unknown keys are a no-op.
    /// Returns the number of rows removed.
    pub fn delete(&mut self, key: &str) -> usize {
        let before = self.rows.len();
        self.rows.retain(|row| row.key() != key);
        before - self.rows.len()
    }

    /// All rows in insertion order.
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn get(&self, index: usize) -> Option<&R> {
        self.rows.get(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<R: Record> Default for Collection<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Book, BookDraft, RecordDraft};

    fn book(title: &str, isbn: &str) -> Book {
        BookDraft {
            title: title.to_string(),
            author: "someone".to_string(),
            isbn: isbn.to_string(),
            publication_date: "2000-01-01".to_string(),
        }
        .finalize()
        .unwrap()
    }

    #[test]
    fn test_add_keeps_insertion_order() {
        let mut rows = Collection::new();
        rows.add(book("b", "2"));
        rows.add(book("a", "1"));
        rows.add(book("c", "3"));
        let titles: Vec<_> = rows.rows().iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_add_allows_duplicate_keys() {
        let mut rows = Collection::new();
        rows.add(book("first", "1"));
        rows.add(book("second", "1"));
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_replace_matching_touches_every_duplicate() {
        let mut rows = Collection::new();
        rows.add(book("first", "1"));
        rows.add(book("other", "2"));
        rows.add(book("second", "1"));

        let replaced = rows.replace_matching("1", &book("new", "1"));
        assert_eq!(replaced, 2);
        let titles: Vec<_> = rows.rows().iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["new", "other", "new"]);
    }

    #[test]
    fn test_replace_matching_unknown_key() {
        let mut rows = Collection::new();
        rows.add(book("only", "1"));
        assert_eq!(rows.replace_matching("9", &book("new", "9")), 0);
        assert_eq!(rows.rows()[0].title, "only");
    }

    #[test]
    fn test_delete_removes_all_matches_only() {
        let mut rows = Collection::new();
        rows.add(book("first", "1"));
        rows.add(book("other", "2"));
        rows.add(book("second", "1"));

        assert_eq!(rows.delete("1"), 2);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows.rows()[0].isbn, "2");
        // Unknown key is a no-op.
        assert_eq!(rows.delete("1"), 0);
        assert_eq!(rows.len(), 1);
    }
}
