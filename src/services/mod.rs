//! Business logic services

pub mod manager;

pub use manager::{RecordManager, SubmitOutcome};

use crate::models::{Author, Book};

/// Container for the two record managers.
#[derive(Debug, Default)]
pub struct Services {
    pub books: RecordManager<Book>,
    pub authors: RecordManager<Author>,
}

impl Services {
    /// Create managers with empty collections.
    pub fn new() -> Self {
        Self {
            books: RecordManager::new(),
            authors: RecordManager::new(),
        }
    }
}
