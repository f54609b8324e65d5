//! Application state and keyboard handling for the catalog screen.
//!
//! All state transitions run through [`App::handle_key`], which keeps the
//! screen logic testable without a terminal.

use std::marker::PhantomData;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::{
    models::{Author, Book, Record, RecordDraft},
    services::{RecordManager, Services, SubmitOutcome},
    validation::{FieldErrors, FieldSpec},
};

/// Which zone owns keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    BookForm,
    BookTable,
    AuthorForm,
    AuthorTable,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::BookForm => Focus::BookTable,
            Focus::BookTable => Focus::AuthorForm,
            Focus::AuthorForm => Focus::AuthorTable,
            Focus::AuthorTable => Focus::BookForm,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::BookForm => Focus::AuthorTable,
            Focus::BookTable => Focus::BookForm,
            Focus::AuthorForm => Focus::BookTable,
            Focus::AuthorTable => Focus::AuthorForm,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

/// Transient feedback shown in the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    fn info(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            text: text.into(),
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }
}

/// Input buffers for one record form, one buffer per field.
///
/// The cursor is a byte offset into the active buffer, always on a char
/// boundary.
#[derive(Debug)]
pub struct FormView<R: Record> {
    pub inputs: Vec<String>,
    pub active: usize,
    pub cursor: usize,
    pub errors: FieldErrors,
    _record: PhantomData<R>,
}

impl<R: Record> FormView<R> {
    pub fn new() -> Self {
        Self {
            inputs: vec![String::new(); Self::fields().len()],
            active: 0,
            cursor: 0,
            errors: FieldErrors::default(),
            _record: PhantomData,
        }
    }

    pub fn fields() -> &'static [FieldSpec] {
        R::Draft::fields()
    }

    /// Draft built from the current buffers.
    pub fn draft(&self) -> R::Draft {
        R::Draft::from_values(&self.inputs)
    }

    /// Prefill every buffer, reset the cursor to the first field and drop
    /// stale error marks.
    pub fn load(&mut self, mut values: Vec<String>) {
        values.resize(Self::fields().len(), String::new());
        self.inputs = values;
        self.errors = FieldErrors::default();
        self.active = 0;
        self.cursor = self.inputs[0].len();
    }

    pub fn next_field(&mut self) {
        self.active = (self.active + 1) % self.inputs.len();
        self.cursor = self.inputs[self.active].len();
    }

    pub fn prev_field(&mut self) {
        self.active = (self.active + self.inputs.len() - 1) % self.inputs.len();
        self.cursor = self.inputs[self.active].len();
    }

    pub fn insert(&mut self, c: char) {
        self.inputs[self.active].insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        let input = &mut self.inputs[self.active];
        if let Some(c) = input[..self.cursor].chars().next_back() {
            self.cursor -= c.len_utf8();
            input.remove(self.cursor);
        }
    }

    pub fn delete_forward(&mut self) {
        let input = &mut self.inputs[self.active];
        if self.cursor < input.len() {
            input.remove(self.cursor);
        }
    }

    pub fn move_left(&mut self) {
        if let Some(c) = self.inputs[self.active][..self.cursor].chars().next_back() {
            self.cursor -= c.len_utf8();
        }
    }

    pub fn move_right(&mut self) {
        if let Some(c) = self.inputs[self.active][self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.inputs[self.active].len();
    }
}

impl<R: Record> Default for FormView<R> {
    fn default() -> Self {
        Self::new()
    }
}

/// Cursor position in one record table.
#[derive(Debug, Default)]
pub struct TableView {
    pub selected: usize,
}

impl TableView {
    pub fn up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn down(&mut self, len: usize) {
        if self.selected + 1 < len {
            self.selected += 1;
        }
    }

    /// Pull the cursor back inside the table after rows were removed.
    pub fn clamp(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
        } else {
            self.selected = self.selected.min(len - 1);
        }
    }
}

/// Whole-screen state: both catalogs, their forms and tables, and the
/// focus ring.
#[derive(Debug, Default)]
pub struct App {
    pub services: Services,
    pub book_form: FormView<Book>,
    pub author_form: FormView<Author>,
    pub book_table: TableView,
    pub author_table: TableView,
    pub focus: Focus,
    pub status: Option<StatusMessage>,
    pub should_quit: bool,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one key press. Global bindings win over the focused zone.
    pub fn handle_key(&mut self, key: KeyEvent) {
        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) => {
                self.should_quit = true;
                return;
            }
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return;
            }
            (KeyCode::Tab, _) => {
                self.focus = self.focus.next();
                return;
            }
            (KeyCode::BackTab, _) => {
                self.focus = self.focus.prev();
                return;
            }
            _ => {}
        }

        let status = match self.focus {
            Focus::BookForm => form_key(&mut self.services.books, &mut self.book_form, key),
            Focus::AuthorForm => form_key(&mut self.services.authors, &mut self.author_form, key),
            Focus::BookTable => match key.code {
                KeyCode::Up | KeyCode::Char('k') => {
                    self.book_table.up();
                    None
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.book_table.down(self.services.books.len());
                    None
                }
                KeyCode::Char('e') => {
                    let status =
                        begin_edit(&mut self.services.books, &mut self.book_form, &self.book_table);
                    if status.is_some() {
                        self.focus = Focus::BookForm;
                    }
                    status
                }
                KeyCode::Char('d') => {
                    delete_selected(&mut self.services.books, &mut self.book_table)
                }
                _ => None,
            },
            Focus::AuthorTable => match key.code {
                KeyCode::Up | KeyCode::Char('k') => {
                    self.author_table.up();
                    None
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.author_table.down(self.services.authors.len());
                    None
                }
                KeyCode::Char('e') => {
                    let status = begin_edit(
                        &mut self.services.authors,
                        &mut self.author_form,
                        &self.author_table,
                    );
                    if status.is_some() {
                        self.focus = Focus::AuthorForm;
                    }
                    status
                }
                KeyCode::Char('d') => {
                    delete_selected(&mut self.services.authors, &mut self.author_table)
                }
                _ => None,
            },
        };

        if status.is_some() {
            self.status = status;
        }
    }
}

fn form_key<R: Record>(
    manager: &mut RecordManager<R>,
    form: &mut FormView<R>,
    key: KeyEvent,
) -> Option<StatusMessage> {
    match key.code {
        KeyCode::Enter => Some(submit(manager, form)),
        KeyCode::Up => {
            form.prev_field();
            None
        }
        KeyCode::Down => {
            form.next_field();
            None
        }
        KeyCode::Backspace => {
            form.backspace();
            None
        }
        KeyCode::Delete => {
            form.delete_forward();
            None
        }
        KeyCode::Left => {
            form.move_left();
            None
        }
        KeyCode::Right => {
            form.move_right();
            None
        }
        KeyCode::Home => {
            form.move_home();
            None
        }
        KeyCode::End => {
            form.move_end();
            None
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            form.insert(c);
            None
        }
        _ => None,
    }
}

fn submit<R: Record>(manager: &mut RecordManager<R>, form: &mut FormView<R>) -> StatusMessage {
    match manager.submit(&form.draft()) {
        Ok(SubmitOutcome::Created) => {
            // Buffers stay as typed after a save; only the error marks
            // reset.
            form.errors = FieldErrors::default();
            StatusMessage::info(format!("{} added", R::KIND))
        }
        Ok(SubmitOutcome::Updated { replaced }) => {
            form.errors = FieldErrors::default();
            StatusMessage::info(format!("{} updated ({replaced} replaced)", R::KIND))
        }
        Err(errors) => {
            form.errors = errors;
            StatusMessage::error(format!("{} not saved", R::KIND))
        }
    }
}

fn begin_edit<R: Record>(
    manager: &mut RecordManager<R>,
    form: &mut FormView<R>,
    table: &TableView,
) -> Option<StatusMessage> {
    let record = manager.begin_edit(table.selected)?;
    let key = record.key().to_string();
    let values = record.to_draft().values();
    form.load(values);
    Some(StatusMessage::info(format!("Editing {} \"{key}\"", R::KIND)))
}

fn delete_selected<R: Record>(
    manager: &mut RecordManager<R>,
    table: &mut TableView,
) -> Option<StatusMessage> {
    let key = manager.rows().get(table.selected)?.key().to_string();
    let removed = manager.delete(&key);
    table.clamp(manager.len());
    Some(StatusMessage::info(format!(
        "{} deleted ({removed} matching)",
        R::KIND
    )))
}
