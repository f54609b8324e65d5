//! Widget rendering for the catalog screen.
//!
//! Layout: header | [book form + book table | author form + author table]
//! | status bar. Forms render one label/input/error triple per field.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table, TableState},
    Frame,
};

use super::app::{App, Focus, FormView, StatusKind, TableView};
use super::theme;
use crate::{
    models::{Record, RecordDraft},
    services::RecordManager,
};

/// Render the complete screen.
pub fn render(f: &mut Frame, app: &App) {
    // Main layout: header | content | status bar
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(10),   // Content
            Constraint::Length(1), // Status bar
        ])
        .split(f.size());

    render_header(f, main_chunks[0]);

    // Content: books column | authors column
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(main_chunks[1]);

    render_column(
        f,
        columns[0],
        &app.services.books,
        &app.book_form,
        &app.book_table,
        app.focus == Focus::BookForm,
        app.focus == Focus::BookTable,
    );
    render_column(
        f,
        columns[1],
        &app.services.authors,
        &app.author_form,
        &app.author_table,
        app.focus == Focus::AuthorForm,
        app.focus == Focus::AuthorTable,
    );

    render_status_bar(f, app, main_chunks[2]);
}

fn render_header(f: &mut Frame, area: Rect) {
    let line = Line::from(vec![
        Span::styled(
            " Library ",
            Style::default()
                .fg(theme::MAUVE)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("Management System ", Style::default().fg(theme::TEXT)),
    ]);
    let paragraph = Paragraph::new(line).style(Style::default().bg(theme::SURFACE0));
    f.render_widget(paragraph, area);
}

/// One record column: form on top, table below.
fn render_column<R: Record>(
    f: &mut Frame,
    area: Rect,
    manager: &RecordManager<R>,
    form: &FormView<R>,
    table: &TableView,
    form_focused: bool,
    table_focused: bool,
) {
    // Three lines per field, one submit label line, two border lines.
    let form_height = FormView::<R>::fields().len() as u16 * 3 + 3;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(form_height), Constraint::Min(4)])
        .split(area);

    render_form(f, chunks[0], manager, form, form_focused);
    render_records(f, chunks[1], manager, table, table_focused);
}

fn render_form<R: Record>(
    f: &mut Frame,
    area: Rect,
    manager: &RecordManager<R>,
    form: &FormView<R>,
    focused: bool,
) {
    let border_color = if focused {
        theme::PANEL_BORDER_ACTIVE
    } else {
        theme::PANEL_BORDER
    };
    let block = Block::default()
        .title(format!("{}s", R::KIND))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let mut lines = Vec::with_capacity(FormView::<R>::fields().len() * 3 + 1);
    for (idx, field) in FormView::<R>::fields().iter().enumerate() {
        let is_active = focused && idx == form.active;
        let label_style = if is_active {
            Style::default()
                .fg(theme::MAUVE)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme::SUBTEXT0)
        };
        lines.push(Line::from(Span::styled(field.label, label_style)));
        lines.push(input_line(&form.inputs[idx], form.cursor, is_active));
        match form.errors.get(field.id) {
            Some(message) => lines.push(Line::from(Span::styled(
                message,
                Style::default().fg(theme::STATUS_ERROR),
            ))),
            None => lines.push(Line::from("")),
        }
    }

    // Submit label, toggled by the edit state.
    let action = if manager.is_editing() {
        format!("Update {}", R::KIND)
    } else {
        format!("Add {}", R::KIND)
    };
    lines.push(Line::from(vec![
        Span::styled("[Enter] ", Style::default().fg(theme::GREEN)),
        Span::styled(action, Style::default().fg(theme::SUBTEXT1)),
    ]));

    let paragraph = Paragraph::new(lines).block(block);
    f.render_widget(paragraph, area);
}

/// One input row, with a block cursor when the field is active.
fn input_line(value: &str, cursor: usize, active: bool) -> Line<'_> {
    let prompt = Span::styled("> ", Style::default().fg(theme::SURFACE2));
    let text_style = Style::default().fg(theme::TEXT);
    if !active {
        return Line::from(vec![prompt, Span::styled(value, text_style)]);
    }

    let cursor_style = Style::default()
        .fg(theme::BASE)
        .bg(theme::TEXT)
        .add_modifier(Modifier::SLOW_BLINK);
    let at = cursor.min(value.len());
    let (before, rest) = value.split_at(at);
    let mut spans = vec![prompt, Span::styled(before, text_style)];
    let mut chars = rest.chars();
    match chars.next() {
        Some(c) => {
            spans.push(Span::styled(c.to_string(), cursor_style));
            spans.push(Span::styled(chars.as_str(), text_style));
        }
        None => spans.push(Span::styled(" ", cursor_style)),
    }
    Line::from(spans)
}

fn render_records<R: Record>(
    f: &mut Frame,
    area: Rect,
    manager: &RecordManager<R>,
    table: &TableView,
    focused: bool,
) {
    let border_color = if focused {
        theme::PANEL_BORDER_ACTIVE
    } else {
        theme::PANEL_BORDER
    };
    let block = Block::default()
        .title(format!("{}s List [{}]", R::KIND, manager.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    if manager.is_empty() {
        let paragraph = Paragraph::new("No records yet. Fill the form and press Enter.")
            .style(Style::default().fg(theme::SUBTEXT0))
            .block(block);
        f.render_widget(paragraph, area);
        return;
    }

    let fields = FormView::<R>::fields();
    let header = Row::new(fields.iter().map(|field| field.label).collect::<Vec<_>>()).style(
        Style::default()
            .fg(theme::SUBTEXT0)
            .add_modifier(Modifier::BOLD),
    );
    let rows: Vec<Row> = manager
        .rows()
        .iter()
        .map(|record| Row::new(record.to_draft().values()))
        .collect();
    let widths = vec![Constraint::Ratio(1, fields.len() as u32); fields.len()];

    let widget = Table::new(rows, widths)
        .header(header)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(theme::SURFACE0)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = TableState::default();
    state.select(Some(table.selected.min(manager.len() - 1)));
    f.render_stateful_widget(widget, area, &mut state);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let mut spans = Vec::new();
    if let Some(status) = &app.status {
        let color = match status.kind {
            StatusKind::Info => theme::STATUS_SUCCESS,
            StatusKind::Error => theme::STATUS_ERROR,
        };
        spans.push(Span::styled(
            format!(" {} ", status.text),
            Style::default().fg(color),
        ));
        spans.push(Span::styled("│ ", Style::default().fg(theme::SURFACE1)));
    } else {
        spans.push(Span::raw(" "));
    }

    spans.extend([
        Span::styled("[Tab]", Style::default().fg(theme::BLUE)),
        Span::styled(" Focus  ", Style::default().fg(theme::SUBTEXT1)),
        Span::styled("[↑↓]", Style::default().fg(theme::BLUE)),
        Span::styled(" Move  ", Style::default().fg(theme::SUBTEXT1)),
        Span::styled("[Enter]", Style::default().fg(theme::GREEN)),
        Span::styled(" Save  ", Style::default().fg(theme::SUBTEXT1)),
        Span::styled("[e]", Style::default().fg(theme::YELLOW)),
        Span::styled(" Edit  ", Style::default().fg(theme::SUBTEXT1)),
        Span::styled("[d]", Style::default().fg(theme::RED)),
        Span::styled(" Delete  ", Style::default().fg(theme::SUBTEXT1)),
        Span::styled("[Esc]", Style::default().fg(theme::MAUVE)),
        Span::styled(" Quit", Style::default().fg(theme::SUBTEXT1)),
    ]);

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(theme::MANTLE));
    f.render_widget(status, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BookDraft;
    use ratatui::{backend::TestBackend, Terminal};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let area = buffer.area;
        let mut text = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                text.push_str(buffer.get(x, y).symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_render_empty_screen() {
        let backend = TestBackend::new(100, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        let app = App::new();

        terminal.draw(|f| render(f, &app)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Library"));
        assert!(text.contains("Add Book"));
        assert!(text.contains("Add Author"));
        assert!(text.contains("Books List [0]"));
        assert!(text.contains("Authors List [0]"));
        assert!(text.contains("ISBN number"));
        assert!(text.contains("No records yet"));
    }

    #[test]
    fn test_render_rows_and_errors() {
        let backend = TestBackend::new(120, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut app = App::new();
        app.services
            .books
            .submit(&BookDraft {
                title: "Dune".to_string(),
                author: "Frank Herbert".to_string(),
                isbn: "123".to_string(),
                publication_date: "1965-08-01".to_string(),
            })
            .unwrap();
        // Failed author submit leaves field messages behind.
        app.focus = Focus::AuthorForm;
        app.handle_key(crossterm::event::KeyEvent::new(
            crossterm::event::KeyCode::Enter,
            crossterm::event::KeyModifiers::NONE,
        ));

        terminal.draw(|f| render(f, &app)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Books List [1]"));
        assert!(text.contains("Dune"));
        assert!(text.contains("1965-08-01"));
        assert!(text.contains("Name is required"));
        assert!(text.contains("Author not saved"));
    }

    #[test]
    fn test_render_editing_title() {
        let backend = TestBackend::new(100, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut app = App::new();
        app.services
            .books
            .submit(&BookDraft {
                title: "Dune".to_string(),
                author: "Frank Herbert".to_string(),
                isbn: "123".to_string(),
                publication_date: "1965-08-01".to_string(),
            })
            .unwrap();
        app.services.books.begin_edit(0).unwrap();

        terminal.draw(|f| render(f, &app)).unwrap();

        assert!(buffer_text(&terminal).contains("Update Book"));
    }
}
