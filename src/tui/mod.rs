//! Terminal interface for the catalog.
//!
//! One screen: book and author forms on top of their tables, driven by a
//! synchronous key-event loop. While the interface owns the terminal all
//! logging goes to the file appender, never stdout.

pub mod app;
pub mod panels;
pub mod theme;

pub use app::App;

use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::error::AppResult;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Run the interface until the user quits.
pub fn run(mut app: App) -> AppResult<()> {
    // Restore the terminal even when a draw or a handler panics.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        default_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    stdout.flush()?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> AppResult<()> {
    loop {
        terminal.draw(|f| panels::render(f, app))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                // Some terminals also deliver release and repeat events.
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
