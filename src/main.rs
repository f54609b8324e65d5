//! Biblio - Library Management System
//!
//! Terminal catalog for books and authors.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use biblio::{config::AppConfig, tui};

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load()?;

    // Initialize tracing. The interface owns stdout, so logs go to a
    // daily-rolling file; the guard flushes the writer on exit.
    let file_appender = tracing_appender::rolling::daily(&config.logging.directory, "biblio.log");
    let (writer, _guard) = tracing_appender::non_blocking(file_appender);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("biblio={}", config.logging.level).into());

    let fmt_layer = if config.logging.format == "json" {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(writer)
            .with_ansi(false)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();

    tracing::info!("Starting Biblio v{}", env!("CARGO_PKG_VERSION"));

    tui::run(tui::App::new())?;

    tracing::info!("Shutting down");
    Ok(())
}
