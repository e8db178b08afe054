//! atelier: terminal dashboard for taking a clothing line from design
//! files to a manufacturer.

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io;
use std::panic;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use atelier::{App, AppConfig};

/// Setup the terminal for TUI mode
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Initialize logging with RUST_LOG environment variable support
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// Install a panic hook that restores the terminal before printing the panic
fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}

/// Layered configuration, or the built-in defaults when it cannot be read
fn load_config() -> AppConfig {
    let work_dir = std::env::current_dir().ok();
    match AppConfig::load(work_dir.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Falling back to default configuration: {}", e);
            AppConfig::default()
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    install_panic_hook();

    let config = load_config();
    tracing::info!(
        batch_size = config.catalog.batch_size,
        max_items = config.catalog.max_items,
        "Starting atelier"
    );

    let mut app = App::new(config)?;
    let mut terminal = setup_terminal()?;

    let result = tokio::select! {
        res = app.run(&mut terminal) => res,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received Ctrl+C, shutting down gracefully");
            Ok(())
        }
    };

    // Restore terminal (always, even on error)
    restore_terminal(&mut terminal)?;

    result?;

    Ok(())
}
