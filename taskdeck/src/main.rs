//! `TaskDeck` — terminal-native task list manager.
//!
//! Launches the TUI over a file-backed task store. Configuration via CLI
//! flags, environment variables, or config file
//! (`~/.config/taskdeck/config.toml`).
//!
//! ```bash
//! # Default data directory
//! cargo run --bin taskdeck
//!
//! # Explicit data directory, memory-only session
//! cargo run --bin taskdeck -- --data-dir /tmp/tasks
//! cargo run --bin taskdeck -- --no-persist
//! ```

use std::io;
use std::path::Path;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing_appender::non_blocking::WorkerGuard;

use taskdeck::app::App;
use taskdeck::config::{CliArgs, ClientConfig};
use taskdeck::ui;
use taskdeck_core::{FileKvStore, MemoryKvStore, TaskStore, TaskVault};

fn main() -> io::Result<()> {
    let cli = CliArgs::parse();

    // Load and resolve configuration (CLI args > config file > defaults).
    let config = match ClientConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: failed to load config file: {e}");
            ClientConfig::default()
        }
    };

    // Initialize logging before terminal setup (logs go to file, not stdout).
    let _log_guard = init_logging(&cli.log_level, cli.log_file.as_deref());

    tracing::info!("taskdeck starting");

    let store = TaskStore::open(build_vault(&config));

    // Set up terminal.
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app.
    let result = run_app(&mut terminal, store, &config);

    // Restore terminal.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("taskdeck exiting");
    result
}

/// Build the persistence vault from resolved configuration.
///
/// Falls back to a memory-only store when persistence is disabled or no
/// usable data directory exists; the session still works, it just doesn't
/// survive a restart.
fn build_vault(config: &ClientConfig) -> TaskVault {
    if !config.persist {
        tracing::info!("persistence disabled, tasks are memory-only");
        return TaskVault::new(Box::new(MemoryKvStore::new()));
    }
    match config.storage_dir() {
        Ok(dir) => {
            tracing::info!(dir = %dir.display(), "using file-backed task store");
            TaskVault::new(Box::new(FileKvStore::new(dir)))
        }
        Err(e) => {
            tracing::warn!("no usable data directory ({e}), tasks will not persist");
            TaskVault::new(Box::new(MemoryKvStore::new()))
        }
    }
}

/// Initialize file-based logging.
///
/// Logs are written to a file (never stdout, since ratatui owns the
/// terminal). Returns a [`WorkerGuard`] that must be held until shutdown to
/// ensure all buffered log entries are flushed.
fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let default_path = std::env::temp_dir().join("taskdeck.log");
    let log_path = file_path.unwrap_or(&default_path);

    let log_dir = log_path.parent()?;
    let file_name = log_path.file_name()?.to_str()?;

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    Some(guard)
}

/// Main application loop.
///
/// Every mutation happens synchronously inside `handle_key_event`; the
/// store persists as a side effect, so there is nothing to flush on exit.
fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    store: TaskStore,
    config: &ClientConfig,
) -> io::Result<()> {
    let mut app = App::new(store, config.date_format.clone());

    loop {
        terminal.draw(|frame| ui::draw(frame, &app))?;

        if event::poll(config.poll_timeout)?
            && let Event::Key(key) = event::read()?
        {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            app.handle_key_event(key);
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
