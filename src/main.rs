//! contacts-manager binary entry point.
//!
//! Parses flags, optionally starts file logging, seeds the directory,
//! initializes the terminal in raw mode, runs the TUI event loop and
//! restores the terminal state on exit.
//!
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing_subscriber::EnvFilter;

use contacts_manager::app::{self, AppState, default_config_dir};
use contacts_manager::launcher::Launcher;
use contacts_manager::source::{ContactSource, JsonFileSource, SampleContacts};

#[derive(Parser, Debug)]
#[command(name = "contacts-manager", version, about = "Browse and edit contacts in the terminal")]
struct Args {
    /// JSON file with seed contacts (defaults to the built-in samples)
    #[arg(long, env = "CONTACTS_SEED")]
    seed: Option<PathBuf>,

    /// Directory holding theme.conf and keybinds.conf
    #[arg(long, env = "CONTACTS_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    /// Command that opens sms:/tel:/mailto: URIs, e.g. xdg-open
    #[arg(long, env = "CONTACTS_OPEN_COMMAND")]
    open_command: Option<String>,

    /// Write logs to this file; logging is off otherwise
    #[arg(long, env = "CONTACTS_LOG_FILE")]
    log_file: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// Route tracing output to `path`. The terminal belongs to the TUI.
fn init_logging(path: &Path, level: &str) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .init();
    Ok(())
}

/// Initialize a Crossterm-backed `ratatui` terminal in raw mode.
fn init_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Program entry point: run the TUI and report any top-level error to stderr.
fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log_file {
        init_logging(path, &args.log_level)?;
    }

    let source: Box<dyn ContactSource> = match &args.seed {
        Some(path) => Box::new(JsonFileSource::new(path)),
        None => Box::new(SampleContacts),
    };
    let config_dir = args.config_dir.clone().unwrap_or_else(default_config_dir);
    tracing::info!(source = source.name(), config_dir = %config_dir.display(), "starting");
    let mut state = AppState::new(source.as_ref(), &config_dir, Launcher::new(args.open_command));

    let mut terminal = init_terminal().context("init terminal")?;

    let res = app::run(&mut terminal, &mut state);

    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .ok();
    terminal.show_cursor().ok();

    if let Err(err) = res {
        tracing::error!(error = %err, "application error");
        eprintln!("application error: {err:#}");
    }
    Ok(())
}
