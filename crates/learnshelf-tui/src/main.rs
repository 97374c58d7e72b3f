//! learnshelf - a terminal course library.
//!
//! Shows a rotating banner and a grid of courses. The course list is served
//! from the local snapshot when trust-cache mode is on, otherwise fetched from
//! the course service and cached for next time.

mod app;
mod format;
mod ui;

use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use learnshelf_core::Config;

use app::{App, StoreKind};
use ui::input::handle_input;
use ui::render::render;

// ============================================================================
// Constants
// ============================================================================

/// Timeout for polling terminal events (in milliseconds)
const EVENT_POLL_TIMEOUT_MS: u64 = 100;

/// Log file written inside the cache directory
const LOG_FILE: &str = "learnshelf.log";

const USAGE: &str = "\
Usage: learnshelf [OPTIONS]

Options:
  --ephemeral   Keep the course snapshot in memory only
  --no-cache    Always fetch from the network, ignoring the snapshot
  -h, --help    Print this help
";

#[derive(Debug, Default, PartialEq, Eq)]
struct CliOptions {
    ephemeral: bool,
    no_cache: bool,
    help: bool,
}

fn parse_args(args: &[String]) -> Result<CliOptions> {
    let mut options = CliOptions::default();
    for arg in args {
        match arg.as_str() {
            "--ephemeral" => options.ephemeral = true,
            "--no-cache" => options.no_cache = true,
            "-h" | "--help" => options.help = true,
            other => anyhow::bail!("Unknown argument: {}\n\n{}", other, USAGE),
        }
    }
    Ok(options)
}

/// Initialize the tracing subscriber, logging to a file so output never
/// draws over the terminal UI. Use RUST_LOG to control the level.
fn init_tracing(log_dir: &Path) -> WorkerGuard {
    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .with(filter)
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_args(&args)?;
    if options.help {
        print!("{}", USAGE);
        return Ok(());
    }

    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let (mut config, config_error) = match Config::load() {
        Ok(c) => (c, None),
        Err(e) => (Config::default(), Some(e)),
    };
    if options.no_cache {
        config.trust_cache = false;
    }

    let log_dir = config.cache_dir().unwrap_or_else(|_| std::env::temp_dir());
    std::fs::create_dir_all(&log_dir)?;
    let _log_guard = init_tracing(&log_dir);
    info!("learnshelf starting");
    if let Some(e) = config_error {
        warn!(error = %e, "Failed to load config, using defaults");
    }

    let store_kind = if options.ephemeral {
        StoreKind::Memory
    } else {
        StoreKind::File
    };
    let mut app = App::new(config, store_kind)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    app.start_load();
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    info!("learnshelf shutting down");
    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        app.check_load_state();
        app.tick(Instant::now());

        terminal.draw(|f| render(f, app))?;

        // Poll for events with timeout so background loads show up promptly
        if event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    return Ok(());
                }
                handle_input(app, key);
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
