mod app;
mod ui;
mod watch;

use anyhow::{bail, Result};
use clap::Parser;
use ratatui::crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    io,
    path::PathBuf,
    time::{Duration, Instant},
};

#[derive(Parser)]
#[command(
    name = "logtab",
    version,
    about = "Watch a directory for .log files and tail them in tabs",
    long_about = "Watch a directory for .log files and tail them in tabs.\n\n\
        Every .log file in DIR gets its own tab that follows appended content\n\
        live; files are picked up and dropped as they come and go."
)]
struct Cli {
    /// Directory to monitor for .log files
    #[arg(default_value = ".")]
    dir: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Validate before any terminal mode change, so the error actually
    // reaches stderr.
    if !cli.dir.is_dir() {
        bail!(
            "invalid path: '{}' does not exist or is not a directory",
            cli.dir.display()
        );
    }
    init_logging();
    tracing::info!("watching {}", cli.dir.display());

    let handle = watch::spawn(cli.dir.clone());
    let mut app = app::App::new(cli.dir, handle);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut app::App) -> Result<()> {
    let tick = Duration::from_millis(200);
    let mut last_tick = Instant::now();

    loop {
        app.drain_notifications();
        terminal.draw(|f| ui::render(f, app))?;

        let timeout = tick.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                // Ctrl-C and 'q' both quit; teardown runs in main.
                if app.handle_key(key) {
                    return Ok(());
                }
            }
        }
        if last_tick.elapsed() >= tick {
            last_tick = Instant::now();
        }
    }
}

/// Route tracing output to a file under the user's state directory.
/// stdout/stderr belong to the alternate screen while the UI runs, so a
/// file is the only place warnings can go. Skipped silently if the
/// directory cannot be created.
fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let Some(base) = dirs::state_dir().or_else(dirs::data_local_dir) else {
        return;
    };
    let log_dir = base.join("logtab");
    if std::fs::create_dir_all(&log_dir).is_err() {
        return;
    }
    let Ok(file) = std::fs::File::create(log_dir.join("logtab.log")) else {
        return;
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::sync::Arc::new(file))
        .with_ansi(false)
        .init();
}
