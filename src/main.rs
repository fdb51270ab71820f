use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use hydroguard::app::export_readings;
use hydroguard::{events, load_readings, seed_readings, ui, App, SensorReading, Settings, Theme};

#[derive(Parser, Debug)]
#[command(name = "hydroguard")]
#[command(about = "Terminal dashboard for water-infrastructure sensor readings")]
struct Args {
    /// Path to a TOML config file (optional)
    #[arg(short, long, default_value = "hydroguard.toml")]
    config: PathBuf,

    /// JSON file with sensor readings to show instead of the built-in samples
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Fixed model weight (untrained random weight if unset)
    #[arg(long, allow_hyphen_values = true)]
    weight: Option<f64>,

    /// Fixed model bias (zero if unset)
    #[arg(long, allow_hyphen_values = true)]
    bias: Option<f64>,

    /// Export the readings and counters to a JSON file and exit
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// Where to write logs (the terminal belongs to the UI)
    #[arg(long, default_value = "hydroguard.log")]
    log_file: PathBuf,
}

fn main() -> Result<()> {
    run(Args::parse())
}

fn run(args: Args) -> Result<()> {
    let mut settings = Settings::load(&args.config)?;
    if args.weight.is_some() {
        settings.model.weight = args.weight;
    }
    if args.bias.is_some() {
        settings.model.bias = args.bias;
    }

    let readings = match args.data {
        Some(ref path) => load_readings(path)?,
        None => seed_readings(Utc::now()),
    };

    // Handle export mode (non-interactive)
    if let Some(export_path) = args.export {
        export_readings(&readings, settings.dashboard.maintenance_tasks, &export_path)?;
        println!("Exported readings to: {}", export_path.display());
        return Ok(());
    }

    // The log file is only for the interactive dashboard
    init_logging(&args.log_file)?;
    tracing::debug!(?settings, "configuration loaded");

    // Background model work runs on this runtime while the UI loop owns the main thread
    let rt = tokio::runtime::Runtime::new()?;
    let _guard = rt.enter();

    run_tui(readings, settings)
}

/// Send tracing output to a file, filtered by `RUST_LOG` (default `info`).
fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Run the TUI over the given readings
fn run_tui(readings: Vec<SensorReading>, settings: Settings) -> Result<()> {
    let theme = Theme::from_choice(settings.dashboard.theme);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic);
    }));

    let mut app = App::new(readings, settings.thresholds, theme);
    app.maintenance_tasks = settings.dashboard.maintenance_tasks;
    app.start_model(settings.model);

    let result = run_app(
        &mut terminal,
        &mut app,
        Duration::from_millis(settings.dashboard.tick_ms),
    );

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    tick: Duration,
) -> Result<()> {
    while app.running {
        app.poll_updates();

        terminal.draw(|frame| ui::draw(frame, app))?;

        if let Some(event) = events::poll_event(tick)? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => events::handle_mouse_event(app, mouse),
                // Terminal will redraw on next iteration
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
    }

    tracing::info!("dashboard closed");
    Ok(())
}
