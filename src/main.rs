mod display;
mod keys;

use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use alien_invasion::compute::{init_state, step};
use alien_invasion::config::{GameConfig, Viewport};
use alien_invasion::render::render_frame;

use display::TerminalSurface;
use keys::KeyTracker;

const FRAME: Duration = Duration::from_micros(16_667); // ≈60 FPS

/// Nominal size of one terminal cell in game units, used to size the
/// play field from the terminal.
const CELL_WIDTH: f32 = 10.0;
const CELL_HEIGHT: f32 = 20.0;

/// Alien Invasion - a terminal arcade shooter
#[derive(Parser, Debug)]
#[command(name = "alien_invasion", version, about, long_about = None)]
struct Cli {
    /// Play-field width in game units (defaults to fit the terminal)
    #[arg(long)]
    width: Option<f32>,

    /// Play-field height in game units (defaults to fit the terminal)
    #[arg(long)]
    height: Option<f32>,

    /// Seed for a reproducible session
    #[arg(long)]
    seed: Option<u64>,

    /// Log file (defaults to alien_invasion.log in the temp directory)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn config(&self, cols: u16, rows: u16) -> GameConfig {
        let fitted = Viewport::fit_display(cols as f32 * CELL_WIDTH, rows as f32 * CELL_HEIGHT);
        GameConfig {
            viewport: Viewport::new(
                self.width.unwrap_or(fitted.width),
                self.height.unwrap_or(fitted.height),
            ),
            seed: self.seed,
        }
    }
}

/// `RUST_LOG` directives when they parse, INFO otherwise.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// Logs go to a file: stdout belongs to the game screen.
fn init_logging(path: Option<PathBuf>) -> Result<()> {
    let path = path.unwrap_or_else(|| std::env::temp_dir().join("alien_invasion.log"));
    let log_file = std::fs::File::create(&path)
        .with_context(|| format!("creating log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Restore terminal state - called on normal exit and from the panic hook.
fn restore_terminal() {
    let mut out = stdout();
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
}

// ── Game loop ─────────────────────────────────────────────────────────────────

fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>, config: GameConfig) -> Result<()> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let (cols, rows) = terminal::size()?;
    let mut surface = TerminalSurface::new(cols, rows, config.viewport);
    let mut tracker = KeyTracker::new();
    let mut state = init_state(config.viewport, &mut rng);
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // Drain all pending input events (non-blocking)
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(key) => tracker.handle(key, frame),
                Event::Resize(cols, rows) => surface.resize(cols, rows),
                _ => {}
            }
        }
        if tracker.quit_requested() {
            tracing::info!(score = state.score, high_score = state.high_score, "quit");
            return Ok(());
        }

        let input = tracker.frame_input(frame);
        state = step(&state, &input, &mut rng);

        render_frame(&mut surface, &state);
        surface.flush(out)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.clone())?;

    let (cols, rows) = terminal::size().context("querying terminal size")?;
    let config = cli.config(cols, rows);
    config.validate()?;
    tracing::info!(?config, "starting");

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore_terminal();
        original_hook(info);
    }));

    let mut out = BufWriter::new(stdout());
    terminal::enable_raw_mode().context("enabling raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread to blocking event reads so the game loop never
    // blocks on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = run(&mut out, &rx, config);

    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    drop(out);
    restore_terminal();

    if let Err(err) = &result {
        tracing::error!("{err:#}");
    }
    result
}
