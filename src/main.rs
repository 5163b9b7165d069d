mod display;

use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal, ExecutableCommand,
};
use rand::thread_rng;

use jack_flap::entities::{Viewport, CHARACTERS};
use jack_flap::score::{FileStore, HighScore};
use jack_flap::{Config, Driver, Error, Phase};

use display::CellSize;

// ── Logging ───────────────────────────────────────────────────────────────────

/// The terminal is in raw alternate-screen mode, so log lines go to a file
/// instead of stderr. Installed before the config is read; the level is
/// narrowed once the config is known.
fn init_logging() {
    let path = std::env::temp_dir().join("jack_flap.log");
    let mut builder = env_logger::Builder::new();
    builder.filter_level(log::LevelFilter::Trace);
    if let Ok(spec) = std::env::var("RUST_LOG") {
        builder.parse_filters(&spec);
    }
    if let Ok(file) = std::fs::File::create(&path) {
        builder.target(env_logger::Target::Pipe(Box::new(file)));
        let _ = builder.try_init();
    }
    // Startup default when config is missing or malformed.
    if std::env::var_os("RUST_LOG").is_none() {
        log::set_max_level(log::LevelFilter::Warn);
    }
}

// ── Viewport ──────────────────────────────────────────────────────────────────

fn viewport_for(cols: u16, rows: u16, cell: CellSize) -> Viewport {
    Viewport {
        width: cols as f32 * cell.width,
        height: rows as f32 * cell.height,
    }
}

// ── Input ─────────────────────────────────────────────────────────────────────

enum Control {
    Continue,
    Quit,
}

/// Route one terminal event to the driver's semantic handlers.
fn handle_event(
    driver: &mut Driver<FileStore>,
    event: Event,
    cell: CellSize,
) -> Control {
    match event {
        Event::Key(KeyEvent { code, kind, modifiers, .. }) => {
            if kind == KeyEventKind::Release {
                return Control::Continue;
            }
            match code {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Control::Quit,
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    return Control::Quit;
                }
                _ => {}
            }
            match driver.phase() {
                Phase::Menu => {
                    if let KeyCode::Char(c) = code {
                        let picked = c.to_digit(10).and_then(|i| CHARACTERS.get(i as usize));
                        if let Some(character) = picked {
                            driver.select(character.clone());
                        }
                    }
                }
                Phase::Running => {
                    if matches!(code, KeyCode::Char(' ') | KeyCode::Up | KeyCode::Char('w')) {
                        driver.impulse();
                    }
                }
                Phase::Ended => match code {
                    KeyCode::Char(' ') => driver.restart(),
                    KeyCode::Enter => driver.choose_new(),
                    _ => {}
                },
            }
        }
        Event::Resize(cols, rows) => driver.resize(viewport_for(cols, rows, cell)),
        _ => {}
    }
    Control::Continue
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Paces the driver at the configured frame rate. Each pass drains input,
/// runs the pending tick if any, renders, then sleeps out the frame budget.
fn run<W: Write>(
    out: &mut W,
    driver: &mut Driver<FileStore>,
    rx: &mpsc::Receiver<Event>,
    config: &Config,
) -> std::io::Result<()> {
    let mut rng = thread_rng();
    let cell = CellSize {
        width: config.cell_width,
        height: config.cell_height,
    };
    let frame = config.frame_duration();

    loop {
        let frame_start = Instant::now();

        while let Ok(event) = rx.try_recv() {
            if let Control::Quit = handle_event(driver, event, cell) {
                return Ok(());
            }
        }

        if let Some(token) = driver.pending_frame() {
            driver.on_frame(token, &mut rng);
        }

        display::render(out, driver, cell)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            thread::sleep(frame - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), Error> {
    init_logging();
    let config = Config::load();
    if std::env::var_os("RUST_LOG").is_none() {
        log::set_max_level(config.log_filter());
    }

    let store = FileStore::new(config.high_score_path());
    log::info!("high score file: {}", store.path().display());
    let high_score = HighScore::load(store);

    let cell = CellSize {
        width: config.cell_width,
        height: config.cell_height,
    };
    let (cols, rows) = terminal::size()?;
    let mut driver = Driver::new(config.tuning.clone(), viewport_for(cols, rows, cell), high_score);

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = run(&mut out, &mut driver, &rx, &config);

    // Always restore the terminal
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result.map_err(Error::from)
}
