mod app;
mod celebration;
mod config;
mod image_source;
mod render;
mod theme;

use anyhow::{Context, Result};
use app::{App, AppAction};
use clap::Parser;
use config::Args;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use image::RgbImage;
use ninepiece_core::{GameSession, InputMapper, Shuffler, TileStore};
use std::fs::File;
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;
    info!(?args, "starting ninepiece");

    let (store, load_error) = load_store(&args);
    let shuffler = match args.seed {
        Some(seed) => Shuffler::with_seed(seed, args.shuffle_moves),
        None => Shuffler::new(args.shuffle_moves),
    };
    let session = GameSession::new(store, shuffler, InputMapper::new(args.tile_edge));

    // Numbers help on the generated picture, which has no recognisable subject
    let mut app = App::new(session, args.theme, args.labels || args.image.is_none());
    if let Some(err) = load_error {
        app.show_error(err);
    }

    // Setup terminal
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    enter_screen(&mut stdout, disable_raw_mode)?;

    let result = run_app(&mut stdout, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen, DisableMouseCapture)?;

    if let Err(ref e) = result {
        warn!("exiting with error: {:#}", e);
    }
    result
}

/// Switch to the alternate screen with mouse capture. On failure raw mode is
/// left through `leave_raw` before the error is returned.
fn enter_screen<W: Write>(out: &mut W, leave_raw: impl FnOnce() -> io::Result<()>) -> Result<()> {
    if let Err(err) = execute!(out, EnterAlternateScreen, EnableMouseCapture) {
        if let Err(restore) = leave_raw() {
            warn!(error = %restore, "failed to leave raw mode");
        }
        return Err(err).context("failed to enter the alternate screen");
    }
    Ok(())
}

/// Route logs to `--log-file`; without one nothing is installed, since the
/// terminal belongs to the game.
fn init_logging(args: &Args) -> Result<()> {
    let Some(ref path) = args.log_file else {
        return Ok(());
    };

    let log_file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_new(&args.log_level)
        .with_context(|| format!("invalid log filter `{}`", args.log_level))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init()
        .map_err(anyhow::Error::from_boxed)
        .context("failed to install the log subscriber")?;
    Ok(())
}

/// Build the board from `--image`, or the generated picture. A picture that
/// fails to load leaves an empty board and the message to show.
fn load_store(args: &Args) -> (TileStore<RgbImage>, Option<String>) {
    let Some(ref path) = args.image else {
        return (image_source::generated_tiles(args.tile_edge), None);
    };

    match image_source::load_tiles(path, args.tile_edge) {
        Ok(store) => (store, None),
        Err(err) => {
            warn!(error = %err, "picture unavailable");
            (TileStore::unavailable(), Some(err.to_string()))
        }
    }
}

fn run_app(stdout: &mut io::Stdout, app: &mut App) -> Result<()> {
    let (width, height) = terminal::size()?;
    app.resize(width, height);
    let mut last_tick = Instant::now();

    loop {
        // Determine tick rate based on whether the confetti is falling
        let tick_rate = app.get_tick_rate();

        if app.take_redraw() {
            render::render(stdout, app)?;
            stdout.flush()?;
        }

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            let action = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    // Handle Ctrl+C
                    if key.modifiers.contains(KeyModifiers::CONTROL)
                        && key.code == KeyCode::Char('c')
                    {
                        break;
                    }
                    app.handle_key(key)
                }
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                Event::Resize(width, height) => {
                    app.resize(width, height);
                    AppAction::Continue
                }
                _ => AppAction::Continue,
            };
            if action == AppAction::Quit {
                break;
            }
        }

        // Tick animations and message timer
        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }
    }

    info!("exiting");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use tempfile::tempdir;

    /// Terminal that rejects every write
    struct BrokenTerminal;

    impl Write for BrokenTerminal {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "terminal gone"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "terminal gone"))
        }
    }

    fn args(extra: &[&str]) -> Args {
        let base = ["ninepiece", "--tile-edge", "8"];
        Args::try_parse_from(base.iter().chain(extra)).unwrap()
    }

    #[test]
    fn test_failed_screen_setup_leaves_raw_mode() {
        let left = Cell::new(false);
        let result = enter_screen(&mut BrokenTerminal, || {
            left.set(true);
            Ok(())
        });

        assert!(result.is_err());
        assert!(left.get());
    }

    #[test]
    fn test_screen_setup_keeps_raw_mode_on_success() {
        let mut out = Vec::new();
        let left = Cell::new(false);
        enter_screen(&mut out, || {
            left.set(true);
            Ok(())
        })
        .unwrap();

        assert!(!out.is_empty());
        assert!(!left.get());
    }

    #[test]
    fn test_second_logger_install_is_reported() {
        let dir = tempdir().unwrap();
        let log = dir.path().join("ninepiece.log");
        let args = args(&["--log-file", log.to_str().unwrap()]);

        init_logging(&args).unwrap();
        let err = init_logging(&args).unwrap_err();
        assert!(err.to_string().contains("log subscriber"));
    }

    #[test]
    fn test_missing_picture_leaves_empty_board() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("descarga.jpeg");
        let path_arg = path.to_str().unwrap();

        let (store, message) = load_store(&args(&["--image", path_arg]));

        assert!(store.is_empty());
        assert_eq!(store.empty_cell(), ninepiece_core::Cell::TARGET_EMPTY);
        let message = message.unwrap();
        assert!(message.contains(path_arg), "{}", message);
    }

    #[test]
    fn test_undecodable_picture_leaves_empty_board() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not an image").unwrap();

        let (store, message) = load_store(&args(&["--image", path.to_str().unwrap()]));

        assert!(store.is_empty());
        assert!(message.is_some());
    }

    #[test]
    fn test_no_picture_uses_generated_tiles() {
        let (store, message) = load_store(&args(&[]));

        assert_eq!(store.len(), 8);
        assert!(store.is_solved());
        assert!(message.is_none());
    }
}
