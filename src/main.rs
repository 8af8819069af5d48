mod tui;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind},
    execute, terminal,
};
use log::{debug, info, warn};
use skyhop::{
    ConfigError, FileScoreStore, Game, GameConfig, MemoryScoreStore, ScoreStore, StoreError,
};
use std::io::{self, Stdout, stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use thiserror::Error;

use tui::{Painter, Sound, TerminalScheduler};

/// ~60 fps; the simulation clock absorbs whatever we actually get.
const FRAME_BUDGET: Duration = Duration::from_millis(16);

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// First CLI argument, else the user's config file if it exists, else the
/// built-in defaults.
fn load_config() -> Result<GameConfig, ConfigError> {
    if let Some(path) = std::env::args_os().nth(1).map(PathBuf::from) {
        return GameConfig::load(&path);
    }
    match GameConfig::default_path() {
        Some(path) if path.exists() => GameConfig::load(&path),
        _ => Ok(GameConfig::default()),
    }
}

/// The on-disk store, or a session-only one starting from 0 when there is
/// nowhere to keep the file.
fn open_store(opened: Result<FileScoreStore, StoreError>) -> Box<dyn ScoreStore> {
    match opened {
        Ok(store) => {
            info!("best score file: {}", store.path().display());
            Box::new(store)
        }
        Err(e) => {
            warn!("best score won't be saved: {e}");
            Box::new(MemoryScoreStore::default())
        }
    }
}

// ── Main ────────────────────────────────────────────────────────────────────

fn main() -> Result<(), AppError> {
    env_logger::init();

    let config = load_config()?;
    let store = open_store(FileScoreStore::new());

    terminal::enable_raw_mode()?;
    let mut out = stdout();
    execute!(
        out,
        terminal::EnterAlternateScreen,
        cursor::Hide,
        terminal::DisableLineWrap,
        event::EnableFocusChange,
    )?;

    let result = run(&mut out, config, store);

    execute!(
        out,
        event::DisableFocusChange,
        terminal::LeaveAlternateScreen,
        cursor::Show,
        terminal::EnableLineWrap,
    )?;
    terminal::disable_raw_mode()?;
    result
}

fn run(out: &mut Stdout, config: GameConfig, store: Box<dyn ScoreStore>) -> Result<(), AppError> {
    let (cols, rows) = terminal::size()?;
    let painter = Painter::new(config.world.width, config.world.height, cols, rows);
    let mut game = Game::new(config, TerminalScheduler::new(), painter, store);
    let sound = Sound::open();
    let epoch = Instant::now();

    loop {
        let frame_start = Instant::now();

        // Input
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter => game.on_jump_signal(),
                    KeyCode::Char('r') => {
                        if let Err(e) = game.reset() {
                            debug!("reset ignored: {e}");
                        }
                    }
                    _ => {}
                },
                Event::FocusLost => game.on_visibility_lost(),
                Event::FocusGained => game.on_visibility_regained(),
                Event::Resize(c, r) => game.renderer_mut().resize(c, r),
                _ => {}
            }
        }

        // Timers
        let now = Instant::now();
        while game.scheduler_mut().spawn_due(now) {
            game.on_spawn_tick();
        }
        if game.scheduler_mut().take_frame() {
            let timestamp_ms = now.duration_since(epoch).as_secs_f64() * 1000.0;
            if game.on_frame_tick(timestamp_ms).is_some() {
                if let Some(sound) = &sound {
                    sound.play_death();
                }
            }
        }

        // Render
        game.renderer().buf().render(out)?;

        // Frame pacing
        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_BUDGET {
            std::thread::sleep(FRAME_BUDGET - elapsed);
        }
    }
}
