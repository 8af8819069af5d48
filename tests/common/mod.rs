//! Recording fakes for the game's ports plus a small frame driver.

#![allow(dead_code)]

use std::time::Duration;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use skyhop::clock::REFERENCE_PERIOD_MS;
use skyhop::config::Placement;
use skyhop::{
    Game, GameConfig, GameOver, Rect, Renderer, RunState, Scheduler, ScoreStore,
};

#[derive(Debug, Default)]
pub struct RecordingScheduler {
    pub frame_pending: bool,
    pub frame_requests: u32,
    pub spawn_period: Option<Duration>,
    pub spawn_starts: u32,
}

impl Scheduler for RecordingScheduler {
    fn request_frame(&mut self) {
        self.frame_pending = true;
        self.frame_requests += 1;
    }

    fn cancel_frame(&mut self) {
        self.frame_pending = false;
    }

    fn start_spawn_timer(&mut self, period: Duration) {
        self.spawn_period = Some(period);
        self.spawn_starts += 1;
    }

    fn cancel_spawn_timer(&mut self) {
        self.spawn_period = None;
    }
}

#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub frames: u32,
    pub last_state: Option<RunState>,
    pub obstacle_pairs: Vec<(Rect, Rect)>,
    pub sprite: Option<Rect>,
    pub rotation: f64,
    pub score: u32,
    pub game_overs: Vec<GameOver>,
}

impl Renderer for RecordingRenderer {
    fn begin_frame(&mut self, state: RunState) {
        self.last_state = Some(state);
        self.obstacle_pairs.clear();
    }

    fn draw_obstacle_pair(&mut self, upper: Rect, lower: Rect) {
        self.obstacle_pairs.push((upper, lower));
    }

    fn place_sprite(&mut self, sprite: Rect, rotation: f64) {
        self.sprite = Some(sprite);
        self.rotation = rotation;
    }

    fn update_score(&mut self, score: u32) {
        self.score = score;
    }

    fn end_frame(&mut self) {
        self.frames += 1;
    }

    fn game_over(&mut self, summary: &GameOver) {
        self.game_overs.push(*summary);
    }
}

pub type TestGame<P> = Game<RecordingScheduler, RecordingRenderer, P, ChaCha8Rng>;

pub fn new_game<P: ScoreStore>(config: GameConfig, store: P) -> TestGame<P> {
    Game::with_rng(
        config,
        RecordingScheduler::default(),
        RecordingRenderer::default(),
        store,
        ChaCha8Rng::seed_from_u64(1),
    )
}

/// No gravity, so the player hovers at y = 200 until told otherwise, and
/// every obstacle's gap (125..275) comfortably contains the hitbox.
pub fn hover_config() -> GameConfig {
    let mut config = GameConfig::default();
    config.flight.gravity = 0.0;
    config.obstacles.placement = Placement::Margins {
        top: 125.0,
        bottom: 125.0,
    };
    config
}

/// Feeds frames one reference period apart, like a steady 60 Hz display.
#[derive(Debug, Default)]
pub struct FrameDriver {
    now_ms: f64,
}

const MAX_FRAMES: u32 = 10_000;

impl FrameDriver {
    pub fn tick<P: ScoreStore>(&mut self, game: &mut TestGame<P>) -> Option<GameOver> {
        self.now_ms += REFERENCE_PERIOD_MS;
        game.on_frame_tick(self.now_ms)
    }

    /// Tick until `done` holds, returning a game over if one happens first.
    pub fn run_until<P: ScoreStore>(
        &mut self,
        game: &mut TestGame<P>,
        mut done: impl FnMut(&TestGame<P>) -> bool,
    ) -> Option<GameOver> {
        for _ in 0..MAX_FRAMES {
            if done(&*game) {
                return None;
            }
            if let Some(over) = self.tick(game) {
                return Some(over);
            }
        }
        panic!("condition not reached within {MAX_FRAMES} frames");
    }

    /// Start a hovering run, pass `passes` obstacles one at a time, then
    /// jump straight up until the run ends.
    pub fn play_run<P: ScoreStore>(&mut self, game: &mut TestGame<P>, passes: u32) -> GameOver {
        game.start().expect("run should start");
        for n in 1..=passes {
            game.on_spawn_tick();
            let over = self.run_until(game, |g| g.score() == n);
            assert!(over.is_none(), "run ended before passing obstacle {n}");
        }
        game.on_jump_signal();
        match self.run_until(game, |_| false) {
            Some(over) => over,
            None => unreachable!(),
        }
    }
}
