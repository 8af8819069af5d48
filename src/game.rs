//! The game state machine.
//!
//! [`Game`] is the single owner of everything that changes during a run: the
//! flight state, the obstacle stream, the score and the run state. It is also
//! the only thing that starts or stops the frame schedule and the spawn timer.
//!
//! ```text
//!   Idle --jump/start--> Running --collision/out of bounds--> Ended --reset--> Idle
//! ```
//!
//! Every callback (`on_frame_tick`, `on_spawn_tick`, `on_jump_signal`) checks
//! the current state before acting, so callbacks that were already queued
//! when a run ended or was suspended do nothing.

use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::clock::SimulationClock;
use crate::collision::{first_collision, hitbox_rect, sprite_rect};
use crate::config::GameConfig;
use crate::error::TransitionError;
use crate::flight::{FlightModel, FlightState};
use crate::obstacle::{Obstacle, ObstacleStream};
use crate::ports::{Renderer, Scheduler, ScoreStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreRecord {
    /// Obstacles passed in the current (or last) run.
    pub current: u32,
    /// Best score ever persisted.
    pub best: u32,
}

/// Emitted once when a run ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOver {
    pub score: u32,
    pub best: u32,
    pub new_best: bool,
}

pub struct Game<S, R, P, G = StdRng> {
    config: GameConfig,
    clock: SimulationClock,
    flight: FlightModel,
    obstacles: ObstacleStream,
    score: ScoreRecord,
    state: RunState,
    suspended: bool,
    rng: G,
    scheduler: S,
    renderer: R,
    store: P,
}

impl<S, R, P> Game<S, R, P>
where
    S: Scheduler,
    R: Renderer,
    P: ScoreStore,
{
    pub fn new(config: GameConfig, scheduler: S, renderer: R, store: P) -> Self {
        Self::with_rng(config, scheduler, renderer, store, StdRng::from_entropy())
    }
}

impl<S, R, P, G> Game<S, R, P, G>
where
    S: Scheduler,
    R: Renderer,
    P: ScoreStore,
    G: Rng,
{
    /// Like [`Game::new`] with a caller-provided RNG, for reproducible runs.
    pub fn with_rng(config: GameConfig, scheduler: S, renderer: R, store: P, rng: G) -> Self {
        debug_assert!(config.validate().is_ok(), "invalid game config");

        let best = store.load_best_score();
        let mut game = Self {
            clock: SimulationClock::new(config.clock.reference_period_ms, config.clock.max_delta),
            flight: FlightModel::new(&config.flight, config.world.height),
            obstacles: ObstacleStream::new(&config.obstacles),
            score: ScoreRecord { current: 0, best },
            state: RunState::Idle,
            suspended: false,
            rng,
            scheduler,
            renderer,
            store,
            config,
        };
        game.render();
        game
    }

    // ── Transitions ─────────────────────────────────────────────────────────

    /// Begin a run. From `Ended` this passes through `Idle` first.
    pub fn start(&mut self) -> Result<(), TransitionError> {
        match self.state {
            RunState::Running => return Err(TransitionError::AlreadyRunning),
            RunState::Ended => self.reset()?,
            RunState::Idle => {}
        }

        self.reset_scene();
        self.score.current = 0;
        self.suspended = false;
        self.state = RunState::Running;
        self.clock.reset();
        self.scheduler.request_frame();
        self.scheduler
            .start_spawn_timer(self.config.obstacles.spawn_period());
        info!("run started, best score {}", self.score.best);

        self.render();
        Ok(())
    }

    /// Acknowledge a finished run and go back to `Idle`. The final score
    /// stays visible until the next run starts.
    pub fn reset(&mut self) -> Result<(), TransitionError> {
        if self.state != RunState::Ended {
            return Err(TransitionError::NotEnded(self.state));
        }
        self.state = RunState::Idle;
        self.reset_scene();
        self.render();
        Ok(())
    }

    /// Stop both schedules without touching the run. Idempotent.
    pub fn suspend(&mut self) -> Result<(), TransitionError> {
        if self.state != RunState::Running {
            return Err(TransitionError::NotRunning(self.state));
        }
        if !self.suspended {
            self.suspended = true;
            self.scheduler.cancel_frame();
            self.scheduler.cancel_spawn_timer();
            debug!("run suspended at score {}", self.score.current);
        }
        Ok(())
    }

    /// Restart both schedules after [`suspend`](Self::suspend). The clock is
    /// reset so the pause doesn't show up as one enormous frame.
    pub fn resume(&mut self) -> Result<(), TransitionError> {
        if self.state != RunState::Running {
            return Err(TransitionError::NotRunning(self.state));
        }
        if self.suspended {
            self.suspended = false;
            self.clock.reset();
            self.scheduler.request_frame();
            self.scheduler
                .start_spawn_timer(self.config.obstacles.spawn_period());
            debug!("run resumed");
        }
        Ok(())
    }

    // ── Environment callbacks ───────────────────────────────────────────────

    /// Advance the simulation by one display frame.
    pub fn on_frame_tick(&mut self, timestamp_ms: f64) -> Option<GameOver> {
        if !self.is_active() {
            trace!("frame at {timestamp_ms:.1}ms ignored in {:?}", self.state);
            return None;
        }

        let delta = self.clock.delta(timestamp_ms);
        trace!("frame at {timestamp_ms:.1}ms, delta {delta:.3}");

        self.flight.apply_gravity(delta);

        let world = &self.config.world;
        let points = self
            .obstacles
            .advance(delta, world.width, world.player_x);
        if points > 0 {
            self.score.current += points;
            debug!("score {}", self.score.current);
        }

        let position = self.flight.state().position;
        let hitbox = hitbox_rect(&self.config.hitbox, world.player_x, position);
        if let Some(id) = first_collision(
            &hitbox,
            self.obstacles.live_obstacles(),
            self.obstacles.width(),
            world.height,
        ) {
            debug!("hit obstacle {}", id.0);
            return Some(self.end_run());
        }
        if self.flight.is_out_of_bounds() {
            debug!("left the screen at y={position:.1}");
            return Some(self.end_run());
        }

        self.render();
        self.scheduler.request_frame();
        None
    }

    pub fn on_spawn_tick(&mut self) {
        if !self.is_active() {
            trace!("spawn tick ignored in {:?}", self.state);
            return;
        }
        let world = &self.config.world;
        self.obstacles
            .spawn(world.width, world.height, &mut self.rng);
    }

    /// A jump gesture. Starts a run from `Idle` and jumps in the same event;
    /// ignored after game over until an explicit reset or start.
    pub fn on_jump_signal(&mut self) {
        match self.state {
            RunState::Idle => match self.start() {
                Ok(()) => self.flight.jump(),
                Err(e) => debug!("jump could not start a run: {e}"),
            },
            RunState::Running if !self.suspended => self.flight.jump(),
            RunState::Running => debug!("jump ignored while suspended"),
            RunState::Ended => debug!("jump ignored after game over"),
        }
    }

    pub fn on_visibility_lost(&mut self) {
        if let Err(e) = self.suspend() {
            debug!("visibility lost: {e}");
        }
    }

    pub fn on_visibility_regained(&mut self) {
        if let Err(e) = self.resume() {
            debug!("visibility regained: {e}");
        }
    }

    // ── Internals ───────────────────────────────────────────────────────────

    fn is_active(&self) -> bool {
        self.state == RunState::Running && !self.suspended
    }

    fn reset_scene(&mut self) {
        self.flight.reset();
        self.obstacles.clear();
    }

    fn end_run(&mut self) -> GameOver {
        debug_assert_eq!(self.state, RunState::Running);
        self.state = RunState::Ended;
        self.scheduler.cancel_frame();
        self.scheduler.cancel_spawn_timer();

        let new_best = self.score.current > self.score.best;
        if new_best {
            self.score.best = self.score.current;
            self.store.save_best_score(self.score.best);
        }
        let summary = GameOver {
            score: self.score.current,
            best: self.score.best,
            new_best,
        };
        info!(
            "game over with score {} (best {}{})",
            summary.score,
            summary.best,
            if new_best { ", new best" } else { "" }
        );

        self.render();
        self.renderer.game_over(&summary);
        summary
    }

    fn render(&mut self) {
        let world = &self.config.world;
        let width = self.obstacles.width();

        self.renderer.begin_frame(self.state);
        for obstacle in self.obstacles.live_obstacles() {
            let (upper, lower) = obstacle.rects(width, world.height);
            self.renderer.draw_obstacle_pair(upper, lower);
        }
        let sprite = sprite_rect(
            &self.config.hitbox,
            world.player_x,
            self.flight.state().position,
        );
        self.renderer.place_sprite(sprite, self.flight.rotation());
        self.renderer.update_score(self.score.current);
        self.renderer.end_frame();
    }

    // ── Accessors ───────────────────────────────────────────────────────────

    pub fn run_state(&self) -> RunState {
        self.state
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    pub fn score(&self) -> u32 {
        self.score.current
    }

    pub fn best_score(&self) -> u32 {
        self.score.best
    }

    pub fn score_record(&self) -> ScoreRecord {
        self.score
    }

    pub fn flight_state(&self) -> FlightState {
        self.flight.state()
    }

    pub fn live_obstacles(&self) -> impl ExactSizeIterator<Item = &Obstacle> + '_ {
        self.obstacles.live_obstacles()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn store(&self) -> &P {
        &self.store
    }
}
