//! Seams between the simulation and its environment.
//!
//! The game never touches a terminal, a timer or a file directly. It calls
//! into these three traits, which keeps it deterministic and lets tests drive
//! it with plain recording fakes.

use std::time::Duration;

use crate::collision::Rect;
use crate::game::{GameOver, RunState};

/// Drawing capabilities the game needs. Called once per rendered frame in
/// the order `begin_frame`, obstacle pairs, sprite, score, `end_frame`.
pub trait Renderer {
    fn begin_frame(&mut self, _state: RunState) {}

    fn draw_obstacle_pair(&mut self, upper: Rect, lower: Rect);

    /// `rotation` is a presentation-only tilt in degrees.
    fn place_sprite(&mut self, sprite: Rect, rotation: f64);

    fn update_score(&mut self, score: u32);

    fn end_frame(&mut self) {}

    fn game_over(&mut self, summary: &GameOver);
}

/// Frame and spawn timer control.
///
/// Cancellation may race with callbacks that were already queued; the game
/// tolerates that by re-checking its own state on every callback.
pub trait Scheduler {
    /// Ask for one `on_frame_tick` at the next display refresh.
    fn request_frame(&mut self);

    fn cancel_frame(&mut self);

    /// Start calling `on_spawn_tick` every `period` until cancelled.
    fn start_spawn_timer(&mut self, period: Duration);

    fn cancel_spawn_timer(&mut self);
}

/// Key-value persistence for the best score.
///
/// Implementations must read back their last write, within a session and
/// across restarts. Failures are theirs to report; a store that can't read
/// returns 0.
pub trait ScoreStore {
    fn load_best_score(&self) -> u32;

    fn save_best_score(&mut self, score: u32);
}

impl<T: ScoreStore + ?Sized> ScoreStore for Box<T> {
    fn load_best_score(&self) -> u32 {
        (**self).load_best_score()
    }

    fn save_best_score(&mut self, score: u32) {
        (**self).save_best_score(score);
    }
}
