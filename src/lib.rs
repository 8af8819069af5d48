//! Skyhop: the simulation core of a flappy-bird style arcade game.
//!
//! The core knows nothing about terminals, timers or files. A [`Game`] is
//! driven through its callbacks (`on_frame_tick`, `on_spawn_tick`,
//! `on_jump_signal`, `on_visibility_lost`/`on_visibility_regained`) and talks
//! back through the [`Renderer`], [`Scheduler`] and [`ScoreStore`] ports.

pub mod clock;
pub mod collision;
pub mod config;
pub mod error;
pub mod flight;
pub mod game;
pub mod obstacle;
pub mod ports;
pub mod store;

pub use collision::Rect;
pub use config::GameConfig;
pub use error::{ConfigError, StoreError, TransitionError};
pub use flight::FlightState;
pub use game::{Game, GameOver, RunState, ScoreRecord};
pub use obstacle::{Obstacle, ObstacleId};
pub use ports::{Renderer, Scheduler, ScoreStore};
pub use store::{FileScoreStore, MemoryScoreStore};
