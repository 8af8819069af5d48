//! Terminal front-end: half-block pixel rendering, a wall-clock scheduler
//! and (optionally) sound.

pub mod painter;
pub mod pixels;
pub mod scheduler;
#[cfg(feature = "sound")]
pub mod sound;

pub use painter::Painter;
pub use scheduler::TerminalScheduler;

#[cfg(feature = "sound")]
pub use sound::Sound;

/// Silent stand-in when built without the `sound` feature.
#[cfg(not(feature = "sound"))]
pub struct Sound;

#[cfg(not(feature = "sound"))]
impl Sound {
    pub fn open() -> Option<Self> {
        None
    }

    pub fn play_death(&self) {}
}
