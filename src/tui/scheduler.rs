use std::time::{Duration, Instant};

use skyhop::Scheduler;

/// Wall-clock [`Scheduler`] polled by the terminal loop.
///
/// A requested frame is delivered on the next loop iteration. The spawn timer
/// keeps a deadline and catches up one period at a time, so a slow frame
/// doesn't drop spawns.
#[derive(Debug, Default)]
pub struct TerminalScheduler {
    frame_requested: bool,
    spawn_period: Option<Duration>,
    next_spawn: Option<Instant>,
}

impl TerminalScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume a pending frame request.
    pub fn take_frame(&mut self) -> bool {
        std::mem::take(&mut self.frame_requested)
    }

    /// Whether a spawn tick is due at `now`. Each `true` moves the deadline
    /// one period ahead, so call this in a loop.
    pub fn spawn_due(&mut self, now: Instant) -> bool {
        match (self.spawn_period, self.next_spawn) {
            (Some(period), Some(deadline)) if deadline <= now => {
                self.next_spawn = Some(deadline + period);
                true
            }
            _ => false,
        }
    }
}

impl Scheduler for TerminalScheduler {
    fn request_frame(&mut self) {
        self.frame_requested = true;
    }

    fn cancel_frame(&mut self) {
        self.frame_requested = false;
    }

    fn start_spawn_timer(&mut self, period: Duration) {
        self.spawn_period = Some(period);
        self.next_spawn = Some(Instant::now() + period);
    }

    fn cancel_spawn_timer(&mut self) {
        self.spawn_period = None;
        self.next_spawn = None;
    }
}
