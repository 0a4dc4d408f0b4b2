//! Logical timers driving the arena
//!
//! Three countdowns replace wall-clock timers: the repeating motion tick, the
//! one-shot collision pause and the one-shot end-of-game timeout. They only
//! move when the host advances them, so tests can step time exactly.

use serde::{Deserialize, Serialize};

/// What fired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerEvent {
    Tick,
    CollisionPauseElapsed,
    EndOfGameElapsed,
}

/// A countdown measured in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timer {
    period_ms: u32,
    elapsed_ms: u32,
    running: bool,
    repeats: bool,
}

impl Timer {
    /// # Panics
    /// If `period_ms` is zero.
    pub fn repeating(period_ms: u32) -> Self {
        assert!(period_ms > 0, "timer period must be positive");
        Self {
            period_ms,
            elapsed_ms: 0,
            running: false,
            repeats: true,
        }
    }

    pub fn one_shot(period_ms: u32) -> Self {
        Self {
            repeats: false,
            ..Self::repeating(period_ms)
        }
    }

    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn elapsed_ms(&self) -> u32 {
        self.elapsed_ms
    }

    /// Start counting; a running timer is left untouched
    pub fn start(&mut self) {
        self.running = true;
    }

    /// Stop counting, keeping progress
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Start over from a full period
    pub fn restart(&mut self) {
        self.elapsed_ms = 0;
        self.running = true;
    }

    /// Discard progress and stay stopped
    pub fn reset(&mut self) {
        self.elapsed_ms = 0;
        self.running = false;
    }

    /// Time left before firing, None when stopped
    pub fn remaining_ms(&self) -> Option<u32> {
        self.running
            .then(|| self.period_ms.saturating_sub(self.elapsed_ms))
    }

    fn advance(&mut self, dt_ms: u32) {
        if self.running {
            self.elapsed_ms = self.elapsed_ms.saturating_add(dt_ms).min(self.period_ms);
        }
    }

    fn fire(&mut self) {
        self.elapsed_ms = 0;
        if !self.repeats {
            self.running = false;
        }
    }
}

/// The arena's three timers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timers {
    pub motion: Timer,
    pub collision_pause: Timer,
    pub end_of_game: Timer,
}

impl Timers {
    /// Timers armed for a running arena: motion and end-of-game count,
    /// the collision pause waits
    pub fn new(tick_delay_ms: u32, collision_pause_ms: u32, timeout_ms: u32) -> Self {
        let mut timers = Self {
            motion: Timer::repeating(tick_delay_ms),
            collision_pause: Timer::one_shot(collision_pause_ms),
            end_of_game: Timer::one_shot(timeout_ms),
        };
        timers.motion.start();
        timers.end_of_game.start();
        timers
    }

    fn timer_mut(&mut self, event: TimerEvent) -> &mut Timer {
        match event {
            TimerEvent::Tick => &mut self.motion,
            TimerEvent::CollisionPauseElapsed => &mut self.collision_pause,
            TimerEvent::EndOfGameElapsed => &mut self.end_of_game,
        }
    }

    /// Soonest pending event and the time until it fires
    ///
    /// Simultaneous deadlines resolve in the order tick, collision pause,
    /// end of game.
    pub fn next_due(&self) -> Option<(u32, TimerEvent)> {
        [
            (self.motion.remaining_ms(), TimerEvent::Tick),
            (
                self.collision_pause.remaining_ms(),
                TimerEvent::CollisionPauseElapsed,
            ),
            (self.end_of_game.remaining_ms(), TimerEvent::EndOfGameElapsed),
        ]
        .into_iter()
        .filter_map(|(remaining, event)| remaining.map(|ms| (ms, event)))
        .min_by_key(|(ms, _)| *ms)
    }

    /// Move every running timer forward
    pub fn advance(&mut self, dt_ms: u32) {
        self.motion.advance(dt_ms);
        self.collision_pause.advance(dt_ms);
        self.end_of_game.advance(dt_ms);
    }

    /// Acknowledge a fired event (repeating timers rearm, one-shots stop)
    pub fn fire(&mut self, event: TimerEvent) {
        self.timer_mut(event).fire();
    }

    pub fn stop_all(&mut self) {
        self.motion.stop();
        self.collision_pause.stop();
        self.end_of_game.stop();
    }
}
