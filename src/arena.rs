//! Arena orchestrator
//!
//! Owns the simulation state, the judge and the three logical timers, and
//! turns timer expiries into simulation events one at a time:
//!
//! | phase           | event                  | effect                                   |
//! |-----------------|------------------------|------------------------------------------|
//! | Running         | Tick                   | move, wrap, resolve collisions           |
//! | Running         | EndOfGameElapsed       | Ended, end sign, every timer stopped     |
//! | CollisionPaused | CollisionPauseElapsed  | clear signs, Running, fresh countdowns   |
//!
//! Every other combination is ignored.

use crate::render::Frame;
use crate::settings::{Settings, SettingsError};
use crate::sim::{
    ArenaState, GameEvent, GamePhase, Judge, Sign, Throw, TimerEvent, Timers, end_collision_pause,
    end_game, tick,
};

/// A running (or paused, or finished) game
#[derive(Debug, Clone)]
pub struct Arena {
    state: ArenaState,
    judge: Judge,
    timers: Timers,
    /// Host lifecycle: timers only advance while active
    active: bool,
}

impl Arena {
    /// Validate settings and lay out the throws; call `start` to begin
    pub fn new(settings: &Settings) -> Result<Self, SettingsError> {
        let state = ArenaState::from_settings(settings);
        let arena = Self::from_state(state, settings)?;
        log::info!(
            "Arena {}x{} with {} throws (tick {} ms, timeout {} ms, pause {} ms)",
            settings.screen_width,
            settings.screen_height,
            arena.state.throws.len(),
            settings.tick_delay_ms,
            settings.timeout_ms,
            settings.collision_pause_ms
        );
        Ok(arena)
    }

    /// Wrap an existing state, taking only the timings from `settings`
    ///
    /// The settings are validated in full even though their throws are
    /// not used.
    pub fn from_state(state: ArenaState, settings: &Settings) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self {
            state,
            judge: Judge::new(),
            timers: Timers::new(
                settings.tick_delay_ms,
                settings.collision_pause_ms,
                settings.timeout_ms,
            ),
            active: false,
        })
    }

    /// Begin or resume; a no-op when already active or after the game ended
    pub fn start(&mut self) {
        if self.active {
            return;
        }
        if self.state.phase == GamePhase::Ended {
            log::debug!("Ignoring start: the game is over");
            return;
        }
        self.active = true;
        log::info!("Arena started ({:?})", self.state.phase);
    }

    /// Freeze every timer, keeping all progress; a no-op when not active
    pub fn pause(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        log::info!("Arena paused after {} ticks", self.state.time_ticks);
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Let `elapsed_ms` of logical time pass, firing due timers in order
    pub fn advance(&mut self, elapsed_ms: u32) {
        if !self.active {
            return;
        }

        let mut remaining = elapsed_ms;
        while let Some((due, event)) = self.timers.next_due() {
            if due > remaining {
                break;
            }
            self.timers.advance(due);
            remaining -= due;
            self.timers.fire(event);
            self.handle(event);
        }
        self.timers.advance(remaining);
    }

    /// Apply one timer event to the state machine
    pub fn handle(&mut self, event: TimerEvent) {
        match (self.state.phase, event) {
            (GamePhase::Running, TimerEvent::Tick) => {
                if tick(&mut self.state, &self.judge) > 0 {
                    self.timers.motion.stop();
                    self.timers.end_of_game.reset();
                    self.timers.collision_pause.restart();
                }
            }
            (GamePhase::CollisionPaused, TimerEvent::CollisionPauseElapsed) => {
                end_collision_pause(&mut self.state);
                self.timers.collision_pause.stop();
                self.timers.motion.restart();
                self.timers.end_of_game.restart();
                log::debug!("Collision pause over, {} throws left", self.state.throws.len());
            }
            (GamePhase::Running, TimerEvent::EndOfGameElapsed) => {
                end_game(&mut self.state);
                self.timers.stop_all();
                self.active = false;
            }
            (phase, event) => {
                log::trace!("Ignoring {event:?} while {phase:?}");
            }
        }
    }

    /// Process one motion tick directly, bypassing the motion timer
    pub fn tick(&mut self) {
        self.handle(TimerEvent::Tick);
    }

    pub fn state(&self) -> &ArenaState {
        &self.state
    }

    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn throws(&self) -> &[Throw] {
        &self.state.throws
    }

    pub fn signs(&self) -> &[Sign] {
        &self.state.signs
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    /// Snapshot for the renderer
    pub fn frame(&self) -> Frame {
        Frame::capture(&self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::ThrowSpec;
    use crate::sim::{SignKind, ThrowKind};
    use glam::IVec2;

    fn settings(throws: Vec<ThrowSpec>) -> Settings {
        Settings {
            tick_delay_ms: 10,
            timeout_ms: 1_000,
            collision_pause_ms: 200,
            throws,
            ..Settings::default()
        }
    }

    fn boxed(kind: ThrowKind, x: i32, y: i32, vx: i32) -> ThrowSpec {
        ThrowSpec::new(kind, x, y, vx, 0).with_size(IVec2::new(20, 20))
    }

    fn rock_and_scissors() -> Arena {
        Arena::new(&settings(vec![
            boxed(ThrowKind::Rock, 0, 100, 5),
            boxed(ThrowKind::Scissors, 35, 100, 0),
        ]))
        .expect("valid settings")
    }

    /// Two throws that never meet
    fn loners() -> Arena {
        Arena::new(&settings(vec![
            boxed(ThrowKind::Rock, 0, 100, 1),
            boxed(ThrowKind::Paper, 0, 400, 1),
        ]))
        .expect("valid settings")
    }

    #[test]
    fn test_new_rejects_invalid_settings() {
        let bad = Settings {
            tick_delay_ms: 0,
            ..Settings::default()
        };
        assert!(Arena::new(&bad).is_err());
    }

    #[test]
    fn test_from_state_rejects_zero_tick_delay() {
        let mut state = ArenaState::new(IVec2::new(800, 600));
        state.spawn(ThrowKind::Rock, IVec2::new(0, 100), IVec2::new(1, 0));
        let bad = Settings {
            tick_delay_ms: 0,
            ..Settings::default()
        };
        assert!(matches!(
            Arena::from_state(state.clone(), &bad),
            Err(SettingsError::NonPositive { name: "tick_delay_ms", .. })
        ));

        let mut arena = Arena::from_state(state, &settings(Vec::new())).expect("valid timings");
        arena.start();
        arena.advance(30);
        assert_eq!(arena.state().time_ticks, 3);
    }

    #[test]
    fn test_nothing_moves_before_start() {
        let mut arena = rock_and_scissors();
        arena.advance(1_000);
        assert_eq!(arena.throws()[0].pos, IVec2::new(0, 100));
        assert_eq!(arena.state().time_ticks, 0);
    }

    #[test]
    fn test_collision_scenario() {
        let mut arena = rock_and_scissors();
        arena.start();
        for _ in 0..3 {
            arena.tick();
        }
        assert_eq!(arena.throws().len(), 2);

        arena.tick();
        assert_eq!(arena.throws().len(), 1);
        assert_eq!(arena.throws()[0].kind, ThrowKind::Rock);
        assert_eq!(arena.throws()[0].size(), IVec2::new(25, 25));
        assert_eq!(arena.signs()[0].text, "Rock crushes Scissors");
        assert_eq!(arena.phase(), GamePhase::CollisionPaused);
        assert!(!arena.timers().motion.is_running());
        assert!(arena.timers().collision_pause.is_running());
        assert!(!arena.timers().end_of_game.is_running());
        assert_eq!(arena.timers().end_of_game.elapsed_ms(), 0);
    }

    #[test]
    fn test_collision_via_clock_then_resume() {
        let mut arena = rock_and_scissors();
        arena.start();
        // Four ticks at 10 ms each
        arena.advance(40);
        assert_eq!(arena.phase(), GamePhase::CollisionPaused);
        let rock_pos = arena.throws()[0].pos;

        // Motion is frozen during the pause
        arena.advance(199);
        assert_eq!(arena.throws()[0].pos, rock_pos);
        assert_eq!(arena.signs().len(), 1);

        arena.advance(1);
        assert_eq!(arena.phase(), GamePhase::Running);
        assert!(arena.signs().is_empty());
        assert_eq!(arena.timers().end_of_game.remaining_ms(), Some(1_000));
        assert_eq!(arena.timers().motion.remaining_ms(), Some(10));

        arena.advance(10);
        assert_eq!(arena.throws()[0].pos, rock_pos + IVec2::new(5, 0));
    }

    #[test]
    fn test_end_of_game_after_quiet_timeout() {
        let mut arena = loners();
        arena.start();
        arena.advance(999);
        assert_eq!(arena.phase(), GamePhase::Running);

        arena.advance(1);
        assert_eq!(arena.phase(), GamePhase::Ended);
        let end_signs = arena
            .signs()
            .iter()
            .filter(|s| s.kind == SignKind::EndOfGame)
            .count();
        assert_eq!(end_signs, 1);
        assert_eq!(
            arena.drain_events(),
            vec![GameEvent::GameOver { survivors: 2 }]
        );

        // Halted for good
        let positions: Vec<_> = arena.throws().iter().map(|t| t.pos).collect();
        arena.tick();
        arena.start();
        arena.advance(5_000);
        assert!(!arena.is_active());
        assert_eq!(arena.signs().len(), 1);
        let after: Vec<_> = arena.throws().iter().map(|t| t.pos).collect();
        assert_eq!(positions, after);
        assert!(arena.drain_events().is_empty());
    }

    #[test]
    fn test_collision_postpones_end_of_game() {
        let mut arena = Arena::new(&settings(vec![
            boxed(ThrowKind::Rock, 0, 100, 0),
            // Overlaps the rock on the 90th tick (900 ms)
            boxed(ThrowKind::Lizard, 109, 100, -1),
        ]))
        .expect("valid settings");
        arena.start();
        arena.advance(900);
        assert_eq!(arena.phase(), GamePhase::CollisionPaused);

        // Pause (200) plus a full fresh timeout (1000) must pass again
        arena.advance(200 + 999);
        assert_eq!(arena.phase(), GamePhase::Running);
        arena.advance(1);
        assert_eq!(arena.phase(), GamePhase::Ended);
    }

    #[test]
    fn test_pause_and_start_are_idempotent_and_keep_state() {
        let mut arena = loners();
        arena.start();
        arena.start();
        arena.advance(25);
        let ticks = arena.state().time_ticks;
        let pos = arena.throws()[0].pos;
        assert_eq!(ticks, 2);

        arena.pause();
        arena.pause();
        arena.advance(10_000);
        assert_eq!(arena.phase(), GamePhase::Running);
        assert_eq!(arena.throws()[0].pos, pos);

        arena.start();
        // 5 ms were already banked toward the next tick
        arena.advance(5);
        assert_eq!(arena.state().time_ticks, 3);
    }

    #[test]
    fn test_pause_freezes_collision_pause() {
        let mut arena = rock_and_scissors();
        arena.start();
        arena.advance(40);
        arena.advance(150);
        arena.pause();
        arena.advance(1_000);
        assert_eq!(arena.phase(), GamePhase::CollisionPaused);
        arena.start();
        arena.advance(50);
        assert_eq!(arena.phase(), GamePhase::Running);
    }

    #[test]
    fn test_empty_arena_ends_quietly() {
        let mut arena = Arena::new(&settings(Vec::new())).expect("valid settings");
        arena.start();
        arena.advance(1_000);
        assert_eq!(arena.phase(), GamePhase::Ended);
        assert_eq!(arena.signs().len(), 1);
    }

    #[test]
    fn test_frame_reflects_state() {
        let mut arena = rock_and_scissors();
        arena.start();
        arena.advance(40);
        let frame = arena.frame();
        assert_eq!(frame.throw_count(), 1);
        assert_eq!(frame.sign_texts(), vec!["Rock crushes Scissors"]);
    }
}
