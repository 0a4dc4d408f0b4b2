//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Integer positions and fixed-delay ticks only
//! - Time comes from logical timers, never the wall clock
//! - Stable iteration order (insertion order of throws)
//! - No rendering or platform dependencies

pub mod collision;
pub mod judge;
pub mod kind;
pub mod rules;
pub mod state;
pub mod throw;
pub mod tick;
pub mod timers;

pub use collision::{Rect, keep_in_bounds, throws_overlap};
pub use judge::{Judge, Outcome};
pub use kind::{ALL_KINDS, Appearance, Rgb, ThrowKind, all_explanations, explanation};
pub use rules::RuleTable;
pub use state::{ArenaState, GameEvent, GamePhase, Sign, SignKind};
pub use throw::Throw;
pub use tick::{end_collision_pause, end_game, tick};
pub use timers::{Timer, TimerEvent, Timers};
