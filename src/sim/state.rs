//! Arena state and core simulation types
//!
//! Everything the renderer reads and the tick mutates lives here.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::kind::ThrowKind;
use super::throw::Throw;
use crate::consts::END_OF_GAME_TEXT;
use crate::settings::Settings;

/// Current phase of the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Throws move every tick
    Running,
    /// Motion suspended while collision announcements are shown
    CollisionPaused,
    /// No collision happened in time; nothing moves again
    Ended,
}

/// Which announcement a sign carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignKind {
    Collision,
    EndOfGame,
}

/// A transient on-screen announcement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sign {
    pub kind: SignKind,
    pub text: String,
    /// Centre of the text's bounding box
    pub center: IVec2,
}

impl Sign {
    pub fn collision(text: String, center: IVec2) -> Self {
        Self {
            kind: SignKind::Collision,
            text,
            center,
        }
    }

    pub fn end_of_game(center: IVec2) -> Self {
        Self {
            kind: SignKind::EndOfGame,
            text: END_OF_GAME_TEXT.to_string(),
            center,
        }
    }
}

/// Things the host may want to react to, drained once per frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A non-tie collision removed `loser` and grew `winner`
    Collision {
        winner: u32,
        winner_kind: ThrowKind,
        loser: u32,
        loser_kind: ThrowKind,
        explanation: String,
    },
    /// The end-of-game countdown elapsed
    GameOver { survivors: usize },
}

/// Complete arena state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArenaState {
    /// Screen size the throws wrap around
    pub screen: IVec2,
    pub phase: GamePhase,
    /// Live throws in insertion order (scan order for collisions)
    pub throws: Vec<Throw>,
    /// Announcements currently on screen
    pub signs: Vec<Sign>,
    /// Pending host events
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Motion ticks processed
    pub time_ticks: u64,
    /// Next entity ID
    next_id: u32,
}

impl ArenaState {
    /// Empty arena of the given screen size
    pub fn new(screen: IVec2) -> Self {
        Self {
            screen,
            phase: GamePhase::Running,
            throws: Vec::new(),
            signs: Vec::new(),
            events: Vec::new(),
            time_ticks: 0,
            next_id: 1,
        }
    }

    /// Populate from already-validated settings, keeping their order
    pub fn from_settings(settings: &Settings) -> Self {
        let mut state = Self::new(IVec2::new(settings.screen_width, settings.screen_height));
        for spec in &settings.throws {
            let mut throw = Throw::new(
                0,
                spec.kind,
                IVec2::new(spec.x, spec.y),
                IVec2::new(spec.vx, spec.vy),
            );
            if let Some(size) = spec.size {
                throw = throw.with_size(size);
            }
            let id = state.push_throw(throw);
            log::debug!("Spawned {} #{} at ({}, {})", spec.kind, id, spec.x, spec.y);
        }
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Append a throw with its kind's default box
    pub fn spawn(&mut self, kind: ThrowKind, pos: IVec2, vel: IVec2) -> u32 {
        let id = self.next_entity_id();
        self.throws.push(Throw::new(id, kind, pos, vel));
        id
    }

    /// Append a prepared throw, assigning it a fresh ID
    pub fn push_throw(&mut self, mut throw: Throw) -> u32 {
        throw.id = self.next_entity_id();
        let id = throw.id;
        self.throws.push(throw);
        id
    }

    pub fn throw(&self, id: u32) -> Option<&Throw> {
        self.throws.iter().find(|t| t.id == id)
    }

    /// Centre of the screen, where the end sign goes
    pub fn screen_center(&self) -> IVec2 {
        self.screen / 2
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
