//! Throw Arena - extended rock-paper-scissors played out by moving pieces
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinds, rules, judge, motion, collisions)
//! - `arena`: Orchestrator driving the simulation from a logical clock
//! - `render`: Read-only frame snapshots for an external renderer
//! - `settings`: Configuration record, loaders and validation

pub mod arena;
pub mod render;
pub mod settings;
pub mod sim;

pub use arena::Arena;
pub use render::{DrawCommand, Frame};
pub use settings::{Settings, SettingsError, ThrowSpec};

/// Game configuration constants
pub mod consts {
    /// Winner box/font multiplier after a resolving collision
    pub const GROWTH_FACTOR: f32 = 1.25;

    /// Default timings (milliseconds)
    pub const DEFAULT_TICK_DELAY_MS: u32 = 30;
    pub const DEFAULT_TIMEOUT_MS: u32 = 10_000;
    pub const DEFAULT_COLLISION_PAUSE_MS: u32 = 1_500;

    /// Default screen dimensions
    pub const DEFAULT_SCREEN_WIDTH: i32 = 800;
    pub const DEFAULT_SCREEN_HEIGHT: i32 = 600;

    /// Largest accepted magnitude for screen sizes, positions, speeds and boxes
    pub const MAX_COORDINATE: i32 = 1_000_000;

    /// Blackhole ellipse axes
    pub const BLACKHOLE_WIDTH: i32 = 100;
    pub const BLACKHOLE_HEIGHT: i32 = 80;

    /// Announcement texts and fonts
    pub const BLACKHOLE_EXPLANATION: &str = "Blackhole destroys everything";
    pub const END_OF_GAME_TEXT: &str = "END OF GAME";
    pub const COLLISION_SIGN_FONT: &str = "Georgia";
    pub const COLLISION_SIGN_SIZE: u32 = 20;
    pub const END_SIGN_FONT: &str = "Arial";
    pub const END_SIGN_SIZE: u32 = 50;
}

/// Scale an integer dimension, truncating toward zero and never going negative
#[inline]
pub fn scale_dimension(value: i32, factor: f32) -> i32 {
    ((value as f32) * factor).max(0.0) as i32
}

/// Rough bounding box of a bold text label (0.6 em per glyph, 1.25 em tall)
#[inline]
pub fn estimate_text_box(text: &str, font_size: u32) -> glam::IVec2 {
    let glyphs = text.chars().count() as i32;
    let size = font_size as i32;
    glam::IVec2::new(glyphs * size * 3 / 5, size * 5 / 4)
}
