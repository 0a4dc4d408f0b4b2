//! Draw-command generation for an external renderer
//!
//! The arena never draws. Each frame the host captures a snapshot of what is
//! on screen and hands it to whatever backend it uses.

use glam::IVec2;
use serde::Serialize;

use crate::consts::*;
use crate::estimate_text_box;
use crate::sim::{Appearance, ArenaState, Rgb, SignKind, Throw};

/// Backing panel colour behind collision announcements
const SIGN_PANEL_COLOR: Rgb = Rgb(192, 192, 192);
const SIGN_TEXT_COLOR: Rgb = Rgb(0, 0, 0);

/// A single primitive
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawCommand {
    /// Bold text drawn from its baseline-left corner
    Text {
        text: String,
        font: &'static str,
        size: u32,
        color: Rgb,
        baseline: IVec2,
    },
    /// Filled ellipse inscribed in a rectangle
    Ellipse { min: IVec2, size: IVec2, color: Rgb },
    /// Filled rectangle
    Panel { min: IVec2, size: IVec2, color: Rgb },
}

/// Everything to draw for one frame, back to front
#[derive(Debug, Clone, Default, Serialize)]
pub struct Frame {
    pub screen: IVec2,
    pub throws: Vec<DrawCommand>,
    pub signs: Vec<DrawCommand>,
}

impl Frame {
    /// Snapshot the current state
    pub fn capture(state: &ArenaState) -> Self {
        let throws = state.throws.iter().map(throw_command).collect();

        let mut signs = Vec::with_capacity(state.signs.len() * 2);
        for sign in &state.signs {
            match sign.kind {
                SignKind::Collision => {
                    let text_box = estimate_text_box(&sign.text, COLLISION_SIGN_SIZE);
                    let baseline = centered_baseline(sign.center, text_box);
                    // Panel is half again as tall as the text so it covers the throws
                    signs.push(DrawCommand::Panel {
                        min: IVec2::new(baseline.x, baseline.y - text_box.y),
                        size: IVec2::new(text_box.x, text_box.y * 3 / 2),
                        color: SIGN_PANEL_COLOR,
                    });
                    signs.push(DrawCommand::Text {
                        text: sign.text.clone(),
                        font: COLLISION_SIGN_FONT,
                        size: COLLISION_SIGN_SIZE,
                        color: SIGN_TEXT_COLOR,
                        baseline,
                    });
                }
                SignKind::EndOfGame => {
                    let text_box = estimate_text_box(&sign.text, END_SIGN_SIZE);
                    signs.push(DrawCommand::Text {
                        text: sign.text.clone(),
                        font: END_SIGN_FONT,
                        size: END_SIGN_SIZE,
                        color: SIGN_TEXT_COLOR,
                        baseline: centered_baseline(sign.center, text_box),
                    });
                }
            }
        }

        Self {
            screen: state.screen,
            throws,
            signs,
        }
    }

    pub fn throw_count(&self) -> usize {
        self.throws.len()
    }

    /// Texts of every announcement, in draw order
    pub fn sign_texts(&self) -> Vec<&str> {
        self.signs
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Every command, throws first
    pub fn commands(&self) -> impl Iterator<Item = &DrawCommand> {
        self.throws.iter().chain(self.signs.iter())
    }
}

/// Baseline-left corner that centres a text box on `center`
fn centered_baseline(center: IVec2, text_box: IVec2) -> IVec2 {
    IVec2::new(center.x - text_box.x / 2, center.y + text_box.y / 2)
}

fn throw_command(throw: &Throw) -> DrawCommand {
    match throw.kind.appearance() {
        Appearance::Text {
            label, font, color, ..
        } => DrawCommand::Text {
            text: label.to_string(),
            font,
            size: throw.font_size().unwrap_or_default(),
            color,
            baseline: throw.pos,
        },
        Appearance::Ellipse { color, .. } => DrawCommand::Ellipse {
            min: throw.visual_bounds().min,
            size: throw.size(),
            color,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Sign, ThrowKind};

    fn state() -> ArenaState {
        let mut state = ArenaState::new(IVec2::new(800, 600));
        state.spawn(ThrowKind::Lizard, IVec2::new(10, 50), IVec2::ZERO);
        state.spawn(ThrowKind::Blackhole, IVec2::new(200, 300), IVec2::ZERO);
        state
    }

    #[test]
    fn test_throw_commands() {
        let frame = Frame::capture(&state());
        assert_eq!(frame.throw_count(), 2);
        assert_eq!(
            frame.throws[0],
            DrawCommand::Text {
                text: "Lizard".to_string(),
                font: "Magneto",
                size: 25,
                color: Rgb(50, 205, 50),
                baseline: IVec2::new(10, 50),
            }
        );
        assert_eq!(
            frame.throws[1],
            DrawCommand::Ellipse {
                min: IVec2::new(200, 220),
                size: IVec2::new(100, 80),
                color: Rgb(0, 0, 0),
            }
        );
    }

    #[test]
    fn test_grown_text_uses_new_font_size() {
        let mut state = state();
        state.throws[0].grow(GROWTH_FACTOR);
        let frame = Frame::capture(&state);
        assert!(matches!(frame.throws[0], DrawCommand::Text { size: 31, .. }));
    }

    #[test]
    fn test_sign_commands() {
        let mut state = state();
        state
            .signs
            .push(Sign::collision("Lizard eats Paper".to_string(), IVec2::new(100, 100)));
        state.signs.push(Sign::end_of_game(state.screen_center()));
        let frame = Frame::capture(&state);

        // Panel + text for the collision, text for the end sign
        assert_eq!(frame.signs.len(), 3);
        assert!(matches!(frame.signs[0], DrawCommand::Panel { .. }));
        assert_eq!(frame.sign_texts(), vec!["Lizard eats Paper", "END OF GAME"]);
        assert_eq!(frame.commands().count(), 5);
    }

    #[test]
    fn test_empty_frame() {
        let frame = Frame::capture(&ArenaState::new(IVec2::new(10, 10)));
        assert_eq!(frame.commands().count(), 0);
        assert!(frame.sign_texts().is_empty());
    }
}
