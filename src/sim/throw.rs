//! Movable, growable game pieces
//!
//! Positions are anchored at the bottom-left corner of the bounding box,
//! matching how text is laid out on its baseline:
//! - left = x, right = x + width
//! - bottom = y, top = y - height
//!
//! The collision rectangle is the exception: it hangs from the anchor,
//! spanning y to y + height. Edges, wrapping and drawing use the box above.
//!
//! Arithmetic saturates, so extreme positions pin at the integer limits
//! instead of overflowing.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::kind::ThrowKind;
use crate::scale_dimension;

/// A throw entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Throw {
    pub id: u32,
    pub kind: ThrowKind,
    /// Bottom-left anchor
    pub pos: IVec2,
    /// Per-tick displacement
    pub vel: IVec2,
    /// Bounding box (width, height), never negative
    size: IVec2,
    /// Current font size for text kinds
    font_size: Option<u32>,
}

impl Throw {
    /// Create a throw with its kind's default box
    pub fn new(id: u32, kind: ThrowKind, pos: IVec2, vel: IVec2) -> Self {
        let appearance = kind.appearance();
        Self {
            id,
            kind,
            pos,
            vel,
            size: appearance.default_box(),
            font_size: appearance.font_size(),
        }
    }

    /// Override the bounding box (negative components clamp to zero)
    pub fn with_size(mut self, size: IVec2) -> Self {
        self.size = size.max(IVec2::ZERO);
        self
    }

    pub fn size(&self) -> IVec2 {
        self.size
    }

    pub fn font_size(&self) -> Option<u32> {
        self.font_size
    }

    /// Move by one tick's velocity
    #[inline]
    pub fn translate(&mut self) {
        self.pos = self.pos.saturating_add(self.vel);
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.pos.x.saturating_add(self.size.x)
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.pos.y.saturating_sub(self.size.y)
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.pos.y
    }

    /// Reposition horizontally after leaving the screen
    ///
    /// Zero means the left border: the throw ends up just outside it, right
    /// edge on the border. Anything else is taken as the right border and
    /// the left edge is placed on it.
    pub fn reset_x(&mut self, new_x: i32) {
        if new_x == 0 {
            self.pos.x = -self.size.x;
        } else {
            self.pos.x = new_x;
        }
    }

    /// Reposition vertically after leaving the screen
    ///
    /// Zero means the top border: the bottom edge is placed on it. Anything
    /// else is taken as the bottom border and the top edge is placed on it.
    /// The height offset lands on the opposite branch from `reset_x`.
    pub fn reset_y(&mut self, new_y: i32) {
        if new_y == 0 {
            self.pos.y = new_y;
        } else {
            self.pos.y = new_y.saturating_add(self.size.y);
        }
    }

    /// Collision rectangle: the anchor plus the box, extending downward
    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    /// Drawn rectangle: the box extending upward from the anchor
    pub fn visual_bounds(&self) -> Rect {
        Rect::new(IVec2::new(self.left(), self.top()), self.size)
    }

    /// Enlarge after winning a collision
    ///
    /// Text kinds also scale their font so the drawn label keeps matching
    /// the box.
    pub fn grow(&mut self, factor: f32) {
        self.size = IVec2::new(
            scale_dimension(self.size.x, factor),
            scale_dimension(self.size.y, factor),
        );
        if let Some(font_size) = self.font_size {
            self.font_size = Some((font_size as f32 * factor) as u32);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rock_at(x: i32, y: i32) -> Throw {
        Throw::new(1, ThrowKind::Rock, IVec2::new(x, y), IVec2::new(3, -2))
            .with_size(IVec2::new(20, 10))
    }

    #[test]
    fn test_edges_from_bottom_left_anchor() {
        let throw = rock_at(5, 50);
        assert_eq!(throw.left(), 5);
        assert_eq!(throw.right(), 25);
        assert_eq!(throw.bottom(), 50);
        assert_eq!(throw.top(), 40);
        assert_eq!(throw.visual_bounds(), Rect::new(IVec2::new(5, 40), IVec2::new(20, 10)));
    }

    #[test]
    fn test_collision_bounds_hang_from_anchor() {
        let throw = rock_at(5, 50);
        assert_eq!(throw.bounds(), Rect::new(IVec2::new(5, 50), IVec2::new(20, 10)));
        assert_eq!(throw.bounds().max(), IVec2::new(25, 60));
    }

    #[test]
    fn test_extreme_positions_saturate() {
        let pos = IVec2::new(i32::MAX - 10, i32::MIN + 5);
        let mut throw = Throw::new(1, ThrowKind::Rock, pos, IVec2::new(50, -50))
            .with_size(IVec2::new(20, 10));
        assert_eq!(throw.right(), i32::MAX);
        assert_eq!(throw.top(), i32::MIN);
        throw.translate();
        assert_eq!(throw.pos, IVec2::new(i32::MAX, i32::MIN));
    }

    #[test]
    fn test_translate() {
        let mut throw = rock_at(0, 0);
        throw.translate();
        throw.translate();
        assert_eq!(throw.pos, IVec2::new(6, -4));
    }

    #[test]
    fn test_reset_x() {
        let mut throw = rock_at(-30, 50);
        throw.reset_x(800);
        assert_eq!(throw.left(), 800);
        throw.reset_x(0);
        assert_eq!(throw.pos.x, -20);
        assert_eq!(throw.right(), 0);
    }

    #[test]
    fn test_reset_y_is_offset_on_the_far_branch() {
        let mut throw = rock_at(0, -5);
        throw.reset_y(600);
        assert_eq!(throw.pos.y, 610);
        assert_eq!(throw.top(), 600);
        throw.reset_y(0);
        assert_eq!(throw.pos.y, 0);
        assert_eq!(throw.bottom(), 0);
    }

    #[test]
    fn test_grow_box_and_font() {
        let mut throw = rock_at(0, 0);
        assert_eq!(throw.font_size(), Some(20));
        throw.grow(1.25);
        assert_eq!(throw.size(), IVec2::new(25, 12));
        assert_eq!(throw.font_size(), Some(25));
        throw.grow(1.25);
        assert_eq!(throw.size(), IVec2::new(31, 15));
        assert_eq!(throw.font_size(), Some(31));
    }

    #[test]
    fn test_blackhole_default_box() {
        let mut hole = Throw::new(2, ThrowKind::Blackhole, IVec2::ZERO, IVec2::ZERO);
        assert_eq!(hole.size(), IVec2::new(100, 80));
        assert_eq!(hole.font_size(), None);
        hole.grow(1.25);
        assert_eq!(hole.size(), IVec2::new(125, 100));
        assert_eq!(hole.font_size(), None);
    }

    #[test]
    fn test_negative_size_clamps() {
        let throw = rock_at(0, 0).with_size(IVec2::new(-4, 7));
        assert_eq!(throw.size(), IVec2::new(0, 7));
    }
}
