//! Overlap tests and screen-edge wrapping
//!
//! Throws are axis-aligned boxes on an integer plane, so collision is a
//! rectangle intersection and boundary handling is a teleport to the far edge.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::throw::Throw;

/// Axis-aligned rectangle (top-left corner plus size, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub min: IVec2,
    pub size: IVec2,
}

impl Rect {
    pub fn new(min: IVec2, size: IVec2) -> Self {
        Self { min, size }
    }

    #[inline]
    pub fn max(&self) -> IVec2 {
        self.min.saturating_add(self.size)
    }

    /// Open intersection: shared edges or empty rectangles never intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.size.cmple(IVec2::ZERO).any() || other.size.cmple(IVec2::ZERO).any() {
            return false;
        }
        let (a_max, b_max) = (self.max(), other.max());
        a_max.x > other.min.x
            && a_max.y > other.min.y
            && self.min.x < b_max.x
            && self.min.y < b_max.y
    }
}

/// Whether two throws' boxes overlap
#[inline]
pub fn throws_overlap(a: &Throw, b: &Throw) -> bool {
    a.bounds().intersects(&b.bounds())
}

/// Wrap a throw that has fully left the screen back in from the far side
///
/// Axes are handled independently. Returns true if the throw moved.
pub fn keep_in_bounds(throw: &mut Throw, screen: IVec2) -> bool {
    let before = throw.pos;

    if throw.right() < 0 {
        throw.reset_x(screen.x);
    } else if throw.left() > screen.x {
        throw.reset_x(0);
    }

    if throw.bottom() < 0 {
        throw.reset_y(screen.y);
    } else if throw.top() > screen.y {
        throw.reset_y(0);
    }

    throw.pos != before
}

/// Where the collision announcement for a pair is centred
///
/// Horizontally halfway between the first throw's left edge and the second
/// throw's right edge, vertically at the first throw's middle.
pub fn sign_anchor(first: &Throw, second: &Throw) -> IVec2 {
    IVec2::new(
        (first.left() + second.right()) / 2,
        (first.top() + first.bottom()) / 2,
    )
}
