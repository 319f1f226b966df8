//! Axis-aligned rectangles in screen pixels.
//!
//! Coordinates follow the window-manager convention: origin top-left, `y`
//! grows downward.  `right()` and `bottom()` are exclusive (one past the
//! last covered pixel), so a body resting with `bottom() == screen_height`
//! has its last pixel row on `screen_height - 1`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A rectangle `(x, y, w, h)`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle at `origin` with the given `size`.
    pub fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self::new(origin.x, origin.y, size.x, size.y)
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.w / 2.0
    }

    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    /// True for rectangles that cannot take part in any geometric test:
    /// non-finite coordinates or a non-positive extent.
    pub fn is_degenerate(&self) -> bool {
        !(self.x.is_finite() && self.y.is_finite() && self.w.is_finite() && self.h.is_finite())
            || self.w <= 0.0
            || self.h <= 0.0
    }

    /// Strict overlap test.  Rectangles that merely share a border do not
    /// collide, and an empty rectangle never collides with anything.
    pub fn collides(&self, other: &Rect) -> bool {
        if self.w <= 0.0 || self.h <= 0.0 || other.w <= 0.0 || other.h <= 0.0 {
            return false;
        }
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// True when `other` lies entirely inside `self` (borders may coincide).
    pub fn contains(&self, other: &Rect) -> bool {
        self.x <= other.x
            && self.y <= other.y
            && self.right() >= other.right()
            && self.bottom() >= other.bottom()
            && self.right() > other.x
            && self.bottom() > other.y
    }

    /// Shrink inward by `by` on every edge.  The extent never goes negative.
    pub fn eroded(&self, by: f32) -> Rect {
        Rect::new(
            self.x + by,
            self.y + by,
            (self.w - 2.0 * by).max(0.0),
            (self.h - 2.0 * by).max(0.0),
        )
    }

    /// Drop the part of the rectangle that lies left of / above the screen
    /// origin so off-screen extent does not count in containment tests.
    pub fn clamped_to_origin(&self) -> Rect {
        let mut r = *self;
        if r.x < 0.0 {
            r.w = (r.w + r.x).max(0.0);
            r.x = 0.0;
        }
        if r.y < 0.0 {
            r.h = (r.h + r.y).max(0.0);
            r.y = 0.0;
        }
        r
    }

    /// The one-pixel-thick line along the top edge.
    pub fn top_edge(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, 1.0)
    }

    /// The one-pixel-thick line just below the last covered row.
    pub fn bottom_edge(&self) -> Rect {
        Rect::new(self.x, self.bottom(), self.w, 1.0)
    }

    /// Resize to `size`, keeping the bottom edge and the horizontal centre
    /// where they are.
    pub fn resized_anchored(&self, size: Vec2) -> Rect {
        Rect::new(
            self.center_x() - size.x / 2.0,
            self.bottom() - size.y,
            size.x,
            size.y,
        )
    }
}
