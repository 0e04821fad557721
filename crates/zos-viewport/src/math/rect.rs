//! Layout rectangles
//!
//! [`ClientRect`] is what an element reports about itself: viewport-relative
//! and sub-pixel. [`LayoutRect`] is what the binding hands back to callers:
//! page-relative and rounded to whole pixels.

use serde::{Deserialize, Serialize};

/// Round to the nearest integer, half-way cases toward positive infinity.
///
/// `f64::round` rounds half-way cases away from zero, which disagrees with
/// the browser for negative coordinates (`-2.5` must become `-2`).
#[inline]
pub fn round_half_up(value: f64) -> i32 {
    // `value + 0.5` can itself round up for values just below a half.
    let floor = value.floor();
    let rounded = if value - floor >= 0.5 { floor + 1.0 } else { floor };
    rounded as i32
}

/// Element rectangle as reported by the host, relative to the viewport
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ClientRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ClientRect {
    /// Create a client rect from left, top, width and height
    #[inline]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// Page-relative element rectangle in whole pixels
///
/// Built fresh for every query and never mutated afterwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayoutRect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl LayoutRect {
    /// Create a layout rect from left, top, width and height
    #[inline]
    pub const fn ltwh(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Offset a client rect by a scroll position and round every component
    /// independently.
    pub fn from_client(rect: ClientRect, scroll_left: f64, scroll_top: f64) -> Self {
        Self::ltwh(
            round_half_up(rect.left + scroll_left),
            round_half_up(rect.top + scroll_top),
            round_half_up(rect.width),
            round_half_up(rect.height),
        )
    }

    #[inline]
    pub const fn right(&self) -> i32 {
        self.left + self.width
    }

    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.top + self.height
    }

    /// True when the rect covers no area
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Check if a point lies inside the rect (right/bottom edges exclusive)
    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.left && x < self.right() && y >= self.top && y < self.bottom()
    }

    /// Check if two rects overlap, touching edges included
    pub fn intersects(&self, other: &LayoutRect) -> bool {
        self.top <= other.bottom()
            && other.top <= self.bottom()
            && self.left <= other.right()
            && other.left <= self.right()
    }

    /// Same rect shifted by the given offsets
    #[inline]
    pub const fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self::ltwh(self.left + dx, self.top + dy, self.width, self.height)
    }
}
