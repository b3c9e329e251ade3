//! Integer pixel geometry.
//!
//! Rectangles follow the usual image convention: `(x, y)` is the top-left
//! corner, `x + width` and `y + height` are exclusive. The origin may be
//! negative and the extent may leave the image; use [`PixelRect::clamp_to`]
//! before touching pixel data.

use serde::{Deserialize, Serialize};

/// A pixel position (`x` = column, `y` = row).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in pixel coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl PixelRect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle spanned by two opposite corners, in any order.
    pub fn from_corners(a: PixelPoint, b: PixelPoint) -> Self {
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        Self {
            x,
            y,
            width: a.x.max(b.x) - x,
            height: a.y.max(b.y) - y,
        }
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    #[inline]
    pub fn origin(&self) -> PixelPoint {
        PixelPoint::new(self.x, self.y)
    }

    /// Exclusive bottom-right corner.
    #[inline]
    pub fn far_corner(&self) -> PixelPoint {
        PixelPoint::new(self.right(), self.bottom())
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub fn area(&self) -> i64 {
        if self.is_empty() {
            0
        } else {
            self.width as i64 * self.height as i64
        }
    }

    pub fn contains(&self, p: PixelPoint) -> bool {
        p.x >= self.x && p.y >= self.y && p.x < self.right() && p.y < self.bottom()
    }

    /// Whether the rectangle lies entirely inside a `width × height` image.
    pub fn fits_within(&self, width: usize, height: usize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.right() as i64 <= width as i64
            && self.bottom() as i64 <= height as i64
    }

    /// Intersection with another rectangle; `None` when they do not overlap.
    pub fn intersect(&self, other: &PixelRect) -> Option<PixelRect> {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(PixelRect::new(x0, y0, x1 - x0, y1 - y0))
    }

    /// Clip the rectangle to a `width × height` image.
    pub fn clamp_to(&self, width: usize, height: usize) -> Option<PixelRect> {
        let bounds = PixelRect::new(
            0,
            0,
            i32::try_from(width).unwrap_or(i32::MAX),
            i32::try_from(height).unwrap_or(i32::MAX),
        );
        self.intersect(&bounds)
    }

    /// Grow the rectangle by `margin` on each side.
    ///
    /// Note that the result is `2 * margin` wider than `self`, so padding a
    /// tight inclusive box this way keeps the far edge at `max + margin`.
    /// Coordinates saturate at the `i32` range.
    pub fn padded(&self, margin: i32) -> PixelRect {
        let grow = margin.saturating_mul(2);
        PixelRect::new(
            self.x.saturating_sub(margin),
            self.y.saturating_sub(margin),
            self.width.saturating_add(grow),
            self.height.saturating_add(grow),
        )
    }

    /// Translate into a coordinate system whose origin is `origin`.
    pub fn relative_to(&self, origin: PixelPoint) -> PixelRect {
        PixelRect::new(self.x - origin.x, self.y - origin.y, self.width, self.height)
    }
}
