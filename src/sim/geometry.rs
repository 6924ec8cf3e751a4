//! Geometric primitives shared by obstacles and the navigability check
//!
//! Screen space: x grows to the right, y grows downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::EPSILON;

/// Axis-aligned rectangle anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Strictly between the left and right edges
    #[inline]
    pub fn spans_x(&self, x: f32) -> bool {
        x > self.left() && x < self.right()
    }

    /// Strictly between the top and bottom edges
    #[inline]
    pub fn spans_y(&self, y: f32) -> bool {
        y > self.top() && y < self.bottom()
    }

    /// Point strictly inside
    pub fn contains(&self, p: Vec2) -> bool {
        self.spans_x(p.x) && self.spans_y(p.y)
    }

    /// A ball centered at `p` with radius `r` is over the pad: its center is
    /// within the horizontal extent and its body overlaps the vertical band.
    pub fn touches_ball(&self, p: Vec2, r: f32) -> bool {
        self.spans_x(p.x) && p.y + r > self.top() && p.y - r < self.bottom()
    }

    /// Same rectangle shifted horizontally
    pub fn shifted_x(&self, dx: f32) -> Self {
        Self {
            pos: Vec2::new(self.pos.x + dx, self.pos.y),
            size: self.size,
        }
    }
}

/// Closest point to `p` on segment `a`-`b`
///
/// A zero-length segment is treated as the point `a`.
pub fn closest_point_on_segment(p: Vec2, a: Vec2, b: Vec2) -> Vec2 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq < EPSILON {
        return a;
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    a + ab * t
}

/// X coordinate where segment `a`-`b` crosses the horizontal line at `y`
///
/// Horizontal segments lying on `y` report their midpoint.
pub fn segment_x_at(a: Vec2, b: Vec2, y: f32) -> Option<f32> {
    let (top, bottom) = if a.y <= b.y { (a, b) } else { (b, a) };
    if y < top.y || y > bottom.y {
        return None;
    }
    let dy = bottom.y - top.y;
    if dy < EPSILON {
        return Some((a.x + b.x) * 0.5);
    }
    let t = (y - top.y) / dy;
    Some(top.x + (bottom.x - top.x) * t)
}

/// Horizontal half-chord of a disc at height `y`, if the line crosses it
pub fn disc_half_chord(center: Vec2, radius: f32, y: f32) -> Option<f32> {
    let dy = (y - center.y).abs();
    if dy >= radius {
        return None;
    }
    Some((radius * radius - dy * dy).sqrt())
}
