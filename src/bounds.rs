/*
 * Bounds Module
 *
 * Axis-aligned rectangles used for the simulation area, spatial index
 * entries and neighbor queries. Edges are inclusive: a zero-size rectangle
 * (a point) overlaps any rectangle it touches.
 */

use nannou::prelude::{vec2, Vec2};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    /// Build from any two opposite corners, in any order.
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn from_xy(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self::from_corners(vec2(x1, y1), vec2(x2, y2))
    }

    /// Zero-size bounds at a point.
    pub fn from_point(point: Vec2) -> Self {
        Self { min: point, max: point }
    }

    /// Square of half-size `half_extent` centered on `center`.
    pub fn around(center: Vec2, half_extent: f32) -> Self {
        let extent = Vec2::splat(half_extent.abs());
        Self {
            min: center - extent,
            max: center + extent,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// True for zero-area or non-finite rectangles.
    pub fn is_degenerate(&self) -> bool {
        let w = self.width();
        let h = self.height();
        !(w.is_finite() && h.is_finite()) || w <= 0.0 || h <= 0.0
    }

    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    #[inline]
    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }

    /// Grow (or shrink, for negative `margin`) on every side.
    pub fn expand(&self, margin: f32) -> Self {
        let m = Vec2::splat(margin);
        Self {
            min: self.min - m,
            max: self.max + m,
        }
    }

    /// The four equal quadrants, ordered low-x/low-y, high-x/low-y,
    /// low-x/high-y, high-x/high-y.
    pub fn quadrants(&self) -> [Bounds; 4] {
        let mid = self.center();
        [
            Bounds { min: self.min, max: mid },
            Bounds {
                min: vec2(mid.x, self.min.y),
                max: vec2(self.max.x, mid.y),
            },
            Bounds {
                min: vec2(self.min.x, mid.y),
                max: vec2(mid.x, self.max.y),
            },
            Bounds { min: mid, max: self.max },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_are_normalised() {
        let b = Bounds::from_xy(10.0, 0.0, 0.0, 20.0);
        assert_eq!(b.min, vec2(0.0, 0.0));
        assert_eq!(b.max, vec2(10.0, 20.0));
        assert_eq!(b.width(), 10.0);
        assert_eq!(b.height(), 20.0);
    }

    #[test]
    fn degenerate_detection() {
        assert!(Bounds::from_xy(0.0, 0.0, 0.0, 10.0).is_degenerate());
        assert!(Bounds::from_xy(0.0, 0.0, f32::INFINITY, 10.0).is_degenerate());
        assert!(!Bounds::from_xy(0.0, 0.0, 1.0, 1.0).is_degenerate());
    }

    #[test]
    fn point_overlaps_touching_rect() {
        let rect = Bounds::from_xy(0.0, 0.0, 10.0, 10.0);
        assert!(Bounds::from_point(vec2(10.0, 5.0)).overlaps(&rect));
        assert!(!Bounds::from_point(vec2(10.1, 5.0)).overlaps(&rect));
    }

    #[test]
    fn quadrants_tile_the_parent() {
        let rect = Bounds::from_xy(0.0, 0.0, 8.0, 4.0);
        let q = rect.quadrants();
        assert_eq!(q[0], Bounds::from_xy(0.0, 0.0, 4.0, 2.0));
        assert_eq!(q[1], Bounds::from_xy(4.0, 0.0, 8.0, 2.0));
        assert_eq!(q[2], Bounds::from_xy(0.0, 2.0, 4.0, 4.0));
        assert_eq!(q[3], Bounds::from_xy(4.0, 2.0, 8.0, 4.0));
    }
}
