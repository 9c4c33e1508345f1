//! Axis-aligned rectangles
//!
//! Walls, tile footprints and entity bodies are all `Rect`s.

use crate::Vec2;

/// Axis-aligned rectangle anchored at its top-left corner
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Create from top-left corner and size
    #[inline]
    pub fn from_min_size(min: Vec2, size: Vec2) -> Self {
        Self::new(min.x, min.y, size.x, size.y)
    }

    /// Create a rectangle of `size` centered on `center`
    #[inline]
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self::new(center.x - size.x * 0.5, center.y - size.y * 0.5, size.x, size.y)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        Vec2::new(self.right(), self.bottom())
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Grow by `amount` on every side (negative shrinks)
    #[inline]
    pub fn expand(&self, amount: f32) -> Self {
        Self::new(
            self.x - amount,
            self.y - amount,
            self.width + amount * 2.0,
            self.height + amount * 2.0,
        )
    }

    /// Move so that the center lands on `center`
    #[inline]
    pub fn with_center(&self, center: Vec2) -> Self {
        Self::from_center(center, self.size())
    }

    /// Half-open containment: left/top edges inside, right/bottom outside
    #[inline]
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// Strict overlap test. Rectangles that only share an edge do not collide.
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Smallest rectangle enclosing both
    pub fn union(&self, other: &Rect) -> Self {
        let min_x = self.x.min(other.x);
        let min_y = self.y.min(other.y);
        let max_x = self.right().max(other.right());
        let max_y = self.bottom().max(other.bottom());
        Self::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    /// Corners in clockwise screen order starting at top-left
    pub fn corners(&self) -> [Vec2; 4] {
        [
            Vec2::new(self.x, self.y),
            Vec2::new(self.right(), self.y),
            Vec2::new(self.right(), self.bottom()),
            Vec2::new(self.x, self.bottom()),
        ]
    }

    /// The four edges as segments, following [`Rect::corners`]
    pub fn edges(&self) -> [(Vec2, Vec2); 4] {
        let [a, b, c, d] = self.corners();
        [(a, b), (b, c), (c, d), (d, a)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
        assert!(a.intersects(&Rect::new(9.5, 9.5, 1.0, 1.0)));
    }

    #[test]
    fn test_expand() {
        let r = Rect::new(10.0, 10.0, 5.0, 5.0).expand(2.0);
        assert_eq!(r, Rect::new(8.0, 8.0, 9.0, 9.0));
        assert_eq!(r.center(), Vec2::new(12.5, 12.5));
    }

    #[test]
    fn test_contains_point_half_open() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains_point(Vec2::new(0.0, 0.0)));
        assert!(r.contains_point(Vec2::new(9.99, 5.0)));
        assert!(!r.contains_point(Vec2::new(10.0, 5.0)));
    }

    #[test]
    fn test_corners_and_edges() {
        let r = Rect::new(1.0, 2.0, 3.0, 4.0);
        let corners = r.corners();
        assert_eq!(corners[2], Vec2::new(4.0, 6.0));
        let edges = r.edges();
        assert_eq!(edges[3], (Vec2::new(1.0, 6.0), Vec2::new(1.0, 2.0)));
    }

    #[test]
    fn test_union() {
        let a = Rect::new(0.0, 0.0, 1.0, 1.0);
        let b = Rect::new(5.0, -2.0, 1.0, 1.0);
        assert_eq!(a.union(&b), Rect::new(0.0, -2.0, 6.0, 3.0));
    }
}
