//! Visibility polygon for fog-of-war masks
//!
//! The polygon is a fan of triangles around the observer. It is meant for
//! renderers; the agent's own perception uses [`crate::visibility`].

use serde::{Deserialize, Serialize};
use stalker_math::{bearing, segment_enters_rect, wrap_degrees, Rect, Vec2};

use crate::visibility::line_of_sight;

/// Orthogonal offset for the silhouette test
const SILHOUETTE_OFFSET: f32 = 1e-2;

/// Angular offset for points found behind a silhouette corner
const SILHOUETTE_SKEW: f32 = 1e-3;

/// One triangle of the visibility fan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub a: Vec2,
    pub b: Vec2,
    pub c: Vec2,
}

impl Triangle {
    pub fn new(a: Vec2, b: Vec2, c: Vec2) -> Self {
        Self { a, b, c }
    }

    /// Unsigned area
    pub fn area(&self) -> f32 {
        ((self.b - self.a).perp_dot(self.c - self.a) * 0.5).abs()
    }
}

/// Marches rays through the wall set
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RayCaster {
    /// March step length
    pub step: f32,
    /// Rays stop after this distance
    pub max_distance: f32,
    /// Rays stop when they leave this rectangle
    pub bounds: Rect,
}

impl RayCaster {
    /// Caster limited to `bounds`, reaching across its diagonal
    pub fn new(bounds: Rect) -> Self {
        Self {
            step: 2.0,
            max_distance: bounds.size().length(),
            bounds,
        }
    }

    pub fn with_step(mut self, step: f32) -> Self {
        self.step = step;
        self
    }

    pub fn with_max_distance(mut self, max_distance: f32) -> Self {
        self.max_distance = max_distance;
        self
    }

    /// Last free point along `direction` before a wall, the bounds or the range limit
    pub fn march(&self, origin: Vec2, direction: Vec2, walls: &[Rect]) -> Vec2 {
        let direction = direction.normalize();
        if direction == Vec2::ZERO || self.step <= 0.0 {
            return origin;
        }

        let mut last = origin;
        let mut travelled = self.step;
        while travelled <= self.max_distance {
            let point = origin + direction * travelled;
            if !self.bounds.contains_point(point) || is_solid(walls, point) {
                break;
            }
            last = point;
            travelled += self.step;
        }
        last
    }

    /// End points of the right (`heading - fov/2`) and left (`heading + fov/2`) boundary rays
    pub fn boundary_rays(&self, observer: Vec2, heading: f32, fov: f32, walls: &[Rect]) -> (Vec2, Vec2) {
        let half = fov * 0.5;
        let right = self.march(observer, Vec2::from_angle(heading - half), walls);
        let left = self.march(observer, Vec2::from_angle(heading + half), walls);
        (right, left)
    }

    /// Build the visibility fan for an observer looking along `heading`.
    ///
    /// Points are keyed by their angle measured from the right boundary ray.
    /// Visible `corners` inside the window are added, and silhouette corners
    /// also add the point where the grazing ray lands behind them.
    pub fn cast_rays(
        &self,
        observer: Vec2,
        heading: f32,
        fov: f32,
        walls: &[Rect],
        corners: &[Vec2],
    ) -> Vec<Triangle> {
        let right_angle = heading - fov * 0.5;
        let (right, left) = self.boundary_rays(observer, heading, fov, walls);

        let mut points: Vec<(f32, Vec2)> = vec![(0.0, right), (fov, left)];
        for &corner in corners {
            let relative = wrap_degrees(bearing(observer, corner) - right_angle);
            if relative <= 0.0 || relative >= fov {
                continue;
            }
            let distance = observer.distance(corner);
            if distance <= 0.0 || distance > self.max_distance {
                continue;
            }
            if !unobstructed(walls, observer, corner) {
                continue;
            }
            points.push((relative, corner));

            let direction = (corner - observer) / distance;
            let side = direction.perpendicular() * SILHOUETTE_OFFSET;
            let plus = is_solid(walls, corner + side);
            let minus = is_solid(walls, corner - side);
            let beyond = is_solid(walls, corner + direction * SILHOUETTE_OFFSET);
            if !beyond && plus != minus {
                let far = self.march(corner, direction, walls);
                let skewed = if plus {
                    relative - SILHOUETTE_SKEW
                } else {
                    relative + SILHOUETTE_SKEW
                };
                points.push((skewed, far));
            }
        }

        points.sort_by(|a, b| a.0.total_cmp(&b.0));
        points
            .windows(2)
            .map(|pair| Triangle::new(observer, pair[0].1, pair[1].1))
            .collect()
    }
}

/// Edge crossings plus interior passes, so a corner hidden straight behind
/// a nearer corner of the same wall is rejected
fn unobstructed(walls: &[Rect], observer: Vec2, corner: Vec2) -> bool {
    line_of_sight(walls, observer, corner) && !walls.iter().any(|w| segment_enters_rect(observer, corner, w))
}

fn is_solid(walls: &[Rect], point: Vec2) -> bool {
    walls.iter().any(|w| w.contains_point(point))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn caster() -> RayCaster {
        RayCaster::new(Rect::new(-200.0, -200.0, 400.0, 400.0)).with_step(0.5)
    }

    #[test]
    fn test_march_stops_at_wall() {
        let walls = [Rect::new(50.0, -10.0, 10.0, 20.0)];
        let end = caster().march(Vec2::ZERO, Vec2::X, &walls);
        assert!(end.x < 50.0 && end.x >= 49.5);
        assert_relative_eq!(end.y, 0.0);
    }

    #[test]
    fn test_march_stops_at_bounds_and_range() {
        let end = caster().march(Vec2::ZERO, Vec2::X, &[]);
        assert!(end.x < 200.0 && end.x >= 199.5);

        let short = caster().with_max_distance(30.0).march(Vec2::ZERO, Vec2::X, &[]);
        assert_relative_eq!(short.x, 30.0);
    }

    #[test]
    fn test_open_field_is_single_triangle() {
        let triangles = caster().cast_rays(Vec2::ZERO, 0.0, 90.0, &[], &[]);
        assert_eq!(triangles.len(), 1);
        assert!(triangles[0].area() > 0.0);
    }

    #[test]
    fn test_corner_in_view_splits_fan() {
        let wall = Rect::new(50.0, 10.0, 20.0, 50.0);
        let triangles = caster().cast_rays(Vec2::ZERO, 0.0, 90.0, &[wall], &wall.corners());
        // Both top corners are visible; the far one is a silhouette
        assert_eq!(triangles.len(), 4);
        for t in &triangles {
            assert_eq!(t.a, Vec2::ZERO);
        }
        assert!(triangles.iter().any(|t| t.b == Vec2::new(70.0, 10.0) || t.c == Vec2::new(70.0, 10.0)));
    }

    #[test]
    fn test_hidden_corner_is_skipped() {
        let wall = Rect::new(50.0, 10.0, 20.0, 50.0);
        // Far bottom corner sits behind the wall itself
        let triangles = caster().cast_rays(Vec2::ZERO, 0.0, 90.0, &[wall], &[Vec2::new(70.0, 60.0)]);
        assert_eq!(triangles.len(), 1);
    }

    #[test]
    fn test_corner_behind_nearer_corner_is_hidden() {
        let wall = Rect::new(60.0, 60.0, 40.0, 40.0);
        let triangles = caster().cast_rays(Vec2::ZERO, 45.0, 90.0, &[wall], &wall.corners());
        let vertices: Vec<Vec2> = triangles.iter().flat_map(|t| [t.b, t.c]).collect();
        assert!(vertices.contains(&Vec2::new(60.0, 60.0)));
        assert!(vertices.contains(&Vec2::new(100.0, 60.0)));
        assert!(vertices.contains(&Vec2::new(60.0, 100.0)));
        assert!(!vertices.contains(&Vec2::new(100.0, 100.0)));
        // Near corner, two silhouettes with their far points, two boundaries
        assert_eq!(triangles.len(), 6);
    }
}
