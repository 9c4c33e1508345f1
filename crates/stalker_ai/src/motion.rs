//! Body movement and heading control

use serde::{Deserialize, Serialize};
use stalker_math::{shortest_turn, wrap_degrees, Rect, Vec2};

/// Axis-aligned square body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Centre
    pub position: Vec2,
    /// Edge length
    pub size: f32,
    /// Commanded velocity of the last move, zeroed on blocked axes
    pub velocity: Vec2,
}

impl Body {
    pub fn new(position: Vec2, size: f32) -> Self {
        Self {
            position,
            size,
            velocity: Vec2::ZERO,
        }
    }

    /// Current footprint
    pub fn rect(&self) -> Rect {
        Rect::from_center(self.position, Vec2::splat(self.size))
    }

    /// Move `speed` units along `direction`, resolving each axis against `walls`.
    ///
    /// X is integrated and resolved first, then Y. A penetrating axis is
    /// clamped to the wall edge and its velocity component zeroed. Returns
    /// the displacement actually applied.
    pub fn move_along(&mut self, direction: Vec2, speed: f32, dt: f32, walls: &[Rect]) -> Vec2 {
        let direction = direction.normalize();
        if direction == Vec2::ZERO || speed <= 0.0 {
            self.velocity = Vec2::ZERO;
            return Vec2::ZERO;
        }

        let start = self.position;
        let mut step = direction * speed;

        self.position.x += step.x;
        if let Some(x) = self.resolve_x(step.x, walls) {
            self.position.x = x;
            step.x = 0.0;
        }
        self.position.y += step.y;
        if let Some(y) = self.resolve_y(step.y, walls) {
            self.position.y = y;
            step.y = 0.0;
        }

        self.velocity = if dt > 0.0 { step / dt } else { Vec2::ZERO };
        self.position - start
    }

    /// Move toward `target` without overshooting it
    pub fn go_to(&mut self, target: Vec2, speed: f32, dt: f32, walls: &[Rect]) -> Vec2 {
        let delta = target - self.position;
        let distance = delta.length();
        if distance <= 0.0 {
            self.velocity = Vec2::ZERO;
            return Vec2::ZERO;
        }
        self.move_along(delta, speed.min(distance), dt, walls)
    }

    fn resolve_x(&self, dx: f32, walls: &[Rect]) -> Option<f32> {
        let rect = self.rect();
        let half = self.size * 0.5;
        let hits = walls.iter().filter(|w| w.intersects(&rect));
        if dx > 0.0 {
            hits.map(|w| w.left() - half).reduce(f32::min)
        } else if dx < 0.0 {
            hits.map(|w| w.right() + half).reduce(f32::max)
        } else {
            None
        }
    }

    fn resolve_y(&self, dy: f32, walls: &[Rect]) -> Option<f32> {
        let rect = self.rect();
        let half = self.size * 0.5;
        let hits = walls.iter().filter(|w| w.intersects(&rect));
        if dy > 0.0 {
            hits.map(|w| w.top() - half).reduce(f32::min)
        } else if dy < 0.0 {
            hits.map(|w| w.bottom() + half).reduce(f32::max)
        } else {
            None
        }
    }
}

/// Angle that chases a goal under capped angular acceleration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngularTracker {
    /// Current angle in `[0, 360)`
    pub angle: f32,
    /// Current angular speed, degrees/s
    pub velocity: f32,
    /// Angular speed cap
    pub cap: f32,
    /// Angular acceleration
    pub acceleration: f32,
    /// Below this remaining turn the angular speed resets
    pub settle: f32,
}

impl AngularTracker {
    pub fn new(angle: f32, cap: f32, acceleration: f32, settle: f32) -> Self {
        Self {
            angle: wrap_degrees(angle),
            velocity: 0.0,
            cap,
            acceleration,
            settle,
        }
    }

    /// Advance one tick toward `goal` along the shorter direction.
    ///
    /// Inside the settle band the angular speed restarts from zero, but the
    /// step is still taken so the angle lands on the goal.
    pub fn step(&mut self, goal: f32, dt: f32) {
        let diff = shortest_turn(self.angle, goal);
        if diff.abs() < self.settle {
            self.velocity = 0.0;
        }
        self.velocity = (self.velocity + self.acceleration * dt).min(self.cap);
        let turn = (self.velocity * dt).min(diff.abs());
        self.angle = wrap_degrees(self.angle + turn.copysign(diff));
    }

    /// Drop accumulated angular speed
    pub fn halt(&mut self) {
        self.velocity = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_free_move() {
        let mut body = Body::new(Vec2::new(50.0, 50.0), 10.0);
        let moved = body.move_along(Vec2::new(3.0, 4.0), 5.0, DT, &[]);
        assert_relative_eq!(moved.x, 3.0);
        assert_relative_eq!(moved.y, 4.0);
        assert_relative_eq!(body.velocity.x, 3.0 / DT, epsilon = 1e-3);
    }

    #[test]
    fn test_axis_clamp_slides_along_wall() {
        // Wall to the right; diagonal movement keeps the vertical component
        let wall = Rect::new(60.0, 0.0, 10.0, 200.0);
        let mut body = Body::new(Vec2::new(52.0, 50.0), 10.0);
        body.move_along(Vec2::new(1.0, 1.0), 10.0, DT, &[wall]);
        assert_relative_eq!(body.position.x, 55.0);
        assert!(body.position.y > 50.0);
        assert_relative_eq!(body.velocity.x, 0.0);
        assert!(!body.rect().intersects(&wall));
    }

    #[test]
    fn test_clamp_from_below() {
        let floor = Rect::new(0.0, 100.0, 200.0, 10.0);
        let mut body = Body::new(Vec2::new(50.0, 93.0), 10.0);
        body.move_along(Vec2::Y, 5.0, DT, &[floor]);
        assert_relative_eq!(body.position.y, 95.0);
        assert_relative_eq!(body.velocity.y, 0.0);
    }

    #[test]
    fn test_go_to_does_not_overshoot() {
        let mut body = Body::new(Vec2::ZERO, 10.0);
        body.go_to(Vec2::new(2.0, 0.0), 9.0, DT, &[]);
        assert_eq!(body.position, Vec2::new(2.0, 0.0));
        let moved = body.go_to(Vec2::new(2.0, 0.0), 9.0, DT, &[]);
        assert_eq!(moved, Vec2::ZERO);
    }

    #[test]
    fn test_tracker_accelerates_and_caps() {
        let mut tracker = AngularTracker::new(0.0, 180.0, 10_000.0, 0.1);
        tracker.step(90.0, DT);
        assert_relative_eq!(tracker.velocity, 10_000.0 * DT);
        assert_relative_eq!(tracker.angle, 10_000.0 * DT * DT, epsilon = 1e-4);
        tracker.step(90.0, DT);
        assert_relative_eq!(tracker.velocity, 180.0);
        assert_relative_eq!(tracker.angle, 10_000.0 * DT * DT + 3.0, epsilon = 1e-4);
    }

    #[test]
    fn test_tracker_takes_shorter_turn() {
        let mut tracker = AngularTracker::new(10.0, 10_800.0, 50_000.0, 0.1);
        for _ in 0..60 {
            tracker.step(350.0, DT);
        }
        assert_relative_eq!(tracker.angle, 350.0, epsilon = 1e-3);
        // Never went the long way round through 180
        let mut wrap = AngularTracker::new(10.0, 60.0, 1e6, 0.1);
        wrap.step(350.0, 1.0);
        assert_relative_eq!(wrap.angle, 350.0, epsilon = 1e-3);
    }

    #[test]
    fn test_tracker_settles_onto_goal() {
        let mut tracker = AngularTracker::new(45.0, 180.0, 10_000.0, 0.1);
        tracker.velocity = 100.0;
        tracker.step(45.05, DT);
        // Speed restarted from rest, and the small remainder was closed
        assert_relative_eq!(tracker.velocity, 10_000.0 * DT);
        assert_relative_eq!(tracker.angle, 45.05, epsilon = 1e-4);

        for _ in 0..100 {
            tracker.step(45.05, DT);
        }
        assert_relative_eq!(tracker.angle, 45.05, epsilon = 1e-4);
    }
}
