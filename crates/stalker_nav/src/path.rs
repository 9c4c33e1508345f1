//! Waypoint stack consumed by path followers

use stalker_math::Vec2;

/// Ordered world waypoints.
///
/// Stored goal-first: [`Path::pop`] takes from the end, so successive pops
/// move from the start towards the destination, and the last pop yields the
/// destination itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    waypoints: Vec<Vec2>,
}

impl Path {
    /// Build from goal-first waypoints
    pub fn from_goal_first(waypoints: Vec<Vec2>) -> Self {
        Self { waypoints }
    }

    /// Build from start-first waypoints
    pub fn from_start_first(mut waypoints: Vec<Vec2>) -> Self {
        waypoints.reverse();
        Self { waypoints }
    }

    /// Replace the destination with an exact point so the follower stops
    /// on it rather than on a tile center
    pub fn with_destination(mut self, point: Vec2) -> Self {
        self.waypoints.insert(0, point);
        self
    }

    /// Take the next waypoint
    pub fn pop(&mut self) -> Option<Vec2> {
        self.waypoints.pop()
    }

    /// Look at the waypoint the next `pop` would return
    pub fn peek_next(&self) -> Option<Vec2> {
        self.waypoints.last().copied()
    }

    /// Final waypoint
    pub fn destination(&self) -> Option<Vec2> {
        self.waypoints.first().copied()
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Goal-first view of the remaining waypoints
    pub fn waypoints(&self) -> &[Vec2] {
        &self.waypoints
    }

    /// Length of the polyline through the remaining waypoints
    pub fn remaining_length(&self) -> f32 {
        self.waypoints
            .windows(2)
            .map(|w| w[0].distance(w[1]))
            .sum()
    }
}
