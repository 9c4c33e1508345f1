//! Line-of-sight and field-of-view checks
//!
//! Two obstacle sets are used:
//! - full walls, for perception (`can_see`)
//! - blocking mesh tiles, for deciding whether a path waypoint can be
//!   reached in a straight line (`can_traverse`)

use serde::{Deserialize, Serialize};
use stalker_map::GameMap;
use stalker_math::{bearing, in_field_of_view, segment_hits_rect, Rect, Vec2};

/// True if the segment `from -> to` crosses none of `obstacles`
pub fn line_of_sight(obstacles: &[Rect], from: Vec2, to: Vec2) -> bool {
    !obstacles.iter().any(|r| segment_hits_rect(from, to, r))
}

/// Full visibility against every wall
pub fn can_see(map: &GameMap, from: Vec2, to: Vec2) -> bool {
    line_of_sight(map.walls(), from, to)
}

/// Traversal visibility against the blocking tiles
pub fn can_traverse(map: &GameMap, from: Vec2, to: Vec2) -> bool {
    line_of_sight(map.blocking_tiles(), from, to)
}

/// Angular and radial sight limits
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SightCone {
    /// Full opening angle in degrees
    pub fov: f32,
    /// Maximum distance
    pub range: f32,
}

impl SightCone {
    pub fn new(fov: f32, range: f32) -> Self {
        Self { fov, range }
    }

    /// True if `target` lies within the cone, ignoring occlusion
    pub fn contains(&self, origin: Vec2, heading: f32, target: Vec2) -> bool {
        if origin.distance_squared(target) > self.range * self.range {
            return false;
        }
        in_field_of_view(bearing(origin, target), heading, self.fov)
    }

    /// Cone test plus full visibility
    pub fn perceives(&self, map: &GameMap, origin: Vec2, heading: f32, target: Vec2) -> bool {
        self.contains(origin, heading, target) && can_see(map, origin, target)
    }
}
