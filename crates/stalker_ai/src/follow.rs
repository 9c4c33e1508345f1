//! Path following with waypoint skipping

use stalker_map::GameMap;
use stalker_math::Vec2;
use stalker_nav::{Path, PlannedPath};

use crate::config::AlienConfig;
use crate::motion::Body;
use crate::visibility::{can_see, can_traverse};

/// Outcome of one path-following tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathStep {
    /// Path exhausted and the final waypoint reached
    Arrived,
    /// Moving toward this waypoint
    Continuing(Vec2),
}

/// Current plan and progress along it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathFollower {
    /// Waypoints after `next`, goal-first
    path: Path,
    next: Option<Vec2>,
    objective: Option<Vec2>,
    /// Plan started off the mesh; traversal shortcuts are disabled
    off_mesh: bool,
}

impl PathFollower {
    /// Follow a grid-mesh plan
    pub fn adopt(&mut self, plan: PlannedPath) {
        self.off_mesh = plan.started_off_mesh;
        self.set_path(plan.path);
    }

    /// Follow a vent-network path
    pub fn adopt_vent(&mut self, path: Path) {
        self.off_mesh = false;
        self.set_path(path);
    }

    fn set_path(&mut self, mut path: Path) {
        self.objective = path.destination();
        self.next = path.pop();
        self.path = path;
    }

    /// Override the objective without touching the waypoints
    pub fn set_objective(&mut self, objective: Vec2) {
        self.objective = Some(objective);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn next(&self) -> Option<Vec2> {
        self.next
    }

    pub fn objective(&self) -> Option<Vec2> {
        self.objective
    }

    /// Remaining waypoints in travel order, `next` first
    pub fn waypoints(&self) -> Vec<Vec2> {
        self.next
            .into_iter()
            .chain(self.path.waypoints().iter().rev().copied())
            .collect()
    }

    /// One tick along a grid-mesh path
    pub fn follow(
        &mut self,
        body: &mut Body,
        speed: f32,
        dt: f32,
        map: &GameMap,
        config: &AlienConfig,
    ) -> PathStep {
        let Some(mut next) = self.next else {
            return PathStep::Arrived;
        };
        let here = body.position;
        if self.path.is_empty() && here.distance(next) < config.arrive_radius {
            return PathStep::Arrived;
        }

        while let Some(candidate) = self.path.peek_next() {
            let distance = here.distance(candidate);
            let visible = distance < config.corner_tolerance && can_see(map, here, candidate);
            let reachable = !self.off_mesh
                && distance < config.traverse_lookahead
                && can_traverse(map, here, candidate);
            if !(visible || reachable) {
                break;
            }
            self.path.pop();
            next = candidate;
        }

        if here.distance(next) < config.arrive_radius {
            if let Some(after) = self.path.pop() {
                next = after;
            }
        }
        self.next = Some(next);

        body.go_to(next, speed, dt, map.walls());
        PathStep::Continuing(next)
    }

    /// One tick along a vent path. Walls do not apply inside the ducts.
    pub fn follow_vent(&mut self, body: &mut Body, speed: f32, dt: f32, config: &AlienConfig) -> PathStep {
        let here = body.position;
        let (Some(objective), Some(mut next)) = (self.objective, self.next) else {
            return PathStep::Arrived;
        };
        if here.distance(objective) < config.arrive_radius {
            return PathStep::Arrived;
        }

        if here.distance(next) < config.arrive_radius {
            if let Some(after) = self.path.pop() {
                next = after;
            }
        }
        self.next = Some(next);

        body.go_to(next, speed, dt, &[]);
        PathStep::Continuing(next)
    }
}
