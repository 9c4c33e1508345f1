//! Hand-authored vent shortcut network

use std::collections::HashMap;

use rand::Rng;
use serde::{Deserialize, Serialize};
use stalker_math::Vec2;

use crate::astar::{self, NavGraph};
use crate::path::Path;
use crate::tile::{Edge, Tile};

/// A vent node and its authored links
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VentNode {
    pub tile: Tile,
    pub edges: Vec<Edge>,
}

/// Sparse graph of vent nodes plus the exits into walkable space.
///
/// Edges are placed by designers, not derived from walls. Nodes share the
/// grid's tile coordinates and `density`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "VentGraphData", into = "VentGraphData")]
pub struct VentGraph {
    density: f32,
    nodes: Vec<VentNode>,
    exits: Vec<Tile>,
    index: HashMap<Tile, usize>,
}

/// On-disk form; the lookup index is rebuilt after loading
#[derive(Serialize, Deserialize)]
struct VentGraphData {
    density: f32,
    nodes: Vec<VentNode>,
    #[serde(default)]
    exits: Vec<Tile>,
}

impl From<VentGraphData> for VentGraph {
    fn from(data: VentGraphData) -> Self {
        let mut graph = Self {
            density: data.density,
            nodes: data.nodes,
            exits: data.exits,
            index: HashMap::new(),
        };
        graph.rebuild_index();
        graph
    }
}

impl From<VentGraph> for VentGraphData {
    fn from(graph: VentGraph) -> Self {
        Self {
            density: graph.density,
            nodes: graph.nodes,
            exits: graph.exits,
        }
    }
}

impl VentGraph {
    pub fn new(density: f32) -> Self {
        Self {
            density,
            nodes: Vec::new(),
            exits: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Rebuild the tile -> node lookup
    pub fn rebuild_index(&mut self) {
        self.index.clear();
        for (idx, node) in self.nodes.iter().enumerate() {
            self.index.entry(node.tile).or_insert(idx);
        }
    }

    /// Add a node if it is not already present
    pub fn add_node(&mut self, tile: Tile) -> &mut Self {
        if !self.index.contains_key(&tile) {
            self.index.insert(tile, self.nodes.len());
            self.nodes.push(VentNode {
                tile,
                edges: Vec::new(),
            });
        }
        self
    }

    /// Link two nodes both ways, adding them as needed
    pub fn connect(&mut self, a: Tile, b: Tile) -> &mut Self {
        if a == b {
            return self.add_node(a);
        }
        self.add_node(a).add_node(b);
        let weight = a.distance(b);
        self.link(a, b, weight);
        self.link(b, a, weight);
        self
    }

    fn link(&mut self, from: Tile, to: Tile, weight: f32) {
        if let Some(&idx) = self.index.get(&from) {
            let edges = &mut self.nodes[idx].edges;
            if !edges.iter().any(|e| e.to == to) {
                edges.push(Edge::new(to, weight));
            }
        }
    }

    /// Mark `tile` as a transition point into walkable space
    pub fn add_exit(&mut self, tile: Tile) -> &mut Self {
        if !self.exits.contains(&tile) {
            self.exits.push(tile);
        }
        self
    }

    pub fn density(&self) -> f32 {
        self.density
    }

    pub fn nodes(&self) -> &[VentNode] {
        &self.nodes
    }

    pub fn exits(&self) -> &[Tile] {
        &self.exits
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Center of `tile` in world space
    pub fn position(&self, tile: Tile) -> Vec2 {
        Vec2::new(
            (tile.i as f32 + 0.5) * self.density,
            (tile.j as f32 + 0.5) * self.density,
        )
    }

    fn tile_of(&self, pos: Vec2) -> Tile {
        Tile::new(
            (pos.x / self.density).floor() as i32,
            (pos.y / self.density).floor() as i32,
        )
    }

    /// Node closest to `pos` by squared tile-index distance.
    ///
    /// Ignores connectivity: the chosen node may be unreachable by edges.
    pub fn nearest_node(&self, pos: Vec2) -> Option<Tile> {
        let tile = self.tile_of(pos);
        self.nodes
            .iter()
            .min_by_key(|node| node.tile.distance_squared(tile))
            .map(|node| node.tile)
    }

    /// Plan through the vents, ending exactly on `target`
    pub fn compute_path(&self, from: Vec2, target: Vec2) -> Option<Path> {
        let start = self.nearest_node(from)?;
        let goal = self.nearest_node(target)?;
        let route = astar::search(self, start, goal)?;
        Some(Path::from_goal_first(route.waypoints(self)).with_destination(target))
    }

    /// Exit closest to `pos` in world space
    pub fn closest_vent_access(&self, pos: Vec2) -> Option<Vec2> {
        self.exits
            .iter()
            .map(|&tile| self.position(tile))
            .min_by(|a, b| pos.distance_squared(*a).total_cmp(&pos.distance_squared(*b)))
    }

    /// Random point along a vent corridor.
    ///
    /// Picks a node, then one of its links (or the node itself at a dead end),
    /// then a uniform fraction of the way along that link.
    pub fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Vec2> {
        if self.nodes.is_empty() {
            return None;
        }
        let node = &self.nodes[rng.gen_range(0..self.nodes.len())];
        let from = self.position(node.tile);
        let to = if node.edges.is_empty() {
            from
        } else {
            self.position(node.edges[rng.gen_range(0..node.edges.len())].to)
        };
        Some(from.lerp(to, rng.gen::<f32>()))
    }
}

impl NavGraph for VentGraph {
    fn neighbors(&self, tile: Tile) -> &[Edge] {
        self.index
            .get(&tile)
            .map(|&idx| self.nodes[idx].edges.as_slice())
            .unwrap_or(&[])
    }

    fn position(&self, tile: Tile) -> Vec2 {
        VentGraph::position(self, tile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Corridor (0,0) - (4,0) - (4,4) with an exit at each end
    fn corridor() -> VentGraph {
        let mut vents = VentGraph::new(10.0);
        vents
            .connect(Tile::new(0, 0), Tile::new(4, 0))
            .connect(Tile::new(4, 0), Tile::new(4, 4))
            .add_exit(Tile::new(0, 0))
            .add_exit(Tile::new(4, 4));
        vents
    }

    #[test]
    fn test_connect_is_bidirectional_and_idempotent() {
        let mut vents = corridor();
        vents.connect(Tile::new(4, 0), Tile::new(0, 0));
        assert_eq!(vents.nodes().len(), 3);
        assert_eq!(vents.neighbors(Tile::new(4, 0)).len(), 2);
        assert_eq!(vents.neighbors(Tile::new(0, 0)).len(), 1);
        assert_relative_eq!(vents.neighbors(Tile::new(0, 0))[0].weight, 4.0);
    }

    #[test]
    fn test_compute_path_ends_on_raw_target() {
        let vents = corridor();
        let target = Vec2::new(43.0, 47.0);
        let mut path = vents.compute_path(Vec2::new(1.0, 1.0), target).unwrap();
        assert_eq!(path.destination(), Some(target));
        assert_eq!(path.pop(), Some(Vec2::new(5.0, 5.0)));
        assert_eq!(path.pop(), Some(Vec2::new(45.0, 5.0)));
        assert_eq!(path.pop(), Some(Vec2::new(45.0, 45.0)));
        assert_eq!(path.pop(), Some(target));
    }

    #[test]
    fn test_nearest_node_uses_index_distance() {
        let vents = corridor();
        assert_eq!(vents.nearest_node(Vec2::new(31.0, 38.0)), Some(Tile::new(4, 4)));
        assert_eq!(VentGraph::new(10.0).nearest_node(Vec2::ZERO), None);
    }

    #[test]
    fn test_closest_vent_access() {
        let vents = corridor();
        assert_eq!(vents.closest_vent_access(Vec2::new(50.0, 30.0)), Some(Vec2::new(45.0, 45.0)));
        assert_eq!(VentGraph::new(10.0).closest_vent_access(Vec2::ZERO), None);
    }

    #[test]
    fn test_random_point_lies_on_a_corridor() {
        let vents = corridor();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let p = vents.random_point(&mut rng).unwrap();
            let on_first = (p.y - 5.0).abs() < 1e-3 && (5.0..=45.0).contains(&p.x);
            let on_second = (p.x - 45.0).abs() < 1e-3 && (5.0..=45.0).contains(&p.y);
            assert!(on_first || on_second, "{p:?} is off the vents");
        }
        assert!(VentGraph::new(10.0).random_point(&mut rng).is_none());
    }

    #[test]
    fn test_index_rebuilt_after_deserialize() {
        let vents = corridor();
        let json = serde_json::to_string(&vents).unwrap();
        let loaded: VentGraph = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded.neighbors(Tile::new(4, 4)).len(), 1);
        assert_eq!(loaded, vents);
    }
}
