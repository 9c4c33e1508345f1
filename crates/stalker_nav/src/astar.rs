//! A* search over any tile graph

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use stalker_math::Vec2;

use crate::tile::{Edge, Tile};

/// Adjacency contract shared by the grid mesh and the vent graph
pub trait NavGraph {
    /// Outgoing edges of `tile`; empty for blocked or unknown tiles
    fn neighbors(&self, tile: Tile) -> &[Edge];

    /// World-space center of `tile`
    fn position(&self, tile: Tile) -> Vec2;

    /// Estimated cost between two tiles, in the same units as edge weights.
    ///
    /// Straight-line tile distance never overestimates 1 / √2 step costs.
    fn heuristic(&self, from: Tile, to: Tile) -> f32 {
        from.distance(to)
    }
}

/// Result of a successful search
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Visited tiles, goal first and start last
    pub tiles: Vec<Tile>,
    /// Sum of traversed edge weights
    pub cost: f32,
}

impl Route {
    pub fn start(&self) -> Option<Tile> {
        self.tiles.last().copied()
    }

    pub fn goal(&self) -> Option<Tile> {
        self.tiles.first().copied()
    }

    /// World waypoints in the same goal-first order
    pub fn waypoints<G: NavGraph + ?Sized>(&self, graph: &G) -> Vec<Vec2> {
        self.tiles.iter().map(|&t| graph.position(t)).collect()
    }
}

#[derive(Clone, Copy)]
struct Node {
    tile: Tile,
    f_score: f32,
    g_score: f32,
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Node {}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Node {
    // Min-heap on f, then prefer the deeper node, then a stable tile order
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f_score
            .total_cmp(&self.f_score)
            .then_with(|| self.g_score.total_cmp(&other.g_score))
            .then_with(|| other.tile.cmp(&self.tile))
    }
}

/// Weighted A* from `start` to `goal`.
///
/// Returns `None` when the goal is not reachable through the graph's edges.
pub fn search<G: NavGraph + ?Sized>(graph: &G, start: Tile, goal: Tile) -> Option<Route> {
    if start == goal {
        return Some(Route {
            tiles: vec![start],
            cost: 0.0,
        });
    }

    let mut open_set = BinaryHeap::new();
    let mut came_from: HashMap<Tile, Tile> = HashMap::new();
    let mut g_score: HashMap<Tile, f32> = HashMap::new();
    let mut closed_set: HashSet<Tile> = HashSet::new();

    g_score.insert(start, 0.0);
    open_set.push(Node {
        tile: start,
        f_score: graph.heuristic(start, goal),
        g_score: 0.0,
    });

    while let Some(current) = open_set.pop() {
        if current.tile == goal {
            // Walking the parent chain from the goal yields goal-first order
            let mut tiles = vec![goal];
            let mut cursor = goal;
            while let Some(&prev) = came_from.get(&cursor) {
                tiles.push(prev);
                cursor = prev;
            }
            return Some(Route {
                tiles,
                cost: current.g_score,
            });
        }

        if !closed_set.insert(current.tile) {
            continue;
        }

        let current_g = g_score.get(&current.tile).copied().unwrap_or(f32::MAX);

        for edge in graph.neighbors(current.tile) {
            if closed_set.contains(&edge.to) {
                continue;
            }

            let tentative_g = current_g + edge.weight;
            let neighbor_g = g_score.get(&edge.to).copied().unwrap_or(f32::MAX);
            if tentative_g < neighbor_g {
                came_from.insert(edge.to, current.tile);
                g_score.insert(edge.to, tentative_g);
                open_set.push(Node {
                    tile: edge.to,
                    f_score: tentative_g + graph.heuristic(edge.to, goal),
                    g_score: tentative_g,
                });
            }
        }
    }

    None
}
