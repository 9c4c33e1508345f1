//! Tile coordinates and adjacency edges

use serde::{Deserialize, Serialize};

/// Integer grid index `(i, j)`: `i` is the column, `j` the row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Tile {
    pub i: i32,
    pub j: i32,
}

impl Tile {
    pub const fn new(i: i32, j: i32) -> Self {
        Self { i, j }
    }

    /// Offset by `(di, dj)`
    #[inline]
    pub fn offset(self, di: i32, dj: i32) -> Self {
        Self::new(self.i + di, self.j + dj)
    }

    /// Squared index distance
    #[inline]
    pub fn distance_squared(self, other: Tile) -> i64 {
        let di = (self.i - other.i) as i64;
        let dj = (self.j - other.j) as i64;
        di * di + dj * dj
    }

    /// Euclidean index distance, in tile units
    #[inline]
    pub fn distance(self, other: Tile) -> f32 {
        (self.distance_squared(other) as f32).sqrt()
    }
}

impl From<(i32, i32)> for Tile {
    fn from((i, j): (i32, i32)) -> Self {
        Self::new(i, j)
    }
}

/// Directed, weighted adjacency entry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Neighbor tile
    pub to: Tile,
    /// Traversal cost in tile units
    pub weight: f32,
}

impl Edge {
    pub fn new(to: Tile, weight: f32) -> Self {
        Self { to, weight }
    }
}

/// How mesh generation classified a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileClass {
    /// Walkable and connected to its free neighbors
    Free,
    /// Not blocked, but kept out of the graph: empty adjacency list
    Excluded,
    /// Inflated footprint touches a wall: no adjacency at all
    Blocked,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_distance() {
        let a = Tile::new(0, 0);
        let b = Tile::new(3, 4);
        assert_eq!(a.distance_squared(b), 25);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(a.offset(3, 4), b);
    }

    #[test]
    fn test_tile_ordering_compares_column_first() {
        assert!(Tile::new(0, 5) < Tile::new(1, 0));
    }
}
