//! Grid navigation mesh generated from wall rectangles

use rand::Rng;
use serde::{Deserialize, Serialize};
use stalker_math::consts::SQRT_2;
use stalker_math::{Rect, Vec2};

use crate::astar::{self, NavGraph};
use crate::path::Path;
use crate::tile::{Edge, Tile, TileClass};

/// Ring count scanned by [`GridMesh::closest_accessible_tile`] in [`GridMesh::compute_path`]
pub const DEFAULT_FALLBACK_RINGS: i32 = 3;

/// Rejection-sampling budget for [`GridMesh::random_tile`]
pub const DEFAULT_SAMPLE_ATTEMPTS: usize = 1024;

/// Compass rays scanned by the accessibility fallback, cardinals first
const RAY_DIRECTIONS: [(i32, i32); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// Outcome of [`GridMesh::compute_path`]
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedPath {
    /// Tile-center waypoints, goal first
    pub path: Path,
    /// Start tile had no edges and was replaced by the fallback search
    pub started_off_mesh: bool,
    /// A* cost in tile units
    pub cost: f32,
}

/// Walkable-tile graph over a square partition of the map.
///
/// Adjacency is a flat array indexed `j * width + i`, one entry per tile:
/// `None` for blocked tiles, otherwise the (possibly empty) edge list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GridMeshData")]
pub struct GridMesh {
    width: i32,
    height: i32,
    density: f32,
    edge_tolerance: f32,
    classes: Vec<TileClass>,
    adjacency: Vec<Option<Vec<Edge>>>,
}

#[derive(Deserialize)]
struct GridMeshData {
    width: i32,
    height: i32,
    density: f32,
    edge_tolerance: f32,
    classes: Vec<TileClass>,
    adjacency: Vec<Option<Vec<Edge>>>,
}

impl TryFrom<GridMeshData> for GridMesh {
    type Error = String;

    fn try_from(data: GridMeshData) -> Result<Self, Self::Error> {
        let expected = (data.width.max(0) as usize) * (data.height.max(0) as usize);
        if data.adjacency.len() != expected || data.classes.len() != expected {
            return Err(format!(
                "grid mesh has {} adjacency entries and {} classes, expected {}x{} = {}",
                data.adjacency.len(),
                data.classes.len(),
                data.width,
                data.height,
                expected
            ));
        }
        Ok(Self {
            width: data.width,
            height: data.height,
            density: data.density,
            edge_tolerance: data.edge_tolerance,
            classes: data.classes,
            adjacency: data.adjacency,
        })
    }
}

impl GridMesh {
    /// Partition a `world_size` map into `density`-sized tiles and connect them.
    ///
    /// A tile is blocked when its footprint grown by `edge_tolerance` overlaps
    /// a wall, excluded when only its plain footprint does, and free otherwise.
    /// Free tiles link to free cardinal neighbors (weight 1) and to free
    /// diagonal neighbors (weight √2) when both flanking tiles are free too.
    pub fn build(world_size: Vec2, walls: &[Rect], density: f32, edge_tolerance: f32) -> Self {
        let (width, height) = if density > 0.0 {
            (
                (world_size.x / density).floor().max(0.0) as i32,
                (world_size.y / density).floor().max(0.0) as i32,
            )
        } else {
            log::warn!("non-positive tile density {density}, generating an empty mesh");
            (0, 0)
        };

        let mut mesh = Self {
            width,
            height,
            density,
            edge_tolerance,
            classes: Vec::new(),
            adjacency: Vec::new(),
        };

        let classes: Vec<TileClass> = mesh
            .tiles()
            .map(|tile| mesh.classify(tile, walls))
            .collect();
        let is_free = |tile: Tile| {
            mesh.index(tile)
                .map_or(false, |idx| classes[idx] == TileClass::Free)
        };

        let mut adjacency = Vec::with_capacity(classes.len());
        for tile in mesh.tiles() {
            let entry = match classes[mesh.index_unchecked(tile)] {
                TileClass::Blocked => None,
                TileClass::Excluded => Some(Vec::new()),
                TileClass::Free => {
                    let mut edges = Vec::with_capacity(8);
                    for (di, dj) in [(-1, 0), (1, 0), (0, -1), (0, 1)] {
                        let next = tile.offset(di, dj);
                        if is_free(next) {
                            edges.push(Edge::new(next, 1.0));
                        }
                    }
                    for (di, dj) in [(-1, -1), (1, -1), (-1, 1), (1, 1)] {
                        let next = tile.offset(di, dj);
                        if is_free(next) && is_free(tile.offset(di, 0)) && is_free(tile.offset(0, dj)) {
                            edges.push(Edge::new(next, SQRT_2));
                        }
                    }
                    Some(edges)
                }
            };
            adjacency.push(entry);
        }

        mesh.classes = classes;
        mesh.adjacency = adjacency;
        log::debug!(
            "generated {}x{} grid mesh ({} accessible tiles)",
            width,
            height,
            mesh.accessible_tiles().count()
        );
        mesh
    }

    fn classify(&self, tile: Tile, walls: &[Rect]) -> TileClass {
        let footprint = self.footprint(tile);
        let inflated = footprint.expand(self.edge_tolerance);
        if walls.iter().any(|w| w.intersects(&inflated)) {
            TileClass::Blocked
        } else if walls.iter().any(|w| w.intersects(&footprint)) {
            TileClass::Excluded
        } else {
            TileClass::Free
        }
    }

    /// Number of tile columns
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Number of tile rows
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Tile edge length in world units
    pub fn density(&self) -> f32 {
        self.density
    }

    pub fn edge_tolerance(&self) -> f32 {
        self.edge_tolerance
    }

    pub fn tile_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn contains(&self, tile: Tile) -> bool {
        (0..self.width).contains(&tile.i) && (0..self.height).contains(&tile.j)
    }

    fn index(&self, tile: Tile) -> Option<usize> {
        self.contains(tile).then(|| self.index_unchecked(tile))
    }

    #[inline]
    fn index_unchecked(&self, tile: Tile) -> usize {
        (tile.j * self.width + tile.i) as usize
    }

    fn tile_at(&self, idx: usize) -> Tile {
        let idx = idx as i32;
        Tile::new(idx % self.width, idx / self.width)
    }

    /// All tiles in row-major order
    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        (0..self.width * self.height).map(move |idx| self.tile_at(idx as usize))
    }

    /// Tiles with at least one edge
    pub fn accessible_tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        self.tiles().filter(move |&t| self.is_accessible(t))
    }

    /// Edge list of `tile`; `None` when blocked or outside the grid
    pub fn adjacency(&self, tile: Tile) -> Option<&[Edge]> {
        self.index(tile)
            .and_then(|idx| self.adjacency[idx].as_deref())
    }

    /// Generation-time classification; tiles outside the grid count as blocked
    pub fn class(&self, tile: Tile) -> TileClass {
        self.index(tile)
            .map_or(TileClass::Blocked, |idx| self.classes[idx])
    }

    pub fn is_blocked(&self, tile: Tile) -> bool {
        self.adjacency(tile).is_none()
    }

    /// Tile has a non-empty edge list
    pub fn is_accessible(&self, tile: Tile) -> bool {
        self.adjacency(tile).map_or(false, |edges| !edges.is_empty())
    }

    /// World rectangle covered by `tile`
    pub fn footprint(&self, tile: Tile) -> Rect {
        Rect::new(
            tile.i as f32 * self.density,
            tile.j as f32 * self.density,
            self.density,
            self.density,
        )
    }

    /// Tile under `pos`, clamped to the grid
    pub fn nearest_node(&self, pos: Vec2) -> Tile {
        let i = (pos.x / self.density).floor() as i32;
        let j = (pos.y / self.density).floor() as i32;
        Tile::new(
            i.min(self.width - 1).max(0),
            j.min(self.height - 1).max(0),
        )
    }

    /// Center of `tile` in world space
    pub fn position(&self, tile: Tile) -> Vec2 {
        Vec2::new(
            (tile.i as f32 + 0.5) * self.density,
            (tile.j as f32 + 0.5) * self.density,
        )
    }

    /// Nearest accessible tile along 8 compass rays, up to `rings` steps out.
    ///
    /// Returns `tile` itself when it is already accessible. A ray stops at the
    /// first blocked tile or at the grid border.
    pub fn closest_accessible_tile(&self, tile: Tile, rings: i32) -> Option<Tile> {
        if self.is_accessible(tile) {
            return Some(tile);
        }

        let mut open = [true; RAY_DIRECTIONS.len()];
        for step in 1..=rings {
            for (ray, &(di, dj)) in RAY_DIRECTIONS.iter().enumerate() {
                if !open[ray] {
                    continue;
                }
                let candidate = tile.offset(di * step, dj * step);
                match self.index(candidate).map(|idx| &self.adjacency[idx]) {
                    None | Some(None) => open[ray] = false,
                    Some(Some(edges)) if !edges.is_empty() => return Some(candidate),
                    Some(Some(_)) => {}
                }
            }
        }
        None
    }

    /// Random accessible tile center whose distance from `reference` lies
    /// strictly inside `band`.
    ///
    /// After `attempts` misses, falls back to the accessible tile closest to
    /// the band. `None` only when the mesh has no accessible tile.
    pub fn random_tile<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        reference: Vec2,
        band: (f32, f32),
        attempts: usize,
    ) -> Option<Vec2> {
        let (min_dist, max_dist) = band;
        let count = self.tile_count();
        if count > 0 {
            for _ in 0..attempts {
                let tile = self.tile_at(rng.gen_range(0..count));
                let pos = self.position(tile);
                let dist = reference.distance(pos);
                if min_dist < dist && dist < max_dist && self.is_accessible(tile) {
                    return Some(pos);
                }
            }
        }

        let band_gap = |pos: Vec2| {
            let dist = reference.distance(pos);
            if dist <= min_dist {
                min_dist - dist
            } else if dist >= max_dist {
                dist - max_dist
            } else {
                0.0
            }
        };
        let fallback = self
            .accessible_tiles()
            .map(|t| self.position(t))
            .min_by(|a, b| band_gap(*a).total_cmp(&band_gap(*b)));
        if fallback.is_some() {
            log::warn!(
                "no tile in ({min_dist}, {max_dist}) from {reference:?} after {attempts} samples, using closest match"
            );
        }
        fallback
    }

    /// Plan from `from` to `to` through tile centers.
    ///
    /// Either endpoint sitting on an inaccessible tile is moved with
    /// [`GridMesh::closest_accessible_tile`]; if that fails, or the tiles are
    /// disconnected, there is no plan.
    pub fn compute_path(&self, from: Vec2, to: Vec2) -> Option<PlannedPath> {
        let mut start = self.nearest_node(from);
        let mut goal = self.nearest_node(to);
        let started_off_mesh = !self.is_accessible(start);

        if started_off_mesh {
            start = self.closest_accessible_tile(start, DEFAULT_FALLBACK_RINGS)?;
        }
        if !self.is_accessible(goal) {
            goal = self.closest_accessible_tile(goal, DEFAULT_FALLBACK_RINGS)?;
        }

        let route = astar::search(self, start, goal)?;
        Some(PlannedPath {
            path: Path::from_goal_first(route.waypoints(self)),
            started_off_mesh,
            cost: route.cost,
        })
    }

    /// Footprints of blocked tiles, the obstacle set for traversal checks
    pub fn blocking_tiles(&self) -> Vec<Rect> {
        self.tiles()
            .filter(|&t| self.is_blocked(t))
            .map(|t| self.footprint(t))
            .collect()
    }
}

impl NavGraph for GridMesh {
    fn neighbors(&self, tile: Tile) -> &[Edge] {
        self.adjacency(tile).unwrap_or(&[])
    }

    fn position(&self, tile: Tile) -> Vec2 {
        GridMesh::position(self, tile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn open_grid(n: i32) -> GridMesh {
        GridMesh::build(Vec2::splat(n as f32 * 10.0), &[], 10.0, 2.0)
    }

    #[test]
    fn test_open_grid_edges() {
        let mesh = open_grid(3);
        assert_eq!(mesh.tile_count(), 9);
        assert_eq!(mesh.adjacency(Tile::new(1, 1)).map(<[Edge]>::len), Some(8));
        assert_eq!(mesh.adjacency(Tile::new(0, 0)).map(<[Edge]>::len), Some(3));
        assert_eq!(mesh.class(Tile::new(2, 2)), TileClass::Free);
    }

    #[test]
    fn test_wall_blocks_inflated_neighbors() {
        // Wall fills tile (2, 2); tolerance reaches into every neighbor
        let walls = [Rect::new(20.0, 20.0, 10.0, 10.0)];
        let mesh = GridMesh::build(Vec2::splat(50.0), &walls, 10.0, 2.0);
        assert!(mesh.is_blocked(Tile::new(2, 2)));
        assert!(mesh.is_blocked(Tile::new(1, 1)));
        assert!(mesh.is_blocked(Tile::new(3, 2)));
        assert!(!mesh.is_blocked(Tile::new(0, 0)));
        assert_eq!(mesh.blocking_tiles().len(), 9);
        assert!(mesh.blocking_tiles().contains(&Rect::new(10.0, 10.0, 10.0, 10.0)));
    }

    #[test]
    fn test_negative_tolerance_excludes_tile() {
        // Wall pokes 1 unit into tile (1, 0); shrunk footprint misses it
        let walls = [Rect::new(19.0, 0.0, 5.0, 10.0)];
        let mesh = GridMesh::build(Vec2::new(40.0, 10.0), &walls, 10.0, -2.0);
        assert_eq!(mesh.class(Tile::new(1, 0)), TileClass::Excluded);
        assert_eq!(mesh.adjacency(Tile::new(1, 0)), Some(&[][..]));
        assert_eq!(mesh.class(Tile::new(2, 0)), TileClass::Blocked);
        // Tile 0 stays free but has no free neighbor left
        assert_eq!(mesh.class(Tile::new(0, 0)), TileClass::Free);
        assert!(!mesh.is_accessible(Tile::new(0, 0)));
    }

    #[test]
    fn test_diagonals_need_both_flanks() {
        let walls = [Rect::new(10.0, 0.0, 10.0, 10.0)];
        let mesh = GridMesh::build(Vec2::new(60.0, 60.0), &walls, 10.0, 0.0);
        for tile in mesh.tiles() {
            for edge in mesh.neighbors(tile) {
                let di = edge.to.i - tile.i;
                let dj = edge.to.j - tile.j;
                if di != 0 && dj != 0 {
                    assert_eq!(mesh.class(tile.offset(di, 0)), TileClass::Free);
                    assert_eq!(mesh.class(tile.offset(0, dj)), TileClass::Free);
                }
            }
        }
        // (0, 0) -> (1, 1) would clip the wall corner
        assert_eq!(mesh.class(Tile::new(1, 1)), TileClass::Free);
        assert!(!mesh
            .neighbors(Tile::new(0, 0))
            .iter()
            .any(|e| e.to == Tile::new(1, 1)));
    }

    #[test]
    fn test_nearest_node_round_trip_and_clamp() {
        let mesh = open_grid(4);
        for tile in mesh.tiles() {
            assert_eq!(mesh.nearest_node(mesh.position(tile)), tile);
        }
        assert_eq!(mesh.nearest_node(Vec2::new(-50.0, 999.0)), Tile::new(0, 3));
    }

    #[test]
    fn test_closest_accessible_stops_at_blocked() {
        // Column 2 is a solid wall
        let walls = [Rect::new(20.0, 0.0, 10.0, 50.0)];
        let mesh = GridMesh::build(Vec2::splat(50.0), &walls, 10.0, 0.0);
        let from = Tile::new(2, 2);
        let found = mesh.closest_accessible_tile(from, DEFAULT_FALLBACK_RINGS);
        let found = found.unwrap();
        assert!(mesh.is_accessible(found));
        assert_eq!(found, Tile::new(3, 2));

        let mut walled = mesh.clone();
        walled.adjacency.iter_mut().for_each(|e| *e = None);
        assert_eq!(walled.closest_accessible_tile(from, DEFAULT_FALLBACK_RINGS), None);
    }

    #[test]
    fn test_random_tile_respects_band() {
        let mesh = open_grid(20);
        let mut rng = StdRng::seed_from_u64(7);
        let reference = Vec2::new(5.0, 5.0);
        for _ in 0..50 {
            let pos = mesh.random_tile(&mut rng, reference, (40.0, 80.0), DEFAULT_SAMPLE_ATTEMPTS).unwrap();
            let d = reference.distance(pos);
            assert!(d > 40.0 && d < 80.0);
        }
    }

    #[test]
    fn test_random_tile_falls_back_when_band_is_empty() {
        let mesh = open_grid(3);
        let mut rng = StdRng::seed_from_u64(1);
        let reference = Vec2::new(15.0, 15.0);
        let pos = mesh.random_tile(&mut rng, reference, (500.0, 1e9), 16).unwrap();
        // Farthest corners are the closest to an unreachable band
        assert!(reference.distance(pos) > 14.0);
    }

    #[test]
    fn test_compute_path_from_blocked_start() {
        let walls = [Rect::new(20.0, 0.0, 10.0, 30.0)];
        let mesh = GridMesh::build(Vec2::new(80.0, 80.0), &walls, 10.0, 0.0);
        let plan = mesh
            .compute_path(Vec2::new(25.0, 5.0), Vec2::new(75.0, 75.0))
            .unwrap();
        assert!(plan.started_off_mesh);
        assert_eq!(plan.path.destination(), Some(Vec2::new(75.0, 75.0)));
    }

    #[test]
    fn test_deserialize_rejects_truncated_adjacency() {
        let mesh = open_grid(2);
        let mut json = serde_json::to_value(&mesh).unwrap();
        json["adjacency"].as_array_mut().unwrap().pop();
        assert!(serde_json::from_value::<GridMesh>(json).is_err());
    }
}
