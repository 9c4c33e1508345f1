//! Loaded map: walls, settings and the geometry derived from them

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use stalker_math::{Rect, Vec2};
use stalker_nav::{GridMesh, VentGraph};

use crate::error::{MapError, Result};
use crate::parse::parse_walls;
use crate::settings::MapSettings;

pub const WALLS_FILE: &str = "walls.txt";
pub const SETTINGS_FILE: &str = "settings.txt";
pub const VENTS_FILE: &str = "vents.json";

/// A fully built map. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameMap {
    name: String,
    size: Vec2,
    walls: Vec<Rect>,
    settings: MapSettings,
    nav_mesh: GridMesh,
    vents: VentGraph,
    /// Footprints of blocked mesh tiles
    blocking_tiles: Vec<Rect>,
    /// Wall corners not buried inside another wall
    wall_corners: Vec<Vec2>,
}

impl GameMap {
    /// Generate the navigation mesh and derived geometry
    pub fn build(
        name: impl Into<String>,
        walls: Vec<Rect>,
        settings: MapSettings,
        vents: VentGraph,
    ) -> Result<Self> {
        if settings.density <= 0.0 {
            return Err(MapError::InvalidDensity(settings.density));
        }

        let size = settings.map_size.unwrap_or_else(|| wall_extent(&walls));
        let nav_mesh = GridMesh::build(size, &walls, settings.density, settings.edge_tolerance);
        let blocking_tiles = nav_mesh.blocking_tiles();
        let wall_corners = exposed_corners(&walls);

        Ok(Self {
            name: name.into(),
            size,
            walls,
            settings,
            nav_mesh,
            vents,
            blocking_tiles,
            wall_corners,
        })
    }

    /// Read `walls.txt`, `settings.txt` and the optional `vents.json` from `dir`
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let name = dir
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("map")
            .to_string();

        let walls = parse_walls(&fs::read_to_string(dir.join(WALLS_FILE))?);
        let settings = MapSettings::parse(&fs::read_to_string(dir.join(SETTINGS_FILE))?)?;

        let vents_path = dir.join(VENTS_FILE);
        let vents = if vents_path.exists() {
            let text = fs::read_to_string(&vents_path)?;
            serde_json::from_str(&text).map_err(|e| MapError::Deserialization(e.to_string()))?
        } else {
            log::debug!("{} has no {VENTS_FILE}, vent network is empty", dir.display());
            VentGraph::new(settings.density)
        };

        let map = Self::build(name, walls, settings, vents)?;
        log::info!(
            "loaded map '{}' ({} walls, {}x{} tiles, {} vent nodes)",
            map.name,
            map.walls.len(),
            map.nav_mesh.width(),
            map.nav_mesh.height(),
            map.vents.nodes().len()
        );
        Ok(map)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// World extent
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// World rectangle anchored at the origin
    pub fn bounds(&self) -> Rect {
        Rect::from_min_size(Vec2::ZERO, self.size)
    }

    pub fn walls(&self) -> &[Rect] {
        &self.walls
    }

    pub fn settings(&self) -> &MapSettings {
        &self.settings
    }

    pub fn nav_mesh(&self) -> &GridMesh {
        &self.nav_mesh
    }

    pub fn vents(&self) -> &VentGraph {
        &self.vents
    }

    pub fn blocking_tiles(&self) -> &[Rect] {
        &self.blocking_tiles
    }

    pub fn wall_corners(&self) -> &[Vec2] {
        &self.wall_corners
    }

    /// True if `point` lies inside any wall
    pub fn is_solid(&self, point: Vec2) -> bool {
        self.walls.iter().any(|w| w.contains_point(point))
    }
}

/// Extent from the origin to the far edges of every wall
fn wall_extent(walls: &[Rect]) -> Vec2 {
    walls.iter().fold(Vec2::ZERO, |acc, w| {
        Vec2::new(acc.x.max(w.right()), acc.y.max(w.bottom()))
    })
}

fn strictly_inside(rect: &Rect, p: Vec2) -> bool {
    p.x > rect.left() && p.x < rect.right() && p.y > rect.top() && p.y < rect.bottom()
}

/// Distinct wall corners, minus those strictly inside another wall
fn exposed_corners(walls: &[Rect]) -> Vec<Vec2> {
    let mut corners: Vec<Vec2> = Vec::with_capacity(walls.len() * 4);
    for corner in walls.iter().flat_map(Rect::corners) {
        if corners.contains(&corner) {
            continue;
        }
        if walls.iter().any(|w| strictly_inside(w, corner)) {
            continue;
        }
        corners.push(corner);
    }
    corners
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> MapSettings {
        MapSettings {
            player_spawn: Vec2::new(10.0, 10.0),
            enemy_spawn: Vec2::new(90.0, 90.0),
            density: 10.0,
            edge_tolerance: 2.0,
            map_size: None,
        }
    }

    #[test]
    fn test_build_derives_extent() {
        let walls = vec![Rect::new(0.0, 0.0, 100.0, 5.0), Rect::new(40.0, 40.0, 10.0, 60.0)];
        let map = GameMap::build("test", walls, settings(), VentGraph::new(10.0)).unwrap();
        assert_eq!(map.size(), Vec2::new(100.0, 100.0));
        assert_eq!(map.nav_mesh().width(), 10);
        assert!(!map.blocking_tiles().is_empty());
        assert!(map.is_solid(Vec2::new(45.0, 50.0)));
    }

    #[test]
    fn test_buried_corners_are_dropped() {
        // Second wall's top-left corner sits inside the first one
        let walls = vec![Rect::new(0.0, 0.0, 20.0, 20.0), Rect::new(10.0, 10.0, 20.0, 20.0)];
        let map = GameMap::build("test", walls, settings(), VentGraph::new(10.0)).unwrap();
        let corners = map.wall_corners();
        assert!(!corners.contains(&Vec2::new(10.0, 10.0)));
        assert!(!corners.contains(&Vec2::new(20.0, 20.0)));
        assert!(corners.contains(&Vec2::new(30.0, 30.0)));
        assert_eq!(corners.len(), 6);
    }

    #[test]
    fn test_rejects_bad_density() {
        let mut bad = settings();
        bad.density = 0.0;
        assert!(matches!(
            GameMap::build("test", Vec::new(), bad, VentGraph::new(1.0)),
            Err(MapError::InvalidDensity(_))
        ));
    }
}
