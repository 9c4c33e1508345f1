//! # stalker_nav - Navigation for the Stalker AI
//!
//! Two graphs share one tile coordinate space:
//!
//! - [`GridMesh`]: walkable tiles generated from wall rectangles
//! - [`VentGraph`]: hand-authored shortcut network
//!
//! Both implement [`NavGraph`], so a single A* ([`astar::search`]) serves
//! them. Paths come back as a [`Path`] stack: the goal sits at the bottom
//! and popping walks from the start towards the goal.

pub mod astar;
pub mod grid;
pub mod path;
pub mod tile;
pub mod vent;

pub use astar::{search, NavGraph, Route};
pub use grid::{GridMesh, PlannedPath, DEFAULT_FALLBACK_RINGS, DEFAULT_SAMPLE_ATTEMPTS};
pub use path::Path;
pub use tile::{Edge, Tile, TileClass};
pub use vent::VentGraph;

pub mod prelude {
    pub use crate::astar::{search, NavGraph, Route};
    pub use crate::grid::{GridMesh, PlannedPath};
    pub use crate::path::Path;
    pub use crate::tile::{Edge, Tile, TileClass};
    pub use crate::vent::VentGraph;
}
