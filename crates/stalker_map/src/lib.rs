//! # stalker_map - Map Loading
//!
//! Turns the on-disk map description into an immutable [`GameMap`]:
//!
//! - `walls.txt`: one `x,y,height,width` wall per line
//! - `settings.txt`: `key: int,int,...` lines (spawns, density, edge tolerance)
//! - `vents.json`: optional authored [`stalker_nav::VentGraph`]
//!
//! Building a map generates the grid mesh, the blocking-tile rectangles used
//! for traversal checks and the wall-corner list used by the fog raycaster.
//! A built map can be persisted as a [`MapBundle`] (JSON or bincode).
//!
//! # Example
//!
//! ```ignore
//! use stalker_map::prelude::*;
//!
//! let map = GameMap::load_dir("maps/demo")?;
//! MapBundle::new(map).save("demo.map")?;
//! let map = MapBundle::load("demo.map")?.into_map();
//! ```

pub mod bundle;
pub mod error;
pub mod map;
pub mod parse;
pub mod settings;

pub mod prelude {
    pub use crate::bundle::{BundleFormat, MapBundle, BUNDLE_VERSION};
    pub use crate::error::{MapError, Result};
    pub use crate::map::GameMap;
    pub use crate::parse::{parse_settings, parse_walls, RawSettings, SettingValue};
    pub use crate::settings::MapSettings;
}

pub use prelude::*;
