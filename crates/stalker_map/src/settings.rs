//! Typed map settings

use serde::{Deserialize, Serialize};
use stalker_math::Vec2;

use crate::error::{MapError, Result};
use crate::parse::{parse_settings, RawSettings};

/// Settings every map must define
pub const REQUIRED_KEYS: [&str; 4] = ["player_spawn", "enemy_spawn", "density", "edge_tolerance"];

/// Validated map settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapSettings {
    /// Player start position
    pub player_spawn: Vec2,
    /// Alien start position
    pub enemy_spawn: Vec2,
    /// Tile edge length in world units
    pub density: f32,
    /// Inflation applied to tile footprints when testing walls
    pub edge_tolerance: f32,
    /// World extent; derived from the walls when absent
    pub map_size: Option<Vec2>,
}

impl MapSettings {
    /// Validate raw `key: values` pairs
    pub fn from_raw(raw: &RawSettings) -> Result<Self> {
        let density = scalar(raw, "density")? as f32;
        if density <= 0.0 {
            return Err(MapError::InvalidDensity(density));
        }

        let map_size = match raw.get("map_size") {
            Some(_) => {
                let size = point(raw, "map_size")?;
                if size.x <= 0.0 || size.y <= 0.0 {
                    return Err(invalid("map_size", "extent must be positive"));
                }
                Some(size)
            }
            None => None,
        };

        Ok(Self {
            player_spawn: point(raw, "player_spawn")?,
            enemy_spawn: point(raw, "enemy_spawn")?,
            density,
            edge_tolerance: scalar(raw, "edge_tolerance")? as f32,
            map_size,
        })
    }

    /// Parse and validate settings text
    pub fn parse(text: &str) -> Result<Self> {
        Self::from_raw(&parse_settings(text))
    }
}

fn invalid(key: &str, reason: impl Into<String>) -> MapError {
    MapError::InvalidSetting {
        key: key.to_string(),
        reason: reason.into(),
    }
}

fn scalar(raw: &RawSettings, key: &str) -> Result<i64> {
    raw.get(key)
        .ok_or_else(|| MapError::MissingSetting(key.to_string()))?
        .as_scalar()
        .ok_or_else(|| invalid(key, "expected a single integer"))
}

fn point(raw: &RawSettings, key: &str) -> Result<Vec2> {
    let value = raw
        .get(key)
        .ok_or_else(|| MapError::MissingSetting(key.to_string()))?;
    match value.values() {
        &[x, y] => Ok(Vec2::new(x as f32, y as f32)),
        values => Err(invalid(key, format!("expected 2 integers, got {}", values.len()))),
    }
}
