//! Persisted map bundles

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MapError, Result};
use crate::map::GameMap;

/// Current bundle layout version
pub const BUNDLE_VERSION: u32 = 1;

/// Bundle file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BundleFormat {
    /// JSON (human readable)
    Json,
    /// Binary (compact)
    Binary,
}

impl Default for BundleFormat {
    fn default() -> Self {
        Self::Binary
    }
}

impl BundleFormat {
    /// Pick a format from the file extension: `.json`, `.bin` or `.map`
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("bin") | Some("map") => Ok(Self::Binary),
            other => Err(MapError::UnknownFormat(other.unwrap_or("").to_string())),
        }
    }
}

/// A prebuilt map: walls, settings, grid mesh, vent graph and derived geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapBundle {
    /// Layout version
    pub version: u32,
    pub map: GameMap,
}

impl MapBundle {
    pub fn new(map: GameMap) -> Self {
        Self {
            version: BUNDLE_VERSION,
            map,
        }
    }

    pub fn into_map(self) -> GameMap {
        self.map
    }

    /// Encode in `format`
    pub fn to_bytes(&self, format: BundleFormat) -> Result<Vec<u8>> {
        match format {
            BundleFormat::Json => serde_json::to_vec_pretty(self)
                .map_err(|e| MapError::Serialization(e.to_string())),
            BundleFormat::Binary => bincode::serialize(self)
                .map_err(|e| MapError::Serialization(e.to_string())),
        }
    }

    /// Decode from `format`, rejecting bundles from a newer layout
    pub fn from_bytes(bytes: &[u8], format: BundleFormat) -> Result<Self> {
        let bundle: MapBundle = match format {
            BundleFormat::Json => serde_json::from_slice(bytes)
                .map_err(|e| MapError::Deserialization(e.to_string()))?,
            BundleFormat::Binary => bincode::deserialize(bytes)
                .map_err(|e| MapError::Deserialization(e.to_string()))?,
        };

        if bundle.version > BUNDLE_VERSION {
            return Err(MapError::VersionMismatch(bundle.version, BUNDLE_VERSION));
        }
        Ok(bundle)
    }

    /// Write to `path`, format chosen by extension
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.to_bytes(BundleFormat::from_path(path)?)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, bytes)?;
        log::info!("saved map bundle '{}' to {}", self.map.name(), path.display());
        Ok(())
    }

    /// Read from `path`, format chosen by extension
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = BundleFormat::from_path(path)?;
        let bundle = Self::from_bytes(&fs::read(path)?, format)?;
        log::info!("loaded map bundle '{}' from {}", bundle.map.name(), path.display());
        Ok(bundle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(BundleFormat::from_path(&PathBuf::from("a.json")).unwrap(), BundleFormat::Json);
        assert_eq!(BundleFormat::from_path(&PathBuf::from("a.map")).unwrap(), BundleFormat::Binary);
        assert_eq!(BundleFormat::from_path(&PathBuf::from("a.bin")).unwrap(), BundleFormat::Binary);
        assert!(matches!(
            BundleFormat::from_path(&PathBuf::from("a.txt")),
            Err(MapError::UnknownFormat(ext)) if ext == "txt"
        ));
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(matches!(
            MapBundle::from_bytes(b"{ not json", BundleFormat::Json),
            Err(MapError::Deserialization(_))
        ));
        assert!(MapBundle::from_bytes(&[1, 2, 3], BundleFormat::Binary).is_err());
    }
}
