//! Runner configuration
//!
//! Settings are layered, later sources winning:
//!
//! 1. Defaults
//! 2. TOML file: `stalker.toml` in the working directory, else `/etc/stalker/sim.toml`
//! 3. Environment variables: `STALKER_MAP`, `STALKER_TICKS`, ...
//! 4. Command line: `stalker_sim [MAP] [--export PATH]`
//!
//! # Example Config File
//!
//! ```toml
//! [sim]
//! map = "crates/stalker_sim/maps/demo"
//! ticks = 36000
//! dt = 0.0166667
//! seed = 42
//! alien = "relentless"     # default, relentless, cautious
//! director = "aggressive"  # default, aggressive, relaxed
//! player_speed = 2.0
//!
//! [tracker]
//! range = 600.0
//! fov = 60.0
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use stalker_ai::{AlienConfig, DirectorConfig, TrackerConfig};

use crate::error::{Result, SimError};

/// Config files tried in order
const CONFIG_FILES: [&str; 2] = ["stalker.toml", "/etc/stalker/sim.toml"];

/// Named tuning preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    #[default]
    #[serde(alias = "normal")]
    Default,
    /// Relentless alien, aggressive director
    #[serde(alias = "relentless", alias = "aggressive")]
    Hard,
    /// Cautious alien, relaxed director
    #[serde(alias = "cautious", alias = "relaxed")]
    Easy,
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::Hard => write!(f, "hard"),
            Self::Easy => write!(f, "easy"),
        }
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "default" | "normal" | "" => Ok(Self::Default),
            "hard" | "relentless" | "aggressive" => Ok(Self::Hard),
            "easy" | "cautious" | "relaxed" => Ok(Self::Easy),
            _ => Err(format!("Unknown preset: {}", s)),
        }
    }
}

impl Preset {
    pub fn alien(self) -> AlienConfig {
        match self {
            Self::Default => AlienConfig::default(),
            Self::Hard => AlienConfig::relentless(),
            Self::Easy => AlienConfig::cautious(),
        }
    }

    pub fn director(self) -> DirectorConfig {
        match self {
            Self::Default => DirectorConfig::default(),
            Self::Hard => DirectorConfig::aggressive(),
            Self::Easy => DirectorConfig::relaxed(),
        }
    }
}

/// Layout of the config file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    sim: SimSection,
    tracker: TrackerConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SimSection {
    map: Option<PathBuf>,
    ticks: Option<u64>,
    dt: Option<f32>,
    seed: Option<u64>,
    alien: Option<Preset>,
    director: Option<Preset>,
    player_speed: Option<f32>,
    export: Option<PathBuf>,
}

/// Complete runner configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Map directory or bundle file
    pub map: PathBuf,
    /// Ticks to run unless the player dies first
    pub ticks: u64,
    /// Seconds per tick
    pub dt: f32,
    /// Alien RNG seed
    pub seed: Option<u64>,
    pub alien: Preset,
    pub director: Preset,
    /// Scripted player speed, units per tick
    pub player_speed: f32,
    pub tracker: TrackerConfig,
    /// Write the built map as a bundle here
    pub export: Option<PathBuf>,
    /// Config file that was loaded
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            map: Path::new(env!("CARGO_MANIFEST_DIR")).join("maps").join("demo"),
            ticks: 60 * 60 * 10,
            dt: 1.0 / 60.0,
            seed: None,
            alien: Preset::Default,
            director: Preset::Default,
            player_speed: 2.0,
            tracker: TrackerConfig::default(),
            export: None,
            config_path: None,
        }
    }
}

impl SimConfig {
    /// Build the configuration from every source. A config file that
    /// exists but does not parse is an error.
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = CONFIG_FILES.iter().map(Path::new).find(|p| p.is_file()) {
            config.read_file(path)?;
        }
        config.apply_env(|key| std::env::var(key).ok());

        let args: Vec<String> = std::env::args().skip(1).collect();
        config.apply_args(&args);
        Ok(config)
    }

    fn read_file(&mut self, path: &Path) -> Result<()> {
        let content = std::fs::read_to_string(path).map_err(|source| SimError::ConfigIo {
            path: path.display().to_string(),
            source,
        })?;
        self.apply_toml(&content).map_err(|source| SimError::ConfigParse {
            path: path.display().to_string(),
            source,
        })?;
        log::info!("Loaded sim config from {}", path.display());
        self.config_path = Some(path.to_path_buf());
        Ok(())
    }

    /// Overlay the keys present in a TOML document
    pub fn apply_toml(&mut self, content: &str) -> std::result::Result<(), toml::de::Error> {
        let FileConfig { sim, tracker } = toml::from_str(content)?;

        if let Some(map) = sim.map {
            self.map = map;
        }
        if let Some(ticks) = sim.ticks {
            self.ticks = ticks;
        }
        if let Some(dt) = sim.dt {
            self.dt = dt;
        }
        if sim.seed.is_some() {
            self.seed = sim.seed;
        }
        if let Some(alien) = sim.alien {
            self.alien = alien;
        }
        if let Some(director) = sim.director {
            self.director = director;
        }
        if let Some(speed) = sim.player_speed {
            self.player_speed = speed;
        }
        if sim.export.is_some() {
            self.export = sim.export;
        }
        self.tracker = tracker;
        Ok(())
    }

    /// Apply `STALKER_*` variables through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        for key in ["map", "ticks", "dt", "seed", "alien", "director", "player_speed", "export"] {
            let var = format!("STALKER_{}", key.to_uppercase());
            if let Some(value) = lookup(&var).filter(|v| !v.is_empty()) {
                log::info!("{} from env: {}", key, value);
                self.set(key, &value);
            }
        }
    }

    /// Apply command-line arguments: a positional map path plus `--export PATH`
    pub fn apply_args(&mut self, args: &[String]) {
        let mut args = args.iter();
        let mut map_set = false;
        while let Some(arg) = args.next() {
            if arg == "--export" {
                match args.next() {
                    Some(path) => self.export = Some(PathBuf::from(path)),
                    None => log::warn!("--export needs a path"),
                }
                continue;
            }
            if arg.starts_with("--") {
                log::warn!("ignoring unknown flag {}", arg);
                continue;
            }
            if !map_set {
                self.map = PathBuf::from(arg);
                map_set = true;
                log::info!("Map from args: {}", self.map.display());
            }
        }
    }

    /// Set one key from an environment string
    fn set(&mut self, key: &str, value: &str) {
        let applied = match key {
            "map" => {
                self.map = PathBuf::from(value);
                true
            }
            "export" => {
                self.export = Some(PathBuf::from(value));
                true
            }
            "ticks" => parse_into(value, &mut self.ticks),
            "dt" => parse_into(value, &mut self.dt),
            "player_speed" => parse_into(value, &mut self.player_speed),
            "alien" => parse_into(value, &mut self.alien),
            "director" => parse_into(value, &mut self.director),
            "seed" => value.parse().map(|seed| self.seed = Some(seed)).is_ok(),
            _ => false,
        };
        if !applied {
            log::warn!("invalid value for '{}': {:?}", key, value);
        }
    }

    /// Alien tuning with the configured seed
    pub fn alien_config(&self) -> AlienConfig {
        let mut config = self.alien.alien();
        config.seed = self.seed;
        config
    }

    pub fn director_config(&self) -> DirectorConfig {
        self.director.director()
    }

    pub fn tracker_config(&self) -> TrackerConfig {
        self.tracker.clone()
    }
}

impl fmt::Display for SimConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "map {}", self.map.display())?;
        write!(f, "{} ticks at dt={:.4}s, alien {}, director {}", self.ticks, self.dt, self.alien, self.director)?;
        if let Some(seed) = self.seed {
            write!(f, ", seed {}", seed)?;
        }
        write!(f, "\ntracker {:.0} units over {:.0} deg", self.tracker.range, self.tracker.fov)?;
        if let Some(path) = &self.export {
            write!(f, "\nexport to {}", path.display())?;
        }
        if let Some(path) = &self.config_path {
            write!(f, "\nfrom {}", path.display())?;
        }
        Ok(())
    }
}

fn parse_into<T: FromStr>(value: &str, slot: &mut T) -> bool {
    match value.parse() {
        Ok(parsed) => {
            *slot = parsed;
            true
        }
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_parse() {
        assert_eq!("hard".parse::<Preset>().unwrap(), Preset::Hard);
        assert_eq!("relaxed".parse::<Preset>().unwrap(), Preset::Easy);
        assert_eq!("".parse::<Preset>().unwrap(), Preset::Default);
        assert!("brutal".parse::<Preset>().is_err());
    }

    #[test]
    fn test_default_config() {
        let config = SimConfig::default();
        assert!(config.map.ends_with("maps/demo"));
        assert_eq!(config.ticks, 36_000);
        assert_eq!(config.seed, None);
        assert_eq!(config.export, None);
    }

    #[test]
    fn test_toml_values() {
        let mut config = SimConfig::default();
        config
            .apply_toml(
                "# demo\n[sim]\nmap = \"maps/a#b\"\nticks = 120 # two seconds\nseed = 9\nalien = \"cautious\"\n\n[tracker]\nrange = 500.0\n",
            )
            .unwrap();
        assert_eq!(config.map, PathBuf::from("maps/a#b"));
        assert_eq!(config.ticks, 120);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.alien, Preset::Easy);
        assert_eq!(config.dt, 1.0 / 60.0);
        assert_eq!(config.tracker.range, 500.0);
        assert_eq!(config.tracker.fov, TrackerConfig::default().fov);
    }

    #[test]
    fn test_keys_outside_sim_table_are_ignored() {
        let mut config = SimConfig::default();
        config.apply_toml("ticks = 5\n[render]\nticks = 7\n").unwrap();
        assert_eq!(config.ticks, 36_000);
    }

    #[test]
    fn test_bad_toml_is_rejected() {
        let mut config = SimConfig::default();
        assert!(config.apply_toml("[sim]\ndt = oops\n").is_err());
        assert!(config.apply_toml("[sim]\nalien = \"brutal\"\n").is_err());
        assert!(config.apply_toml("[sim]\nticks = \"many\"\n").is_err());
        assert_eq!(config.ticks, 36_000);
    }

    #[test]
    fn test_env_overrides_file() {
        let mut config = SimConfig::default();
        config.apply_toml("[sim]\nticks = 120\n").unwrap();
        config.apply_env(|key| match key {
            "STALKER_TICKS" => Some("600".to_string()),
            "STALKER_DIRECTOR" => Some("hard".to_string()),
            "STALKER_SEED" => Some(String::new()),
            _ => None,
        });
        assert_eq!(config.ticks, 600);
        assert_eq!(config.director, Preset::Hard);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_args() {
        let mut config = SimConfig::default();
        let args: Vec<String> = ["--verbose", "maps/a", "--export", "out/a.map", "maps/b"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        config.apply_args(&args);
        assert_eq!(config.map, PathBuf::from("maps/a"));
        assert_eq!(config.export, Some(PathBuf::from("out/a.map")));
    }

    #[test]
    fn test_seed_reaches_alien_config() {
        let mut config = SimConfig::default();
        config.seed = Some(4);
        config.alien = Preset::Hard;
        let alien = config.alien_config();
        assert_eq!(alien.seed, Some(4));
        assert_eq!(alien.path_refresh, AlienConfig::relentless().path_refresh);
    }
}
