//! Stalker simulation runner
//!
//! Loads a map, spawns the alien and its director against a scripted
//! player, and steps the world headlessly at a fixed rate.
//!
//! Run with: cargo run -p stalker_sim -- [MAP] [--export PATH]
//!
//! `MAP` is either a map directory (`walls.txt`, `settings.txt`,
//! optional `vents.json`) or a bundle written by `--export`.

mod config;
mod error;
mod world;

use std::path::Path;
use std::process::ExitCode;

use stalker_ai::SoundEffect;
use stalker_map::{GameMap, MapBundle};

use crate::config::SimConfig;
use crate::error::Result;
use crate::world::Simulation;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!();
    println!("╔═══════════════════════════════════════════╗");
    println!("║        STALKER SIMULATION v{:<15}║", env!("CARGO_PKG_VERSION"));
    println!("╚═══════════════════════════════════════════╝");
    println!();

    let config = match SimConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    for line in config.to_string().lines() {
        log::info!("Config: {}", line);
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Simulation failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(config: &SimConfig) -> Result<()> {
    let map = load_map(&config.map)?;
    log::info!(
        "Map '{}': {:.0}x{:.0}, {} walls, {} mesh tiles, {} vent nodes",
        map.name(),
        map.size().x,
        map.size().y,
        map.walls().len(),
        map.nav_mesh().tile_count(),
        map.vents().nodes().len()
    );

    if let Some(path) = &config.export {
        MapBundle::new(map.clone()).save(path)?;
        log::info!("Exported map bundle to {}", path.display());
    }

    let mut sim = Simulation::new(map, config)?;
    let summary = sim.run(config.ticks);
    summary.log();

    let alien = sim.alien();
    log::info!(
        "Alien ended at ({:.0}, {:.0}), {} footsteps",
        alien.position().x,
        alien.position().y,
        sim.sounds().count(SoundEffect::AlienStep)
    );
    log::info!("Tracker beeped {} times", sim.sounds().count(SoundEffect::TrackerBeep));
    Ok(())
}

/// Map directories are built from text files, anything else is a bundle
fn load_map(path: &Path) -> Result<GameMap> {
    if path.is_dir() {
        log::info!("Building map from {}", path.display());
        Ok(GameMap::load_dir(path)?)
    } else {
        log::info!("Loading map bundle {}", path.display());
        Ok(MapBundle::load(path)?.into_map())
    }
}
