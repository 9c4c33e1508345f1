//! Headless game world
//!
//! Wires a loaded map, one alien, its director and a scripted player
//! together and steps them at a fixed rate.

use std::collections::BTreeMap;

use stalker_ai::prelude::*;
use stalker_map::GameMap;
use stalker_math::{bearing, Vec2};
use stalker_nav::Path;

use crate::config::SimConfig;
use crate::error::Result;

/// Player body edge length
pub const PLAYER_SIZE: f32 = 20.0;

/// Arrival radius for player waypoints
const PLAYER_ARRIVE: f32 = 4.0;

/// Route stops as fractions of the map size
const PATROL_ROUTE: [(f32, f32); 4] = [(0.15, 0.15), (0.85, 0.2), (0.8, 0.85), (0.2, 0.8)];

/// Player that walks a fixed loop of map points over the nav mesh
#[derive(Debug, Clone)]
pub struct ScriptedPlayer {
    body: Body,
    speed: f32,
    route: Vec<Vec2>,
    leg: usize,
    path: Path,
    /// Facing in degrees, follows the last movement
    look: f32,
    alive: bool,
}

impl ScriptedPlayer {
    /// Spawn at the map's player spawn and loop through the patrol route
    pub fn new(map: &GameMap, speed: f32) -> Self {
        let size = map.size();
        let mut route = vec![map.settings().player_spawn];
        route.extend(PATROL_ROUTE.iter().map(|&(fx, fy)| Vec2::new(size.x * fx, size.y * fy)));
        Self::with_route(map.settings().player_spawn, speed, route)
    }

    pub fn with_route(spawn: Vec2, speed: f32, route: Vec<Vec2>) -> Self {
        Self {
            body: Body::new(spawn, PLAYER_SIZE),
            speed,
            route,
            leg: 0,
            path: Path::default(),
            look: 0.0,
            alive: true,
        }
    }

    /// Walk one tick along the route
    pub fn step(&mut self, dt: f32, map: &GameMap) {
        if !self.alive || self.route.is_empty() {
            return;
        }

        if self.path.is_empty() {
            self.plan_next_leg(map);
        }

        while let Some(next) = self.path.peek_next() {
            if self.body.position.distance(next) > PLAYER_ARRIVE {
                let start = self.body.position;
                if self.body.go_to(next, self.speed, dt, map.walls()) != Vec2::ZERO {
                    self.look = bearing(start, self.body.position);
                }
                return;
            }
            self.path.pop();
        }
    }

    pub fn look(&self) -> f32 {
        self.look
    }

    fn plan_next_leg(&mut self, map: &GameMap) {
        // Unreachable stops are skipped, at most one full lap per call
        for _ in 0..self.route.len() {
            self.leg = (self.leg + 1) % self.route.len();
            let target = self.route[self.leg];
            if let Some(plan) = map.nav_mesh().compute_path(self.body.position, target) {
                self.path = plan.path.with_destination(target);
                return;
            }
            log::debug!("player: no route to {:?}, skipping", target);
        }
    }
}

impl PlayerHandle for ScriptedPlayer {
    fn position(&self) -> Vec2 {
        self.body.position
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn kill(&mut self) {
        self.alive = false;
    }
}

/// Counts every sound the alien plays
#[derive(Debug, Clone, Default)]
pub struct SoundLog {
    counts: BTreeMap<&'static str, u32>,
}

impl SoundLog {
    pub fn count(&self, effect: SoundEffect) -> u32 {
        self.counts.get(effect.name()).copied().unwrap_or(0)
    }

    pub fn counts(&self) -> &BTreeMap<&'static str, u32> {
        &self.counts
    }
}

impl SoundSink for SoundLog {
    fn play(&mut self, effect: SoundEffect, volume: Option<f32>) {
        match volume {
            Some(volume) => log::trace!("sound: {} at {:.2}", effect.name(), volume),
            None => log::debug!("sound: {}", effect.name()),
        }
        *self.counts.entry(effect.name()).or_insert(0) += 1;
    }
}

/// Result of a run
#[derive(Debug, Clone)]
pub struct Summary {
    pub ticks: u64,
    pub seconds: f32,
    pub final_state: AlienState,
    pub player_alive: bool,
    pub transitions: u32,
    /// Times the motion tracker picked the alien up
    pub contacts: u32,
    pub aggression: f32,
    pub sounds: BTreeMap<&'static str, u32>,
}

impl Summary {
    pub fn log(&self) {
        log::info!("Run finished after {} ticks ({:.1}s)", self.ticks, self.seconds);
        log::info!("  Alien state: {}", self.final_state);
        log::info!("  State changes: {}", self.transitions);
        log::info!("  Tracker contacts: {}", self.contacts);
        log::info!("  Director aggression: {:.1}", self.aggression);
        log::info!("  Player: {}", if self.player_alive { "alive" } else { "killed" });
        for (name, count) in &self.sounds {
            log::info!("  Sound {}: {}", name, count);
        }
    }
}

/// One alien hunting one scripted player on a map
pub struct Simulation {
    map: GameMap,
    alien: Alien,
    director: Director,
    player: ScriptedPlayer,
    tracker: MotionTracker,
    sounds: SoundLog,
    dt: f32,
    tick: u64,
    transitions: u32,
    contacts: u32,
}

impl Simulation {
    pub fn new(map: GameMap, config: &SimConfig) -> Result<Self> {
        let alien = Alien::new(map.settings().enemy_spawn, config.alien_config())?;
        let director = Director::new(config.director_config())?;
        let player = ScriptedPlayer::new(&map, config.player_speed);
        let tracker = MotionTracker::new(config.tracker_config())?;
        log::info!(
            "Simulation on '{}': alien at {:?}, player at {:?}",
            map.name(),
            alien.position(),
            player.position()
        );

        Ok(Self {
            map,
            alien,
            director,
            player,
            tracker,
            sounds: SoundLog::default(),
            dt: config.dt,
            tick: 0,
            transitions: 0,
            contacts: 0,
        })
    }

    pub fn alien(&self) -> &Alien {
        &self.alien
    }

    pub fn tracker(&self) -> &MotionTracker {
        &self.tracker
    }

    pub fn sounds(&self) -> &SoundLog {
        &self.sounds
    }

    /// Advance one fixed tick: player, alien, tracker, then director
    pub fn step(&mut self) {
        let dt = self.dt;
        self.player.step(dt, &self.map);

        let before = self.alien.state();
        self.alien.update(dt, &self.map, &mut self.player, &mut self.sounds);

        if self.player.is_alive() {
            let had_contact = self.tracker.detects_alien();
            let blip = self.tracker.update(
                dt,
                self.player.position(),
                self.player.look(),
                self.alien.position(),
                &mut self.sounds,
            );
            if let (false, Some(blip)) = (had_contact, blip) {
                self.contacts += 1;
                log::info!("[{:>6}] tracker contact at {:.0} units", self.tick, blip.distance);
            }
        }

        if let Some(command) = self.director.update(dt, &self.alien.snapshot(), self.player.position()) {
            self.alien.command(command);
        }

        let after = self.alien.state();
        if after != before {
            self.transitions += 1;
            log::info!(
                "[{:>6}] alien {} -> {} at ({:.0}, {:.0})",
                self.tick,
                before,
                after,
                self.alien.position().x,
                self.alien.position().y
            );
        }
        self.tick += 1;
    }

    /// Step until `ticks` have run or the player is dead
    pub fn run(&mut self, ticks: u64) -> Summary {
        for _ in 0..ticks {
            if !self.player.is_alive() {
                break;
            }
            self.step();
        }
        self.summary()
    }

    pub fn summary(&self) -> Summary {
        Summary {
            ticks: self.tick,
            seconds: self.tick as f32 * self.dt,
            final_state: self.alien.state(),
            player_alive: self.player.is_alive(),
            transitions: self.transitions,
            contacts: self.contacts,
            aggression: self.director.aggression(),
            sounds: self.sounds.counts().clone(),
        }
    }
}
