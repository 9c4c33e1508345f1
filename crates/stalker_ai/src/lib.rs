//! Stalker AI - the alien and its director
//!
//! This crate drives a single hunting agent over a loaded [`GameMap`].
//!
//! # Features
//!
//! - Line-of-sight perception with a gaze-centred field of view
//! - Behavior state machine with an explicit transition table
//! - Grid-mesh and vent-network path following
//! - Axis-separated wall collision and capped angular turning
//! - Fog-of-war visibility polygons
//! - Aggression-based director issuing vent orders and patrol hints
//! - Player-side motion tracker that blips and beeps on the alien
//!
//! # Example
//!
//! ```ignore
//! use stalker_ai::prelude::*;
//!
//! let mut alien = Alien::new(map.settings().enemy_spawn, AlienConfig::default())?;
//! let mut director = Director::new(DirectorConfig::default())?;
//!
//! alien.update(dt, &map, &mut player, &mut sounds);
//! if let Some(command) = director.update(dt, &alien.snapshot(), player.position()) {
//!     alien.command(command);
//! }
//! ```
//!
//! [`GameMap`]: stalker_map::GameMap

pub mod agent;
pub mod config;
pub mod director;
pub mod error;
pub mod fog;
pub mod follow;
pub mod interfaces;
pub mod motion;
pub mod state;
pub mod timers;
pub mod tracker;
pub mod visibility;

pub mod prelude {
    pub use crate::agent::{Alien, AlienCommand, AlienSnapshot};
    pub use crate::config::{AlienConfig, DirectorConfig, TrackerConfig, MAX_AGGRESSION};
    pub use crate::director::{Director, VentOrder};
    pub use crate::error::{AiError, Result};
    pub use crate::fog::{RayCaster, Triangle};
    pub use crate::follow::{PathFollower, PathStep};
    pub use crate::interfaces::{NullSink, PlayerHandle, SoundEffect, SoundSink};
    pub use crate::motion::{AngularTracker, Body};
    pub use crate::state::{AlienEvent, AlienState};
    pub use crate::timers::{AlienTimers, Stopwatch};
    pub use crate::tracker::{Blip, MotionTracker};
    pub use crate::visibility::{can_see, can_traverse, line_of_sight, SightCone};
}

pub use prelude::*;
