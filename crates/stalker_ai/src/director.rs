//! Director: paces the alien through an aggression level
//!
//! Aggression rises while the alien hides in the vents, snaps to the
//! maximum when the alien sees the player and decays otherwise. Crossing
//! the thresholds orders the alien in or out of the vents. While the alien
//! roams calmly, the director periodically hints at the player's position.

use serde::{Deserialize, Serialize};
use stalker_math::Vec2;

use crate::agent::{AlienCommand, AlienSnapshot};
use crate::config::{DirectorConfig, MAX_AGGRESSION};
use crate::error::Result;
use crate::timers::Stopwatch;

/// Vent order that stays in force until the alien complies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VentOrder {
    Enter,
    Exit,
}

impl VentOrder {
    pub fn command(self) -> AlienCommand {
        match self {
            Self::Enter => AlienCommand::EnterVents,
            Self::Exit => AlienCommand::ExitVents,
        }
    }
}

/// Meta-controller for one alien
#[derive(Debug, Clone)]
pub struct Director {
    config: DirectorConfig,
    aggression: f32,
    /// Time since the alien went backstage
    backstage: Stopwatch,
    /// Time since the last patrol hint
    since_hint: Stopwatch,
    order: Option<VentOrder>,
}

impl Director {
    pub fn new(config: DirectorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            aggression: 0.0,
            backstage: Stopwatch::new(),
            since_hint: Stopwatch::new(),
            order: None,
        })
    }

    /// Start from a given aggression level
    pub fn with_aggression(mut self, aggression: f32) -> Self {
        self.aggression = aggression.clamp(0.0, MAX_AGGRESSION);
        self
    }

    pub fn config(&self) -> &DirectorConfig {
        &self.config
    }

    pub fn aggression(&self) -> f32 {
        self.aggression
    }

    /// Standing vent order, if any
    pub fn order(&self) -> Option<VentOrder> {
        self.order
    }

    /// Advance one tick. Returns the command to forward to the alien.
    ///
    /// Rates are per second; one tick changes aggression by `rate * dt`,
    /// so at a fixed `dt` every tick applies the same step.
    ///
    /// A standing vent order is returned every tick until the alien's
    /// stage flag shows it complied; the alien ignores repeats.
    pub fn update(&mut self, dt: f32, alien: &AlienSnapshot, player: Vec2) -> Option<AlienCommand> {
        if alien.frontstage {
            self.backstage.reset();
            if alien.sees_player {
                self.aggression = MAX_AGGRESSION;
            } else {
                self.aggression -= self.config.decay_rate * dt;
            }
        } else {
            self.backstage.tick(dt);
            self.aggression += self.config.rise_rate * dt;
        }
        self.aggression = self.aggression.clamp(0.0, MAX_AGGRESSION);
        self.since_hint.tick(dt);

        self.order = match self.order {
            Some(VentOrder::Exit) if alien.frontstage => None,
            Some(VentOrder::Enter) if !alien.frontstage => None,
            order => order,
        };

        if self.order.is_none() {
            if !alien.frontstage
                && (self.aggression > self.config.high_threshold
                    || self.backstage.exceeds(self.config.backstage_duration))
            {
                log::info!(
                    "director: aggression {:.1}, {:.1}s backstage, ordering exit",
                    self.aggression,
                    self.backstage.elapsed()
                );
                self.order = Some(VentOrder::Exit);
            } else if alien.frontstage && self.aggression < self.config.low_threshold {
                log::info!("director: aggression {:.1}, ordering retreat", self.aggression);
                self.order = Some(VentOrder::Enter);
            }
        }

        if let Some(order) = self.order {
            return Some(order.command());
        }

        let calm = (self.config.low_threshold..=self.config.high_threshold).contains(&self.aggression);
        if alien.frontstage
            && calm
            && !alien.state.is_hunting()
            && self.since_hint.exceeds(self.config.hint_cooldown)
        {
            self.since_hint.reset();
            log::debug!("director: hinting at {player:?}");
            return Some(AlienCommand::PatrolHint(player));
        }
        None
    }
}
