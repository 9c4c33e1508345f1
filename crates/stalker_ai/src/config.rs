//! Alien, director and motion tracker tuning
//!
//! Distances are world units, speeds are world units per tick, durations
//! are seconds and angles are degrees.

use serde::{Deserialize, Serialize};

use crate::error::{AiError, Result};

/// Alien behavior configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlienConfig {
    /// Body edge length
    pub size: f32,

    /// Patrol and vent speed
    pub base_speed: f32,
    pub search_speed: f32,
    /// Chase speed; footsteps switch to the run cadence at or above it
    pub sprint_speed: f32,
    pub rush_speed: f32,

    /// Player closer than this (and perceptible) is killed
    pub kill_range: f32,
    /// Player closer than this (and perceptible) is rushed
    pub rush_range: f32,
    /// Waypoint arrival radius
    pub arrive_radius: f32,

    /// Field of view, centred on the gaze
    pub fov: f32,
    /// Maximum perception distance
    pub sight_range: f32,

    /// Distance band for random patrol targets
    pub patrol_range: (f32, f32),
    /// Distance band for random search targets
    pub search_range: (f32, f32),

    /// Minimum time between chase replans while the player is visible
    pub path_refresh: f32,
    pub hiss_duration: f32,
    /// Chase window measured from the start of the chase
    pub chase_duration: f32,
    /// Keep chasing this long after last seeing the player
    pub lost_sight_grace: f32,
    pub search_duration: f32,

    /// Patrol glance period (Gaussian)
    pub glance_mean: f32,
    pub glance_std_dev: f32,
    /// Standard deviation of the glance offset from the body heading
    pub glance_spread: f32,

    /// Look-around duration (Gaussian)
    pub look_around_mean: f32,
    pub look_around_std_dev: f32,
    /// Delay between look-around gaze targets (Gaussian)
    pub look_turn_mean: f32,
    pub look_turn_std_dev: f32,

    /// Body angular velocity cap, degrees/s
    pub body_turn_cap: f32,
    /// Body angular acceleration, degrees/s²
    pub body_turn_accel: f32,
    pub gaze_turn_cap: f32,
    pub gaze_turn_accel: f32,
    /// Angular velocity resets when the remaining turn drops below this
    pub turn_settle: f32,

    /// Skip visible waypoints closer than this
    pub corner_tolerance: f32,
    /// Skip traversable waypoints closer than this
    pub traverse_lookahead: f32,

    pub walk_step_delay: f32,
    pub run_step_delay: f32,
    /// Footstep volume numerator, divided by the distance to the player
    pub step_attenuation: f32,

    /// RNG seed; entropy when `None`
    pub seed: Option<u64>,
}

impl Default for AlienConfig {
    fn default() -> Self {
        Self {
            size: 25.0,
            base_speed: 1.0,
            search_speed: 2.0,
            sprint_speed: 4.0,
            rush_speed: 9.0,
            kill_range: 25.0,
            rush_range: 100.0,
            arrive_radius: 12.5,
            fov: 90.0,
            sight_range: 1e9,
            patrol_range: (500.0, 1e9),
            search_range: (40.0, 250.0),
            path_refresh: 1.0,
            hiss_duration: 3.0,
            chase_duration: 10.0,
            lost_sight_grace: 5.0,
            search_duration: 25.0,
            glance_mean: 2.0,
            glance_std_dev: 0.75,
            glance_spread: 30.0,
            look_around_mean: 6.0,
            look_around_std_dev: 2.0,
            look_turn_mean: 1.5,
            look_turn_std_dev: 0.75,
            body_turn_cap: 180.0,
            body_turn_accel: 10_000.0,
            gaze_turn_cap: 10_800.0,
            gaze_turn_accel: 50_000.0,
            turn_settle: 0.1,
            corner_tolerance: 0.0,
            traverse_lookahead: 500.0,
            walk_step_delay: 0.7,
            run_step_delay: 0.4,
            step_attenuation: 90.0,
            seed: None,
        }
    }
}

impl AlienConfig {
    /// Faster, shorter-fused alien
    pub fn relentless() -> Self {
        Self {
            search_speed: 3.0,
            sprint_speed: 5.0,
            hiss_duration: 1.5,
            chase_duration: 15.0,
            lost_sight_grace: 8.0,
            path_refresh: 0.5,
            ..Default::default()
        }
    }

    /// Slower alien that spends longer looking around
    pub fn cautious() -> Self {
        Self {
            search_speed: 1.5,
            sprint_speed: 3.0,
            hiss_duration: 4.0,
            chase_duration: 6.0,
            look_around_mean: 9.0,
            fov: 75.0,
            ..Default::default()
        }
    }

    /// Fix the RNG seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the four movement speeds
    pub fn with_speeds(mut self, base: f32, search: f32, sprint: f32, rush: f32) -> Self {
        self.base_speed = base;
        self.search_speed = search;
        self.sprint_speed = sprint;
        self.rush_speed = rush;
        self
    }

    /// Set the field of view and perception distance
    pub fn with_sight(mut self, fov: f32, range: f32) -> Self {
        self.fov = fov;
        self.sight_range = range;
        self
    }

    /// Set kill and rush ranges
    pub fn with_ranges(mut self, kill: f32, rush: f32) -> Self {
        self.kill_range = kill;
        self.rush_range = rush;
        self
    }

    /// Set the chase timings
    pub fn with_chase(mut self, duration: f32, lost_sight_grace: f32) -> Self {
        self.chase_duration = duration;
        self.lost_sight_grace = lost_sight_grace;
        self
    }

    /// Reject values the behavior cannot work with
    pub fn validate(&self) -> Result<()> {
        if !(self.size > 0.0) {
            return Err(AiError::invalid("size", "must be positive"));
        }
        let speeds = [
            ("base_speed", self.base_speed),
            ("search_speed", self.search_speed),
            ("sprint_speed", self.sprint_speed),
            ("rush_speed", self.rush_speed),
        ];
        for (field, speed) in speeds {
            if !(speed >= 0.0) {
                return Err(AiError::invalid(field, "must not be negative"));
            }
        }
        if !(self.fov > 0.0 && self.fov <= 360.0) {
            return Err(AiError::invalid("fov", format!("{} not in (0, 360]", self.fov)));
        }
        for (field, (lo, hi)) in [("patrol_range", self.patrol_range), ("search_range", self.search_range)] {
            if !(lo < hi) {
                return Err(AiError::invalid(field, format!("empty band ({lo}, {hi})")));
            }
        }
        let deviations = [
            ("glance_std_dev", self.glance_std_dev),
            ("glance_spread", self.glance_spread),
            ("look_around_std_dev", self.look_around_std_dev),
            ("look_turn_std_dev", self.look_turn_std_dev),
        ];
        for (field, dev) in deviations {
            if !(dev >= 0.0) {
                return Err(AiError::invalid(field, "must not be negative"));
            }
        }
        Ok(())
    }
}

/// Director configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectorConfig {
    /// Aggression gained per second while the alien is backstage.
    /// Each tick adds `rise_rate * dt`, a fixed step at a fixed tick rate.
    pub rise_rate: f32,
    /// Aggression lost per second while frontstage without seeing the
    /// player. Each tick removes `decay_rate * dt`.
    pub decay_rate: f32,
    /// Frontstage below this: order the alien into the vents
    pub low_threshold: f32,
    /// Backstage above this: order the alien out
    pub high_threshold: f32,
    /// Minimum time between patrol hints
    pub hint_cooldown: f32,
    /// Longest stay in the vents before a forced exit
    pub backstage_duration: f32,
}

/// Aggression ceiling
pub const MAX_AGGRESSION: f32 = 100.0;

impl Default for DirectorConfig {
    fn default() -> Self {
        Self {
            rise_rate: 5.0,
            decay_rate: 1.0,
            low_threshold: 20.0,
            high_threshold: 80.0,
            hint_cooldown: 20.0,
            backstage_duration: 30.0,
        }
    }
}

impl DirectorConfig {
    /// Short vent stays and frequent hints
    pub fn aggressive() -> Self {
        Self {
            rise_rate: 10.0,
            decay_rate: 0.5,
            hint_cooldown: 10.0,
            backstage_duration: 15.0,
            ..Default::default()
        }
    }

    /// Long vent stays, rare hints
    pub fn relaxed() -> Self {
        Self {
            rise_rate: 2.5,
            decay_rate: 2.0,
            hint_cooldown: 40.0,
            backstage_duration: 45.0,
            ..Default::default()
        }
    }

    pub fn with_thresholds(mut self, low: f32, high: f32) -> Self {
        self.low_threshold = low;
        self.high_threshold = high;
        self
    }

    pub fn with_rates(mut self, rise: f32, decay: f32) -> Self {
        self.rise_rate = rise;
        self.decay_rate = decay;
        self
    }

    pub fn with_hint_cooldown(mut self, cooldown: f32) -> Self {
        self.hint_cooldown = cooldown;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=MAX_AGGRESSION).contains(&self.low_threshold)
            || !(0.0..=MAX_AGGRESSION).contains(&self.high_threshold)
            || self.low_threshold >= self.high_threshold
        {
            return Err(AiError::invalid(
                "thresholds",
                format!("need 0 <= low < high <= {MAX_AGGRESSION}"),
            ));
        }
        if !(self.rise_rate >= 0.0 && self.decay_rate >= 0.0) {
            return Err(AiError::invalid("rates", "must not be negative"));
        }
        Ok(())
    }
}

/// Player motion tracker configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Detection distance
    pub range: f32,
    /// Full opening angle of the detection cone
    pub fov: f32,
    /// Minimum time between readings while the alien is detected
    pub refresh: f32,
    /// Blink period; a beep is due at least once per period
    pub blink_period: f32,
    /// Blink brightness decay constant
    pub blink_decay: f32,
    /// Brightness above which the blink always beeps
    pub beep_intensity: f32,
    /// Beep volume
    pub beep_volume: f32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            range: 750.0,
            fov: 90.0,
            refresh: 0.05,
            blink_period: 1.0,
            blink_decay: 0.75,
            beep_intensity: 240.0 / 255.0,
            beep_volume: 0.1,
        }
    }
}

impl TrackerConfig {
    pub fn with_cone(mut self, fov: f32, range: f32) -> Self {
        self.fov = fov;
        self.range = range;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.fov > 0.0 && self.fov <= 360.0) {
            return Err(AiError::invalid("fov", format!("{} not in (0, 360]", self.fov)));
        }
        if !(self.range > 0.0) {
            return Err(AiError::invalid("range", "must be positive"));
        }
        if !(self.blink_period > 0.0 && self.blink_decay > 0.0) {
            return Err(AiError::invalid("blink", "period and decay must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(AlienConfig::default().validate().is_ok());
        assert!(AlienConfig::relentless().validate().is_ok());
        assert!(AlienConfig::cautious().validate().is_ok());
        assert!(DirectorConfig::default().validate().is_ok());
        assert!(DirectorConfig::aggressive().validate().is_ok());
        assert!(DirectorConfig::relaxed().validate().is_ok());
        assert!(TrackerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_kill_range_matches_body() {
        let config = AlienConfig::default();
        assert_eq!(config.kill_range, config.size);
        assert_eq!(config.arrive_radius, config.size / 2.0);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(AlienConfig::default().with_sight(0.0, 100.0).validate().is_err());
        let mut band = AlienConfig::default();
        band.search_range = (300.0, 200.0);
        assert!(band.validate().is_err());
        assert!(DirectorConfig::default().with_thresholds(90.0, 10.0).validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: AlienConfig = serde_json::from_str(r#"{ "fov": 120.0, "seed": 9 }"#).unwrap();
        assert_eq!(config.fov, 120.0);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.rush_speed, 9.0);
    }
}
