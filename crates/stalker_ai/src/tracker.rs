//! Player-held motion tracker
//!
//! Detects the alien inside a forward cone around the player's look
//! direction. Walls do not block it. While the alien is detected the
//! tracker blinks and beeps about once per blink period.

use stalker_math::{bearing, in_field_of_view, shortest_turn, Vec2};

use crate::config::TrackerConfig;
use crate::error::Result;
use crate::interfaces::{SoundEffect, SoundSink};
use crate::timers::Stopwatch;

/// One tracker reading
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blip {
    /// Distance to the alien
    pub distance: f32,
    /// Signed angle from the look direction to the alien, degrees
    pub offset: f32,
    /// Distance as a fraction of the tracker range
    pub reach: f32,
    /// Blink brightness in `(0, 1]`
    pub intensity: f32,
}

impl Blip {
    /// Dot position on a display of the given radius, forward is `-y`
    pub fn screen_offset(&self, radius: f32) -> Vec2 {
        let angle = stalker_math::radians(self.offset);
        let r = self.reach * radius;
        Vec2::new(r * angle.sin(), -r * angle.cos())
    }
}

#[derive(Debug, Clone)]
pub struct MotionTracker {
    config: TrackerConfig,
    /// Running clock the blink phase is taken from
    clock: f32,
    since_reading: Stopwatch,
    last_beep: f32,
    blip: Option<Blip>,
}

impl MotionTracker {
    pub fn new(config: TrackerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            clock: 0.0,
            since_reading: Stopwatch::long_ago(),
            last_beep: 0.0,
            blip: None,
        })
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Current reading
    pub fn blip(&self) -> Option<Blip> {
        self.blip
    }

    pub fn detects_alien(&self) -> bool {
        self.blip.is_some()
    }

    /// Advance one tick. `look` is the player's facing in degrees.
    ///
    /// A reading is held for `refresh` seconds once taken.
    pub fn update<S: SoundSink + ?Sized>(
        &mut self,
        dt: f32,
        observer: Vec2,
        look: f32,
        alien: Vec2,
        sound: &mut S,
    ) -> Option<Blip> {
        self.clock += dt;
        self.since_reading.tick(dt);
        if self.blip.is_some() && !self.since_reading.exceeds(self.config.refresh) {
            return self.blip;
        }

        let distance = observer.distance(alien);
        let direction = bearing(observer, alien);
        if distance >= self.config.range || !in_field_of_view(direction, look, self.config.fov) {
            if self.blip.take().is_some() {
                log::debug!("tracker: contact lost");
            }
            return None;
        }

        if self.blip.is_none() {
            log::debug!("tracker: contact at {:.0} units", distance);
            self.last_beep = self.clock;
        }

        let intensity = (-(self.clock % self.config.blink_period) / self.config.blink_decay).exp();
        if self.clock - self.last_beep > self.config.blink_period || intensity > self.config.beep_intensity {
            self.last_beep = self.clock;
            sound.play(SoundEffect::TrackerBeep, Some(self.config.beep_volume));
        }

        self.since_reading.reset();
        self.blip = Some(Blip {
            distance,
            offset: shortest_turn(look, direction),
            reach: distance / self.config.range,
            intensity,
        });
        self.blip
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interfaces::NullSink;
    use approx::assert_relative_eq;

    const DT: f32 = 1.0 / 60.0;

    fn tracker() -> MotionTracker {
        MotionTracker::new(TrackerConfig::default()).unwrap()
    }

    #[test]
    fn test_detects_inside_cone_only() {
        let origin = Vec2::ZERO;
        let mut ahead = tracker();
        let blip = ahead.update(DT, origin, 0.0, Vec2::new(300.0, 100.0), &mut NullSink).unwrap();
        assert_relative_eq!(blip.reach, Vec2::new(300.0, 100.0).length() / 750.0);
        assert!(blip.offset > 0.0 && blip.offset < 45.0);

        let mut behind = tracker();
        assert!(behind.update(DT, origin, 0.0, Vec2::new(-300.0, 0.0), &mut NullSink).is_none());

        let mut far = tracker();
        assert!(far.update(DT, origin, 0.0, Vec2::new(750.0, 0.0), &mut NullSink).is_none());
        assert!(!far.detects_alien());
    }

    #[test]
    fn test_reading_held_until_refresh() {
        let mut tracker = tracker();
        assert!(tracker.update(DT, Vec2::ZERO, 90.0, Vec2::new(0.0, 200.0), &mut NullSink).is_some());
        // Alien slips behind the player; the old reading holds for one refresh
        let behind = Vec2::new(0.0, -200.0);
        assert!(tracker.update(DT, Vec2::ZERO, 90.0, behind, &mut NullSink).is_some());
        for _ in 0..4 {
            tracker.update(DT, Vec2::ZERO, 90.0, behind, &mut NullSink);
        }
        assert!(!tracker.detects_alien());
    }

    #[test]
    fn test_beeps_about_once_per_period() {
        let mut tracker = tracker();
        let mut sounds = Vec::new();
        for _ in 0..(3.0 / DT) as usize {
            tracker.update(DT, Vec2::ZERO, 0.0, Vec2::new(200.0, 0.0), &mut sounds);
        }
        assert!((2..=4).contains(&sounds.len()), "{} beeps", sounds.len());
        assert!(sounds.iter().all(|s| *s == (SoundEffect::TrackerBeep, Some(0.1))));
    }

    #[test]
    fn test_screen_offset_points_forward() {
        let blip = Blip {
            distance: 375.0,
            offset: 0.0,
            reach: 0.5,
            intensity: 1.0,
        };
        let dot = blip.screen_offset(300.0);
        assert_relative_eq!(dot.x, 0.0);
        assert_relative_eq!(dot.y, -150.0);
    }
}
