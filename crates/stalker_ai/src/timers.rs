//! Named elapsed-time clocks used by the alien

use serde::{Deserialize, Serialize};

/// Counts seconds since the last reset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stopwatch {
    elapsed: f32,
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

impl Stopwatch {
    /// Clock started now
    pub fn new() -> Self {
        Self { elapsed: 0.0 }
    }

    /// Clock that has already run for an unbounded time
    pub fn long_ago() -> Self {
        Self {
            elapsed: f32::INFINITY,
        }
    }

    pub fn tick(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// True once at least `duration` seconds have passed
    pub fn exceeds(&self, duration: f32) -> bool {
        self.elapsed > duration
    }
}

/// Every clock the alien reads, plus the randomized periods drawn for them
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlienTimers {
    /// Since the last chase replan
    pub path_refresh: Stopwatch,
    pub hiss: Stopwatch,
    pub search: Stopwatch,
    /// Since the chase began
    pub chase: Stopwatch,
    /// Since the player was last perceived
    pub last_seen: Stopwatch,
    /// Since the last patrol glance
    pub glance: Stopwatch,
    /// Since entering look-around
    pub look_around: Stopwatch,
    /// Since the last look-around gaze target
    pub look_turn: Stopwatch,
    /// Since the last footstep
    pub step: Stopwatch,

    /// Current glance period
    pub glance_period: f32,
    /// Current look-around duration
    pub look_around_duration: f32,
    /// Current delay between look-around gaze targets
    pub look_turn_period: f32,
}

impl Default for AlienTimers {
    fn default() -> Self {
        Self {
            path_refresh: Stopwatch::new(),
            hiss: Stopwatch::new(),
            search: Stopwatch::new(),
            chase: Stopwatch::new(),
            last_seen: Stopwatch::long_ago(),
            glance: Stopwatch::new(),
            look_around: Stopwatch::new(),
            look_turn: Stopwatch::new(),
            step: Stopwatch::long_ago(),
            glance_period: 0.0,
            look_around_duration: 0.0,
            look_turn_period: 0.0,
        }
    }
}

impl AlienTimers {
    /// Advance every clock
    pub fn tick(&mut self, dt: f32) {
        for clock in [
            &mut self.path_refresh,
            &mut self.hiss,
            &mut self.search,
            &mut self.chase,
            &mut self.last_seen,
            &mut self.glance,
            &mut self.look_around,
            &mut self.look_turn,
            &mut self.step,
        ] {
            clock.tick(dt);
        }
    }
}
