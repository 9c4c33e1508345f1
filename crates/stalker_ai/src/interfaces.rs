//! Collaborators the alien talks to but does not own

use stalker_math::Vec2;

/// Sound effects the core triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    Hiss,
    Kill,
    EnterVent,
    ExitVent,
    /// Footstep
    AlienStep,
    /// Player's motion tracker blip
    TrackerBeep,
}

impl SoundEffect {
    /// Effect name as used by asset lookups
    pub fn name(self) -> &'static str {
        match self {
            Self::Hiss => "hiss",
            Self::Kill => "kill",
            Self::EnterVent => "enter_vent",
            Self::ExitVent => "exit_vent",
            Self::AlienStep => "alien_step",
            Self::TrackerBeep => "motion_tracker_beep",
        }
    }
}

/// Receives sound triggers. `volume` is `None` for full-volume effects.
pub trait SoundSink {
    fn play(&mut self, effect: SoundEffect, volume: Option<f32>);
}

/// Discards every sound
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl SoundSink for NullSink {
    fn play(&mut self, _effect: SoundEffect, _volume: Option<f32>) {}
}

/// Records sounds in order
impl SoundSink for Vec<(SoundEffect, Option<f32>)> {
    fn play(&mut self, effect: SoundEffect, volume: Option<f32>) {
        self.push((effect, volume));
    }
}

/// The player as seen by the alien
pub trait PlayerHandle {
    /// Centre position
    fn position(&self) -> Vec2;
    fn is_alive(&self) -> bool;
    /// Mark the player as defeated
    fn kill(&mut self);
}
