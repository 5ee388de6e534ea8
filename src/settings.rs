//! Player preferences
//!
//! Kept apart from gameplay tuning: nothing here changes the simulation,
//! only how a frame is presented.

use serde::{Deserialize, Serialize};

/// Particle quality. `Full` draws every burst at the size the game asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    Medium,
    #[default]
    Full,
}

impl QualityPreset {
    /// Fraction of each particle burst actually drawn
    pub fn particle_scale(&self) -> f32 {
        match self {
            QualityPreset::Low => 0.25,
            QualityPreset::Medium => 0.6,
            QualityPreset::Full => 1.0,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Particle quality; lower presets are opt-in
    pub quality: QualityPreset,

    // === Visual Effects ===
    /// Catcher jitter on bomb hits and explosions
    pub screen_shake: bool,
    /// Particle bursts on catches
    pub particles: bool,
    /// Floating "+1", "LEVEL n!" etc.
    pub floating_text: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,

    // === Accessibility ===
    /// Reduced motion (no shake)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Full,

            screen_shake: true,
            particles: true,
            floating_text: true,

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Particles to draw for a burst of `count`
    pub fn particle_count(&self, count: u32) -> u32 {
        if !self.particles || count == 0 {
            return 0;
        }
        ((count as f32 * self.quality.particle_scale()).round() as u32).max(1)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse settings if provided, falling back to defaults on any error
    pub fn load_or_default(json: Option<&str>) -> Self {
        match json.map(Self::from_json) {
            Some(Ok(settings)) => {
                log::info!("Loaded settings");
                settings
            }
            Some(Err(e)) => {
                log::warn!("Invalid settings ({e}), using defaults");
                Self::default()
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }
}
