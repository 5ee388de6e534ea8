//! Sound cues and mixing
//!
//! The core only names cues; the frontend owns playback. `AudioManager`
//! turns a cue into a final volume (or silence) from the player's settings.

use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    /// Item scored or bomb blocked by a shield
    Score,
    /// Bomb hit the catcher
    Bomb,
    /// Fruit fell past the catcher
    LostLife,
    /// Background music loop
    Music,
}

impl SoundCue {
    /// Relative loudness of each cue
    fn gain(self) -> f32 {
        match self {
            SoundCue::Score => 0.6,
            SoundCue::Bomb => 1.0,
            SoundCue::LostLife => 0.8,
            SoundCue::Music => 1.0,
        }
    }
}

/// Volume control for the game
#[derive(Debug, Clone, PartialEq)]
pub struct AudioManager {
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut audio = Self::new();
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.music_volume = settings.music_volume.clamp(0.0, 1.0);
        audio.muted = settings.muted;
        audio
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Flip mute (the speaker button); returns the new state
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        log::info!("Audio {}", if self.muted { "muted" } else { "unmuted" });
        self.muted
    }

    /// Final volume for a cue, or `None` if it should not play at all
    pub fn volume_for(&self, cue: SoundCue) -> Option<f32> {
        if self.muted {
            return None;
        }
        let channel = match cue {
            SoundCue::Music => self.music_volume,
            _ => self.sfx_volume,
        };
        let vol = self.master_volume * channel * cue.gain();
        (vol > 0.0).then_some(vol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mute_silences_everything() {
        let mut audio = AudioManager::new();
        assert!(audio.volume_for(SoundCue::Bomb).is_some());
        assert!(audio.toggle_mute());
        assert_eq!(audio.volume_for(SoundCue::Bomb), None);
        assert_eq!(audio.volume_for(SoundCue::Music), None);
        assert!(!audio.toggle_mute());
    }

    #[test]
    fn test_volume_scales() {
        let mut audio = AudioManager::new();
        audio.set_master_volume(0.5);
        audio.set_sfx_volume(2.0); // clamped to 1.0
        assert_eq!(audio.volume_for(SoundCue::Bomb), Some(0.5));
        assert_eq!(audio.volume_for(SoundCue::Score), Some(0.3));

        audio.set_sfx_volume(0.0);
        assert_eq!(audio.volume_for(SoundCue::Score), None);
        assert!(audio.volume_for(SoundCue::Music).is_some());
    }

    #[test]
    fn test_from_settings() {
        let settings = Settings {
            muted: true,
            ..Settings::default()
        };
        assert_eq!(AudioManager::from_settings(&settings).volume_for(SoundCue::Score), None);
    }
}
