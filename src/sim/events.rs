//! Events emitted by the simulation during a tick
//!
//! Feedback (floating text, particles, shake, sound) is described here and
//! animated by the frontend. Gameplay events are for the shell and logs.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::effects::EffectKind;
use super::items::ItemKind;
use crate::audio::SoundCue;

/// RGB color
pub type Rgb = [u8; 3];

/// Colors for feedback
pub mod colors {
    use super::Rgb;

    pub const WHITE: Rgb = [255, 255, 255];
    pub const RED: Rgb = [255, 0, 0];
    pub const CYAN: Rgb = [0, 255, 255];
    pub const MAGENTA: Rgb = [255, 0, 255];
    pub const YELLOW: Rgb = [255, 255, 0];
    pub const GOLD: Rgb = [255, 215, 0];
    pub const PINK: Rgb = [255, 100, 200];
    pub const PURPLE: Rgb = [128, 0, 128];
    pub const ICE: Rgb = [0, 191, 255];
    pub const DARK_GREEN: Rgb = [0, 100, 0];
    pub const GREEN: Rgb = [0, 255, 0];
    pub const ORANGE: Rgb = [255, 165, 0];

    /// Particle bursts
    pub const SPARK_SCORE: Rgb = [255, 255, 0];
    pub const SPARK_BLOCK: Rgb = [200, 200, 255];
    pub const SPARK_HIT: Rgb = [255, 50, 50];
    pub const SPARK_TNT: Rgb = [255, 100, 0];

    /// Player tint (P1 red bucket, P2 cyan bucket)
    pub const P1: Rgb = RED;
    pub const P2: Rgb = CYAN;
}

/// Font size for floating text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextSize {
    Normal,
    Header,
}

/// Something that happened during a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Floating text rising from `pos`
    Text {
        text: String,
        pos: Vec2,
        color: Rgb,
        size: TextSize,
    },
    /// Particle burst at `pos`
    Particles { pos: Vec2, color: Rgb, count: u32 },
    /// Screen shake for the given number of frames
    ScreenShake { frames: u32 },
    Sound(SoundCue),

    Caught { player: u8, kind: ItemKind },
    Missed { kind: ItemKind },
    LevelUp { level: u32 },
    BossFight { hp: f32 },
    BossDefeated,
    EffectEnded { player: u8, effect: EffectKind },
    FreezeEnded,
    PlayerDied { player: u8 },
}

impl GameEvent {
    pub fn text(text: impl Into<String>, pos: Vec2, color: Rgb) -> Self {
        GameEvent::Text {
            text: text.into(),
            pos,
            color,
            size: TextSize::Normal,
        }
    }

    pub fn header(text: impl Into<String>, pos: Vec2, color: Rgb) -> Self {
        GameEvent::Text {
            text: text.into(),
            pos,
            color,
            size: TextSize::Header,
        }
    }

    pub fn particles(pos: Vec2, color: Rgb, count: u32) -> Self {
        GameEvent::Particles { pos, color, count }
    }

    /// Floating text content, if this is a text event
    pub fn as_text(&self) -> Option<&str> {
        match self {
            GameEvent::Text { text, .. } => Some(text),
            _ => None,
        }
    }
}
