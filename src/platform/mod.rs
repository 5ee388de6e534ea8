//! Platform abstraction layer
//!
//! The frontend owns everything outside the simulation:
//! - Art (including placeholder art when a file is missing)
//! - Audio playback
//! - Text rendering and particle animation
//! - Time and input polling

use glam::Vec2;

use crate::audio::SoundCue;
use crate::sim::{AssetHandle, Rgb, TextSize, TickInput};

/// Raw key state as polled from the window.
///
/// Bits outside the known set are dropped on construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct KeySet(u16);

impl KeySet {
    pub const P1_LEFT: KeySet = KeySet(1 << 0);
    pub const P1_RIGHT: KeySet = KeySet(1 << 1);
    pub const P2_LEFT: KeySet = KeySet(1 << 2);
    pub const P2_RIGHT: KeySet = KeySet(1 << 3);
    pub const START_SINGLE: KeySet = KeySet(1 << 4);
    pub const START_TWO: KeySet = KeySet(1 << 5);
    pub const RESTART: KeySet = KeySet(1 << 6);
    pub const MENU: KeySet = KeySet(1 << 7);
    pub const MUTE: KeySet = KeySet(1 << 8);

    const KNOWN: u16 = (1 << 9) - 1;

    pub const fn empty() -> Self {
        KeySet(0)
    }

    /// Build from raw bits, ignoring anything unknown
    pub const fn from_bits_truncate(bits: u16) -> Self {
        KeySet(bits & Self::KNOWN)
    }

    pub const fn contains(self, other: KeySet) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn with(self, other: KeySet) -> Self {
        KeySet(self.0 | other.0)
    }

    /// Translate into simulation input
    pub fn to_tick_input(self) -> TickInput {
        use crate::sim::Controls;

        TickInput {
            p1: Controls {
                left: self.contains(Self::P1_LEFT),
                right: self.contains(Self::P1_RIGHT),
            },
            p2: Controls {
                left: self.contains(Self::P2_LEFT),
                right: self.contains(Self::P2_RIGHT),
            },
            start_single: self.contains(Self::START_SINGLE),
            start_two: self.contains(Self::START_TWO),
            restart: self.contains(Self::RESTART),
            menu: self.contains(Self::MENU),
        }
    }
}

impl std::ops::BitOr for KeySet {
    type Output = KeySet;

    fn bitor(self, rhs: KeySet) -> KeySet {
        self.with(rhs)
    }
}

/// Services the core calls into
pub trait Frontend {
    /// Draw art at a top-left position. Missing art is the frontend's problem.
    fn draw_sprite(&mut self, handle: AssetHandle, x: f32, y: f32);
    fn play_sound(&mut self, cue: SoundCue, volume: f32);
    fn spawn_feedback_text(&mut self, text: &str, x: f32, y: f32, color: Rgb, size: TextSize);
    fn spawn_particles(&mut self, x: f32, y: f32, color: Rgb, count: u32);
    /// Milliseconds since the process started
    fn elapsed_millis(&self) -> u64;
    fn poll_input(&mut self) -> KeySet;

    /// Outline circle (shield / magnet indicators)
    fn draw_ring(&mut self, _center: Vec2, _radius: f32, _color: Rgb, _width: u32) {}

    /// Static HUD or menu text
    fn draw_text(&mut self, _text: &str, _x: f32, _y: f32, _color: Rgb, _size: TextSize) {}
}

/// One call made on a `RecordingFrontend`
#[derive(Debug, Clone, PartialEq)]
pub enum FrontendCall {
    Sprite {
        handle: AssetHandle,
        pos: Vec2,
    },
    Sound {
        cue: SoundCue,
        volume: f32,
    },
    Text {
        text: String,
        pos: Vec2,
        color: Rgb,
        size: TextSize,
    },
    Particles {
        pos: Vec2,
        color: Rgb,
        count: u32,
    },
    Ring {
        center: Vec2,
        radius: f32,
        color: Rgb,
    },
    Label {
        text: String,
        pos: Vec2,
    },
}

/// Headless frontend: a scripted clock and input feed, recording every call
#[derive(Debug, Default)]
pub struct RecordingFrontend {
    clock_ms: u64,
    pending_input: KeySet,
    pub calls: Vec<FrontendCall>,
}

impl RecordingFrontend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward
    pub fn advance(&mut self, ms: u64) {
        self.clock_ms += ms;
    }

    /// Keys reported by the next `poll_input`
    pub fn press(&mut self, keys: KeySet) {
        self.pending_input = keys;
    }

    /// Take everything recorded so far
    pub fn take_calls(&mut self) -> Vec<FrontendCall> {
        std::mem::take(&mut self.calls)
    }

    /// Floating feedback text spawned so far
    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                FrontendCall::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Frontend for RecordingFrontend {
    fn draw_sprite(&mut self, handle: AssetHandle, x: f32, y: f32) {
        self.calls.push(FrontendCall::Sprite {
            handle,
            pos: Vec2::new(x, y),
        });
    }

    fn play_sound(&mut self, cue: SoundCue, volume: f32) {
        self.calls.push(FrontendCall::Sound { cue, volume });
    }

    fn spawn_feedback_text(&mut self, text: &str, x: f32, y: f32, color: Rgb, size: TextSize) {
        self.calls.push(FrontendCall::Text {
            text: text.to_string(),
            pos: Vec2::new(x, y),
            color,
            size,
        });
    }

    fn spawn_particles(&mut self, x: f32, y: f32, color: Rgb, count: u32) {
        self.calls.push(FrontendCall::Particles {
            pos: Vec2::new(x, y),
            color,
            count,
        });
    }

    fn elapsed_millis(&self) -> u64 {
        self.clock_ms
    }

    fn poll_input(&mut self) -> KeySet {
        std::mem::take(&mut self.pending_input)
    }

    fn draw_ring(&mut self, center: Vec2, radius: f32, color: Rgb, _width: u32) {
        self.calls.push(FrontendCall::Ring {
            center,
            radius,
            color,
        });
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, _color: Rgb, _size: TextSize) {
        self.calls.push(FrontendCall::Label {
            text: text.to_string(),
            pos: Vec2::new(x, y),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_bits_ignored() {
        let all = [
            KeySet::P1_LEFT,
            KeySet::P1_RIGHT,
            KeySet::P2_LEFT,
            KeySet::P2_RIGHT,
            KeySet::START_SINGLE,
            KeySet::START_TWO,
            KeySet::RESTART,
            KeySet::MENU,
            KeySet::MUTE,
        ]
        .into_iter()
        .fold(KeySet::empty(), |acc, k| acc | k);
        assert_eq!(KeySet::from_bits_truncate(0xFFFF), all);

        let keys = KeySet::from_bits_truncate(0x8000);
        assert_eq!(keys, KeySet::empty());
        assert_eq!(keys.to_tick_input(), TickInput::default());
    }

    #[test]
    fn test_key_mapping() {
        let input = (KeySet::P1_LEFT | KeySet::P2_RIGHT | KeySet::RESTART).to_tick_input();
        assert!(input.p1.left);
        assert!(!input.p1.right);
        assert!(input.p2.right);
        assert!(input.restart);
        assert!(!input.menu);
    }

    #[test]
    fn test_recording_frontend_input_is_one_shot() {
        let mut frontend = RecordingFrontend::new();
        frontend.press(KeySet::MENU);
        assert_eq!(frontend.poll_input(), KeySet::MENU);
        assert_eq!(frontend.poll_input(), KeySet::empty());

        frontend.advance(16);
        frontend.advance(17);
        assert_eq!(frontend.elapsed_millis(), 33);
    }
}
