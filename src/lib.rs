//! Fruit Catcher - A falling-item catcher arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, motion, catches, progression)
//! - `game`: Round lifecycle (menu, playing, game over) and the shell surface
//! - `renderer`: Per-frame render command list handed to the frontend
//! - `platform`: Frontend abstraction (sprites, sounds, text, input, clock)
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod game;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::{Game, LifecyclePhase, Outcome, ScoreSnapshot};
pub use highscores::HighScores;
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Target simulation rate (one tick per rendered frame)
    pub const FRAMES_PER_SECOND: u32 = 60;
    /// Nominal frame length in milliseconds
    pub const FRAME_MS: u64 = 1000 / FRAMES_PER_SECOND as u64;

    /// Playfield dimensions
    pub const SCREEN_WIDTH: f32 = 700.0;
    pub const SCREEN_HEIGHT: f32 = 500.0;

    /// Catcher (bucket) box, fixed row near the bottom
    pub const CATCHER_SIZE: f32 = 50.0;
    pub const CATCHER_Y: f32 = 450.0;
    /// Horizontal step per frame outside winter
    pub const CATCHER_SPEED: f32 = 8.0;

    /// Winter "ice" physics
    pub const WINTER_ACCEL: f32 = 0.5;
    pub const WINTER_FRICTION: f32 = 0.9;
    pub const WINTER_MAX_VELOCITY: f32 = 10.0;

    /// Falling item box
    pub const ITEM_SIZE: f32 = 40.0;

    /// Boss sprite and movement
    pub const BOSS_SIZE: f32 = 80.0;
    pub const BOSS_Y: f32 = 10.0;
    pub const BOSS_STEP: f32 = 3.0;
    /// Hit-points drained every frame while the boss is up
    pub const BOSS_ATTRITION: f32 = 0.05;
    /// Row boss bombs are released from
    pub const BOSS_DROP_Y: f32 = 50.0;

    /// Screen shake jitter (pixels, each axis)
    pub const SHAKE_JITTER: i32 = 5;
}

/// Axis-aligned rectangle overlap test (strict: touching edges do not count)
#[inline]
pub fn rects_overlap(a_pos: Vec2, a_size: Vec2, b_pos: Vec2, b_size: Vec2) -> bool {
    a_pos.x < b_pos.x + b_size.x
        && b_pos.x < a_pos.x + a_size.x
        && a_pos.y < b_pos.y + b_size.y
        && b_pos.y < a_pos.y + a_size.y
}

/// Move `from` a fraction of the way toward `to`
#[inline]
pub fn approach(from: f32, to: f32, fraction: f32) -> f32 {
    from + (to - from) * fraction
}
