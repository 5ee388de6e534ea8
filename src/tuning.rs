//! Data-driven game balance
//!
//! Every gameplay constant that designers may want to tweak lives here.
//! Loaded from JSON; missing fields fall back to the shipped defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Gameplay balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    pub screen_width: f32,
    pub screen_height: f32,
    pub catcher_size: f32,
    pub catcher_y: f32,
    pub item_size: f32,

    // === Players ===
    pub starting_lives: u8,
    pub max_lives: u8,

    // === Difficulty curve ===
    /// Fall speed at level 1 (pixels per frame)
    pub base_fall_speed: f32,
    pub max_fall_speed: f32,
    /// Per-level fall speed multiplier
    pub fall_speed_growth: f32,
    /// Spawn interval at level 1 (ms)
    pub base_spawn_interval_ms: f32,
    pub min_spawn_interval_ms: f32,
    /// Per-level spawn interval multiplier
    pub spawn_interval_decay: f32,
    /// Score needed per level
    pub points_per_level: u32,

    // === Boss ===
    /// Boss shows up on every Nth level
    pub boss_level_period: u32,
    pub boss_base_hp: f32,
    pub boss_hp_per_level: f32,
    pub boss_spawn_interval_ms: u64,
    pub boss_bomb_base_chance: f32,
    pub boss_bomb_chance_step: f32,
    pub boss_bomb_max_chance: f32,

    // === Effect durations (ms) ===
    pub shield_ms: u64,
    pub magnet_ms: u64,
    pub freeze_ms: u64,
    pub confusion_ms: u64,

    // === Environment ===
    pub freeze_multiplier: f32,
    pub summer_multiplier: f32,
    /// Fraction of the remaining distance a magnet pulls per frame
    pub magnet_pull: f32,
    pub autumn_drift_amplitude: f32,
    pub autumn_drift_frequency: f32,

    // === Screen shake (frames) ===
    pub bomb_shake: u32,
    pub tnt_shake: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            catcher_size: CATCHER_SIZE,
            catcher_y: CATCHER_Y,
            item_size: ITEM_SIZE,

            starting_lives: 3,
            max_lives: 5,

            base_fall_speed: 3.0,
            max_fall_speed: 20.0,
            fall_speed_growth: 1.10,
            base_spawn_interval_ms: 1000.0,
            min_spawn_interval_ms: 250.0,
            spawn_interval_decay: 0.95,
            points_per_level: 10,

            boss_level_period: 4,
            boss_base_hp: 30.0,
            boss_hp_per_level: 5.0,
            boss_spawn_interval_ms: 400,
            boss_bomb_base_chance: 0.55,
            boss_bomb_chance_step: 0.05,
            boss_bomb_max_chance: 0.90,

            shield_ms: 4000,
            magnet_ms: 5000,
            freeze_ms: 5000,
            confusion_ms: 3000,

            freeze_multiplier: 0.2,
            summer_multiplier: 1.3,
            magnet_pull: 0.05,
            autumn_drift_amplitude: 2.0,
            autumn_drift_frequency: 0.02,

            bomb_shake: 15,
            tnt_shake: 20,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON (fields not present keep their defaults)
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Tuning>(json).map(Tuning::sanitized)
    }

    /// Parse tuning if provided, falling back to defaults on any error
    pub fn load_or_default(json: Option<&str>) -> Self {
        match json.map(Self::from_json) {
            Some(Ok(tuning)) => {
                log::info!("Loaded custom tuning");
                tuning
            }
            Some(Err(e)) => {
                log::warn!("Invalid tuning ({e}), using defaults");
                Self::default()
            }
            None => Self::default(),
        }
    }

    /// Clamp values that would break the simulation
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        if self.screen_width <= self.catcher_size.max(self.item_size) {
            log::warn!("screen_width {} too small, using default", self.screen_width);
            self.screen_width = defaults.screen_width;
        }
        if self.screen_height <= 0.0 {
            log::warn!("screen_height {} invalid, using default", self.screen_height);
            self.screen_height = defaults.screen_height;
        }
        if self.max_lives == 0 {
            log::warn!("max_lives must be positive, using default");
            self.max_lives = defaults.max_lives;
        }
        if self.starting_lives == 0 || self.starting_lives > self.max_lives {
            log::warn!(
                "starting_lives {} outside 1..={}, clamping",
                self.starting_lives,
                self.max_lives
            );
            self.starting_lives = self.starting_lives.clamp(1, self.max_lives);
        }
        if self.min_spawn_interval_ms > self.base_spawn_interval_ms {
            log::warn!("min_spawn_interval_ms exceeds base interval, clamping");
            self.min_spawn_interval_ms = self.base_spawn_interval_ms;
        }
        if self.base_fall_speed > self.max_fall_speed {
            log::warn!("base_fall_speed exceeds max_fall_speed, clamping");
            self.base_fall_speed = self.max_fall_speed;
        }
        if self.points_per_level == 0 {
            log::warn!("points_per_level must be positive, using default");
            self.points_per_level = defaults.points_per_level;
        }
        if self.boss_level_period == 0 {
            log::warn!("boss_level_period must be positive, using default");
            self.boss_level_period = defaults.boss_level_period;
        }
        self.magnet_pull = self.magnet_pull.clamp(0.0, 1.0);
        self.boss_bomb_max_chance = self.boss_bomb_max_chance.clamp(0.0, 1.0);
        self
    }

    /// Highest x a catcher may occupy
    #[inline]
    pub fn catcher_max_x(&self) -> f32 {
        self.screen_width - self.catcher_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "max_lives": 7, "shield_ms": 1000 }"#).unwrap();
        assert_eq!(tuning.max_lives, 7);
        assert_eq!(tuning.shield_ms, 1000);
        assert_eq!(tuning.magnet_ms, 5000);
        assert_eq!(tuning.screen_width, SCREEN_WIDTH);
    }

    #[test]
    fn test_invalid_json_falls_back() {
        let tuning = Tuning::load_or_default(Some("{ not json"));
        assert_eq!(tuning, Tuning::default());
        assert_eq!(Tuning::load_or_default(None), Tuning::default());
    }

    #[test]
    fn test_sanitize_clamps_lives() {
        let tuning = Tuning::from_json(r#"{ "starting_lives": 9, "max_lives": 4 }"#).unwrap();
        assert_eq!(tuning.starting_lives, 4);

        let tuning = Tuning::from_json(r#"{ "max_lives": 0 }"#).unwrap();
        assert_eq!(tuning.max_lives, 5);
    }

    #[test]
    fn test_sanitize_interval_order() {
        let tuning =
            Tuning::from_json(r#"{ "base_spawn_interval_ms": 200, "min_spawn_interval_ms": 250 }"#)
                .unwrap();
        assert_eq!(tuning.min_spawn_interval_ms, 200.0);
    }
}
