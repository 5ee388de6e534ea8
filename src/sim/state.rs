//! Game state and core simulation types
//!
//! Everything the per-frame update touches lives in one `GameState` value.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::effects::{EffectTimers, GlobalEffects};
use super::events::GameEvent;
use super::items::FallingItem;
use crate::tuning::Tuning;

/// Number of players in a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    SinglePlayer,
    TwoPlayer,
}

/// Background theme and physics modifier, cycles every level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Season {
    Spring,
    /// Items fall faster
    Summer,
    /// Items drift sideways
    Autumn,
    /// Catchers slide on ice
    Winter,
}

impl Season {
    pub fn for_level(level: u32) -> Self {
        match level.saturating_sub(1) % 4 {
            0 => Season::Spring,
            1 => Season::Summer,
            2 => Season::Autumn,
            _ => Season::Winter,
        }
    }

    pub fn index(self) -> u8 {
        self as u8
    }
}

/// A player and their catcher
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// 1 or 2
    pub id: u8,
    pub score: u32,
    pub lives: u8,
    /// Left edge of the catcher
    pub x: f32,
    /// Only used by winter physics
    pub velocity: f32,
    pub alive: bool,
    pub effects: EffectTimers,
}

impl Player {
    pub fn new(id: u8, x: f32, lives: u8) -> Self {
        Self {
            id,
            score: 0,
            lives,
            x,
            velocity: 0.0,
            alive: true,
            effects: EffectTimers::default(),
        }
    }

    /// Top-left corner of the catcher box
    pub fn catcher_pos(&self, tuning: &Tuning) -> Vec2 {
        Vec2::new(self.x, tuning.catcher_y)
    }

    /// Horizontal centre of the catcher
    pub fn center_x(&self, tuning: &Tuning) -> f32 {
        self.x + tuning.catcher_size / 2.0
    }

    /// Lives for display, clamped into range
    pub fn display_lives(&self, max_lives: u8) -> u8 {
        self.lives.min(max_lives)
    }

    /// Lose one life (never below zero)
    pub fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
    }

    /// Gain one life if below `max_lives`; returns whether a life was added
    pub fn gain_life(&mut self, max_lives: u8) -> bool {
        if self.lives < max_lives {
            self.lives += 1;
            true
        } else {
            false
        }
    }
}

/// Boss encounter state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Boss {
    pub active: bool,
    pub hp: f32,
    pub x: f32,
    /// +1 moving right, -1 moving left
    pub dir: f32,
}

impl Boss {
    pub fn new(screen_width: f32) -> Self {
        Self {
            active: false,
            hp: 0.0,
            x: screen_width / 2.0,
            dir: 1.0,
        }
    }
}

/// Difficulty state derived from the level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Progression {
    pub level: u32,
    pub base_fall_speed: f32,
    /// Pixels per frame
    pub fall_speed: f32,
    pub base_spawn_interval_ms: f32,
    pub spawn_interval_ms: f32,
}

impl Progression {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            level: 1,
            base_fall_speed: tuning.base_fall_speed,
            fall_speed: tuning.base_fall_speed,
            base_spawn_interval_ms: tuning.base_spawn_interval_ms,
            spawn_interval_ms: tuning.base_spawn_interval_ms,
        }
    }

    pub fn season(&self) -> Season {
        Season::for_level(self.level)
    }
}

/// Complete game state for one round
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Round seed for reproducibility
    pub seed: u64,
    #[serde(skip)]
    rng: Pcg32,
    pub mode: GameMode,
    pub tuning: Tuning,
    /// Timestamp of the latest tick (ms)
    pub now_ms: u64,
    /// Ticks simulated this round
    pub frame: u64,
    pub last_spawn_ms: u64,
    /// Player 1 first; player 2 only in two-player rounds
    pub players: Vec<Player>,
    /// Falling items in spawn order
    pub items: Vec<FallingItem>,
    pub global: GlobalEffects,
    pub boss: Boss,
    pub progression: Progression,
    /// Remaining shake frames
    pub screen_shake: u32,
    /// Catcher draw offset for this frame's shake
    pub shake_offset: Vec2,
    pub game_over: bool,
    /// Events produced by the current tick (drained by the shell)
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a fresh round. `now_ms` anchors the spawn timer.
    pub fn new(mode: GameMode, seed: u64, tuning: Tuning, now_ms: u64) -> Self {
        let width = tuning.screen_width;
        let lives = tuning.starting_lives;

        let mut players = vec![Player::new(1, width / 2.0, lives)];
        if mode == GameMode::TwoPlayer {
            players.push(Player::new(2, width / 2.0 - 100.0, lives));
        }
        let max_x = tuning.catcher_max_x();
        for player in &mut players {
            player.x = player.x.clamp(0.0, max_x);
        }

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            mode,
            now_ms,
            frame: 0,
            last_spawn_ms: now_ms,
            players,
            items: Vec::new(),
            global: GlobalEffects::default(),
            boss: Boss::new(width),
            progression: Progression::new(&tuning),
            screen_shake: 0,
            shake_offset: Vec2::ZERO,
            game_over: false,
            events: Vec::new(),
            next_id: 1,
            tuning,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Uniform draw in [0, 1)
    pub fn roll(&mut self) -> f32 {
        self.rng.random::<f32>()
    }

    /// Uniform integer in `lo..=hi`
    pub fn roll_range(&mut self, lo: i32, hi: i32) -> i32 {
        if hi <= lo {
            return lo;
        }
        self.rng.random_range(lo..=hi)
    }

    pub fn is_two_player(&self) -> bool {
        self.mode == GameMode::TwoPlayer
    }

    pub fn player(&self, id: u8) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_mut(&mut self, id: u8) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    /// The other player in a two-player round
    pub fn opponent_of(&self, id: u8) -> Option<u8> {
        if !self.is_two_player() {
            return None;
        }
        self.players.iter().map(|p| p.id).find(|&other| other != id)
    }

    /// Best score across players (drives the level)
    pub fn max_score(&self) -> u32 {
        self.players.iter().map(|p| p.score).max().unwrap_or(0)
    }

    pub fn level(&self) -> u32 {
        self.progression.level
    }

    pub fn season(&self) -> Season {
        self.progression.season()
    }

    /// Queue a feedback or gameplay event
    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take the events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Start screen shake; the latest hit sets the length
    pub fn shake(&mut self, frames: u32) {
        self.screen_shake = frames;
        self.emit(GameEvent::ScreenShake { frames });
    }
}
