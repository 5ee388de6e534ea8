//! Per-frame simulation tick
//!
//! Runs the whole frame pipeline in order: shake, catcher movement,
//! spawning, item motion and catches, status upkeep, boss.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::effects::expire_effects;
use super::events::GameEvent;
use super::motion::advance_items;
use super::progression::boss_tick;
use super::spawn::maybe_spawn;
use super::state::{GameMode, GameState, Player, Season};
use crate::consts::*;
use crate::tuning::Tuning;

/// Directional keys for one player
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
}

impl Controls {
    /// -1, 0 or +1. Left wins if both are held; confusion swaps the keys.
    pub fn direction(self, confused: bool) -> f32 {
        let (left, right) = if confused {
            (self.right, self.left)
        } else {
            (self.left, self.right)
        };
        if left {
            -1.0
        } else if right {
            1.0
        } else {
            0.0
        }
    }
}

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Arrow keys
    pub p1: Controls,
    /// A / D
    pub p2: Controls,
    /// Start a single-player round (menu)
    pub start_single: bool,
    /// Start a two-player round (menu)
    pub start_two: bool,
    /// Restart the same mode (game over screen)
    pub restart: bool,
    /// Return to the menu (any time)
    pub menu: bool,
}

impl TickInput {
    pub fn controls_for(&self, player_id: u8) -> Controls {
        if player_id == 1 { self.p1 } else { self.p2 }
    }
}

/// Move one catcher a frame according to its controls and the season
pub fn move_catcher(player: &mut Player, controls: Controls, season: Season, tuning: &Tuning) {
    if !player.alive {
        return;
    }
    let dir = controls.direction(player.effects.confused());

    if season == Season::Winter {
        if dir != 0.0 {
            player.velocity += dir * WINTER_ACCEL;
        } else {
            player.velocity *= WINTER_FRICTION;
        }
        player.velocity = player
            .velocity
            .clamp(-WINTER_MAX_VELOCITY, WINTER_MAX_VELOCITY);
        player.x += player.velocity;
    } else {
        player.x += dir * CATCHER_SPEED;
    }

    player.x = player.x.clamp(0.0, tuning.catcher_max_x());
}

fn update_shake(state: &mut GameState) {
    if state.screen_shake > 0 {
        let dx = state.roll_range(-SHAKE_JITTER, SHAKE_JITTER) as f32;
        let dy = state.roll_range(-SHAKE_JITTER, SHAKE_JITTER) as f32;
        state.shake_offset = Vec2::new(dx, dy);
        state.screen_shake -= 1;
    } else {
        state.shake_offset = Vec2::ZERO;
    }
}

/// Mark dead players, expire effects and decide whether the round is over
pub fn update_status(state: &mut GameState, now: u64) {
    let mut died = Vec::new();
    for player in &mut state.players {
        if player.alive && player.lives == 0 {
            player.alive = false;
            died.push(player.id);
        }
    }
    for id in died {
        log::info!("P{id} is out");
        state.emit(GameEvent::PlayerDied { player: id });
    }

    expire_effects(state, now);

    let over = match state.mode {
        GameMode::SinglePlayer => state.players.iter().all(|p| !p.alive),
        GameMode::TwoPlayer => state.players.iter().any(|p| !p.alive),
    };
    if over && !state.game_over {
        state.game_over = true;
        log::info!(
            "Round over at level {} after {} frames",
            state.progression.level,
            state.frame
        );
    }
}

/// Advance the game state by one frame at timestamp `now` (ms)
pub fn tick(state: &mut GameState, input: &TickInput, now: u64) {
    if state.game_over {
        return;
    }

    // Clocks only move forward
    let now = now.max(state.now_ms);
    state.now_ms = now;
    state.frame += 1;

    update_shake(state);

    let season = state.season();
    let tuning = &state.tuning;
    for player in &mut state.players {
        let controls = input.controls_for(player.id);
        move_catcher(player, controls, season, tuning);
    }

    maybe_spawn(now, state);
    advance_items(state, now);
    update_status(state, now);
    boss_tick(state);
}
