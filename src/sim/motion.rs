//! Item motion and catcher collision
//!
//! One pass per frame over the registry, in spawn order. Each item is
//! pulled by magnets, drifted by autumn wind, dropped, then tested against
//! the catchers (player 1 first) and the bottom of the playfield.

use glam::Vec2;

use super::catch::resolve_catch;
use super::events::{GameEvent, colors};
use super::items::FallingItem;
use super::state::{GameState, Season};
use crate::audio::SoundCue;
use crate::{approach, rects_overlap};

/// Combined freeze and season speed multiplier at `now`
pub fn speed_multiplier(state: &GameState, now: u64) -> f32 {
    let mut mult = 1.0;
    if state.global.frozen_at(now) {
        mult *= state.tuning.freeze_multiplier;
    }
    if state.season() == Season::Summer {
        mult *= state.tuning.summer_multiplier;
    }
    mult
}

/// Catcher x the item should be pulled toward, if any magnet applies
pub fn magnet_target(state: &GameState, item: &FallingItem) -> Option<f32> {
    if item.kind().ignores_magnet() {
        return None;
    }
    // Earlier players keep ties, so player 1 wins them
    state
        .players
        .iter()
        .filter(|p| p.alive && p.effects.magnetic())
        .map(|p| p.x)
        .fold(None, |best: Option<f32>, x| match best {
            Some(b) if (item.pos.x - b).abs() <= (item.pos.x - x).abs() => Some(b),
            _ => Some(x),
        })
}

/// First alive player whose catcher overlaps the item (player 1 first)
pub fn catching_player(state: &GameState, item: &FallingItem) -> Option<u8> {
    let t = &state.tuning;
    let catcher = Vec2::splat(t.catcher_size);
    let item_box = Vec2::splat(t.item_size);
    state
        .players
        .iter()
        .filter(|p| p.alive)
        .find(|p| rects_overlap(p.catcher_pos(t), catcher, item.pos, item_box))
        .map(|p| p.id)
}

/// Move a single item one frame
fn advance(state: &GameState, item: &mut FallingItem, fall: f32) {
    if let Some(target_x) = magnet_target(state, item) {
        item.pos.x = approach(item.pos.x, target_x, state.tuning.magnet_pull);
    }

    if state.season() == Season::Autumn && !state.boss.active {
        let t = &state.tuning;
        item.pos.x += (item.pos.y * t.autumn_drift_frequency).sin() * t.autumn_drift_amplitude;
    }

    item.pos.y += fall;
}

/// Advance every item, resolving catches and misses
pub fn advance_items(state: &mut GameState, now: u64) {
    let mult = speed_multiplier(state, now);

    let mut i = 0;
    while i < state.items.len() {
        let mut item = state.items[i];
        // Level-ups earlier in the pass apply to the rest of it
        let fall = state.progression.fall_speed * mult;
        advance(state, &mut item, fall);
        state.items[i] = item;

        if let Some(player_id) = catching_player(state, &item) {
            state.items.remove(i);
            if resolve_catch(state, player_id, &item, now) {
                // Tnt emptied the registry; nothing left in this pass
                break;
            }
            continue;
        }

        if item.pos.y > state.tuning.screen_height {
            state.items.remove(i);
            on_missed(state, &item);
            continue;
        }

        i += 1;
    }
}

/// An item fell out of the playfield uncaught
fn on_missed(state: &mut GameState, item: &FallingItem) {
    let kind = item.kind();
    state.emit(GameEvent::Missed { kind });

    if state.is_two_player() || kind.is_hazard() {
        return;
    }

    let text_y = state.tuning.screen_height - 20.0;
    if let Some(player) = state.player_mut(1) {
        player.lose_life();
        log::debug!("Missed {:?}, P1 lives now {}", kind, player.lives);
    }
    state.emit(GameEvent::Sound(SoundCue::LostLife));
    state.emit(GameEvent::text(
        "Miss!",
        Vec2::new(item.pos.x, text_y),
        colors::RED,
    ));
}
