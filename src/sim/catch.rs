//! Catch resolution
//!
//! Applies the effect of a caught item to the catcher (and sometimes the
//! opponent or the whole playfield), then queues feedback.

use glam::Vec2;

use super::effects::EffectKind;
use super::events::{GameEvent, colors};
use super::items::{FallingItem, ItemKind};
use super::progression::level_up;
use super::state::GameState;
use crate::audio::SoundCue;

fn player_color(player_id: u8) -> [u8; 3] {
    if player_id == 1 { colors::CYAN } else { colors::MAGENTA }
}

/// Resolve `player_id` catching `item` at time `now`.
///
/// The item must already be out of the registry. Returns true if the
/// catch emptied the registry (Tnt).
pub fn resolve_catch(state: &mut GameState, player_id: u8, item: &FallingItem, now: u64) -> bool {
    let kind = item.kind();
    let pos = item.pos;
    log::debug!("P{} caught {:?} #{}", player_id, kind, item.id);
    state.emit(GameEvent::Caught {
        player: player_id,
        kind,
    });

    if kind.is_bomb() {
        resolve_bomb(state, player_id, pos);
        return false;
    }

    // Everything that isn't a bomb scores, and may level up
    state.emit(GameEvent::Sound(SoundCue::Score));
    if let Some(player) = state.player_mut(player_id) {
        player.score += 1;
    }
    level_up(state);
    state.emit(GameEvent::particles(pos, colors::SPARK_SCORE, 10));

    match kind {
        ItemKind::Heal => {
            let max_lives = state.tuning.max_lives;
            let healed = state
                .player_mut(player_id)
                .is_some_and(|p| p.gain_life(max_lives));
            if healed {
                state.emit(GameEvent::text("+1 Heart", pos, colors::PINK));
            } else {
                state.emit(GameEvent::text("Full HP", pos, colors::WHITE));
            }
        }
        ItemKind::Shield => {
            let duration = state.tuning.shield_ms;
            if let Some(player) = state.player_mut(player_id) {
                player.effects.activate(EffectKind::Shield, now, duration);
            }
            state.emit(GameEvent::text("Shield ON!", pos, player_color(player_id)));
        }
        ItemKind::Magnet => {
            let duration = state.tuning.magnet_ms;
            if let Some(player) = state.player_mut(player_id) {
                player.effects.activate(EffectKind::Magnet, now, duration);
            }
            state.emit(GameEvent::text("Magnet!", pos, colors::PURPLE));
        }
        ItemKind::Freeze => {
            let duration = state.tuning.freeze_ms;
            state.global.freeze(now, duration);
            state.emit(GameEvent::text("Freeze!", pos, colors::ICE));
        }
        ItemKind::Poison => {
            state.emit(GameEvent::text("Confused!", pos, colors::DARK_GREEN));
            let victim = state.opponent_of(player_id).unwrap_or(player_id);
            let two_player = state.is_two_player();
            let duration = state.tuning.confusion_ms;
            let dizzy_y = state.tuning.screen_height - 100.0;
            let victim_x = state.player_mut(victim).map(|target| {
                target.effects.activate(EffectKind::Confusion, now, duration);
                target.x
            });
            log::debug!("P{} confused until {}", victim, now + duration);
            if let (Some(x), true) = (victim_x, two_player) {
                state.emit(GameEvent::text(
                    format!("P{victim} Dizzy!"),
                    Vec2::new(x, dizzy_y),
                    colors::GREEN,
                ));
            }
        }
        ItemKind::Tnt => {
            let (width, height) = (state.tuning.screen_width, state.tuning.screen_height);
            let center = Vec2::new(width / 2.0, height / 2.0);
            state.emit(GameEvent::header("BOOM!", center, colors::ORANGE));
            let frames = state.tuning.tnt_shake;
            state.shake(frames);
            let cleared = state.items.len();
            state.items.clear();
            state.emit(GameEvent::particles(pos, colors::SPARK_TNT, 30));
            log::debug!("TNT cleared {cleared} items");
            return true;
        }
        _ => {
            let color = if player_id == 1 {
                colors::YELLOW
            } else {
                colors::CYAN
            };
            state.emit(GameEvent::text("+1", pos, color));
        }
    }
    false
}

fn resolve_bomb(state: &mut GameState, player_id: u8, pos: Vec2) {
    let shielded = state
        .player(player_id)
        .is_some_and(|p| p.effects.shielded());

    if shielded {
        // Shield stays up until its timer runs out
        state.emit(GameEvent::text("Blocked!", pos, player_color(player_id)));
        state.emit(GameEvent::particles(pos, colors::SPARK_BLOCK, 10));
        state.emit(GameEvent::Sound(SoundCue::Score));
        return;
    }

    state.emit(GameEvent::Sound(SoundCue::Bomb));
    state.emit(GameEvent::text("-1 Heart", pos, colors::RED));
    let frames = state.tuning.bomb_shake;
    state.shake(frames);
    state.emit(GameEvent::particles(pos, colors::SPARK_HIT, 20));
    if let Some(player) = state.player_mut(player_id) {
        player.lose_life();
        log::debug!("P{} hit by bomb, lives now {}", player_id, player.lives);
    }
}
