//! Spawn policy: what falls next, and when

use glam::Vec2;

use super::items::{AssetHandle, FallingItem, Fruit, ItemKind};
use super::state::GameState;

/// Cumulative probability table for regular play (upper bounds of each band)
const NORMAL_SPAWN_TABLE: [(f32, ItemKind); 5] = [
    (0.02, ItemKind::Magnet),
    (0.04, ItemKind::Freeze),
    (0.06, ItemKind::Tnt),
    (0.08, ItemKind::Poison),
    (0.25, ItemKind::Bomb),
];

/// Interval between spawns right now (boss cadence overrides the level's)
pub fn effective_interval_ms(state: &GameState) -> f32 {
    if state.boss.active {
        state.tuning.boss_spawn_interval_ms as f32
    } else {
        state.progression.spawn_interval_ms
    }
}

/// Chance that a boss drop is a bomb at `level`
pub fn boss_bomb_chance(state: &GameState) -> f32 {
    let t = &state.tuning;
    let encounters = (state.level() / t.boss_level_period) as f32;
    (t.boss_bomb_base_chance + encounters * t.boss_bomb_chance_step).min(t.boss_bomb_max_chance)
}

/// Pick the kind and art for a regular drop from a uniform roll in [0, 1)
pub fn pick_normal(roll: f32, fruit: Fruit) -> (ItemKind, AssetHandle) {
    NORMAL_SPAWN_TABLE
        .iter()
        .find(|(upper, _)| roll < *upper)
        .map(|&(_, kind)| (kind, AssetHandle::for_kind(kind)))
        .unwrap_or((fruit.kind(), AssetHandle::Fruit(fruit)))
}

/// Create a new item if the spawn interval has elapsed.
///
/// The item is appended to the registry and also returned. The spawn timer
/// only resets on a successful spawn.
pub fn maybe_spawn(now: u64, state: &mut GameState) -> Option<FallingItem> {
    let elapsed = now.saturating_sub(state.last_spawn_ms) as f32;
    if elapsed < effective_interval_ms(state) {
        return None;
    }

    let roll = state.roll();
    let (kind, sprite, pos) = if state.boss.active {
        let (kind, sprite) = if roll < boss_bomb_chance(state) {
            (ItemKind::BossBomb, AssetHandle::Bomb)
        } else {
            (ItemKind::Heal, AssetHandle::Fruit(Fruit::Banana))
        };
        (kind, sprite, Vec2::new(state.boss.x, crate::consts::BOSS_DROP_Y))
    } else {
        let fruit_index = state.roll_range(0, Fruit::ALL.len() as i32 - 1) as usize;
        let (kind, sprite) = pick_normal(roll, Fruit::ALL[fruit_index]);
        let max_x = (state.tuning.screen_width - state.tuning.item_size) as i32;
        let x = state.roll_range(0, max_x) as f32;
        (kind, sprite, Vec2::new(x, -state.tuning.item_size))
    };

    let id = state.next_entity_id();
    let item = FallingItem::new(id, kind, pos, sprite);
    state.items.push(item);
    state.last_spawn_ms = now;

    log::debug!("Spawned {:?} #{} at ({:.0}, {:.0})", kind, id, pos.x, pos.y);
    Some(item)
}
