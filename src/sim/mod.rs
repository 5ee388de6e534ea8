//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, timestamps supplied by the caller
//! - Seeded RNG only
//! - Stable iteration order (spawn order, player 1 before player 2)
//! - No rendering or platform dependencies

pub mod catch;
pub mod effects;
pub mod events;
pub mod items;
pub mod motion;
pub mod progression;
pub mod spawn;
pub mod state;
pub mod tick;

#[cfg(test)]
mod proptests;

pub use catch::resolve_catch;
pub use effects::{EffectKind, EffectTimers, GlobalEffects, expire_effects};
pub use events::{GameEvent, Rgb, TextSize, colors};
pub use items::{AssetHandle, FallingItem, Fruit, ItemKind};
pub use motion::{advance_items, catching_player, magnet_target, speed_multiplier};
pub use progression::{boss_tick, level_up};
pub use spawn::maybe_spawn;
pub use state::{Boss, GameMode, GameState, Player, Progression, Season};
pub use tick::{Controls, TickInput, move_catcher, tick, update_status};
