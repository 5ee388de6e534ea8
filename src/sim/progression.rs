//! Level progression and the boss encounter
//!
//! The level follows the best score and never goes down within a round.
//! Every `boss_level_period`th level starts a boss whose hit-points drain
//! on their own; the boss rains bombs from wherever it currently is.

use glam::Vec2;

use super::events::{GameEvent, colors};
use super::state::GameState;
use crate::consts::{BOSS_ATTRITION, BOSS_SIZE, BOSS_STEP};
use crate::tuning::Tuning;

/// Level implied by a score
pub fn level_for_score(score: u32, tuning: &Tuning) -> u32 {
    score / tuning.points_per_level + 1
}

/// Fall speed (pixels per frame) at `level`
pub fn fall_speed_for_level(level: u32, tuning: &Tuning) -> f32 {
    let growth = tuning.fall_speed_growth.powi(level.saturating_sub(1) as i32);
    (tuning.base_fall_speed * growth).min(tuning.max_fall_speed)
}

/// Spawn interval (ms) at `level`
pub fn spawn_interval_for_level(level: u32, tuning: &Tuning) -> f32 {
    let decay = tuning.spawn_interval_decay.powi(level.saturating_sub(1) as i32);
    (tuning.base_spawn_interval_ms * decay).max(tuning.min_spawn_interval_ms)
}

/// Whether `level` is a boss level
pub fn is_boss_level(level: u32, tuning: &Tuning) -> bool {
    level % tuning.boss_level_period == 0
}

/// Boss hit-points at `level`
pub fn boss_hp_for_level(level: u32, tuning: &Tuning) -> f32 {
    tuning.boss_base_hp + level as f32 * tuning.boss_hp_per_level
}

/// Raise the level if the best score has earned it.
///
/// Returns true when the level changed.
pub fn level_up(state: &mut GameState) -> bool {
    let new_level = level_for_score(state.max_score(), &state.tuning);
    if new_level <= state.progression.level {
        return false;
    }

    let t = &state.tuning;
    let progression = &mut state.progression;
    progression.level = new_level;
    progression.fall_speed = fall_speed_for_level(new_level, t);
    progression.spawn_interval_ms = spawn_interval_for_level(new_level, t);

    log::info!(
        "Level {} ({:?}): fall speed {:.2}, spawn every {:.0}ms",
        new_level,
        progression.season(),
        progression.fall_speed,
        progression.spawn_interval_ms
    );

    let center_x = t.screen_width / 2.0;
    state.emit(GameEvent::LevelUp { level: new_level });
    state.emit(GameEvent::header(
        format!("LEVEL {new_level}!"),
        Vec2::new(center_x, 200.0),
        colors::WHITE,
    ));

    if is_boss_level(new_level, &state.tuning) {
        let hp = boss_hp_for_level(new_level, &state.tuning);
        state.boss.active = true;
        state.boss.hp = hp;
        log::info!("Boss fight at level {new_level} with {hp} hp");
        state.emit(GameEvent::BossFight { hp });
        state.emit(GameEvent::header(
            "BOSS FIGHT!",
            Vec2::new(center_x, 250.0),
            colors::RED,
        ));
    } else {
        if state.boss.active {
            log::info!("Boss retreats at level {new_level}");
        }
        state.boss.active = false;
    }
    true
}

/// Advance the boss one frame: patrol, drain, and maybe fall.
///
/// Returns true on the frame the boss is defeated.
pub fn boss_tick(state: &mut GameState) -> bool {
    if !state.boss.active {
        return false;
    }

    let right_edge = state.tuning.screen_width - BOSS_SIZE;
    let boss = &mut state.boss;
    boss.x += BOSS_STEP * boss.dir;
    if boss.x > right_edge || boss.x < 0.0 {
        boss.dir = -boss.dir;
    }

    boss.hp -= BOSS_ATTRITION;
    if boss.hp > 0.0 {
        return false;
    }

    boss.active = false;
    boss.hp = 0.0;
    let burst = Vec2::new(boss.x + BOSS_SIZE / 2.0, 50.0);
    let center_x = state.tuning.screen_width / 2.0;
    log::info!("Boss defeated at level {}", state.progression.level);
    state.emit(GameEvent::BossDefeated);
    state.emit(GameEvent::particles(burst, colors::WHITE, 50));
    state.emit(GameEvent::header(
        "BOSS DEFEATED!",
        Vec2::new(center_x, 250.0),
        colors::GOLD,
    ));
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::GameMode;

    fn state() -> GameState {
        GameState::new(GameMode::SinglePlayer, 3, Tuning::default(), 0)
    }

    #[test]
    fn test_curves() {
        let t = Tuning::default();
        assert_eq!(level_for_score(0, &t), 1);
        assert_eq!(level_for_score(9, &t), 1);
        assert_eq!(level_for_score(10, &t), 2);
        assert_eq!(level_for_score(35, &t), 4);

        assert_eq!(fall_speed_for_level(1, &t), 3.0);
        assert!((fall_speed_for_level(2, &t) - 3.3).abs() < 1e-5);
        assert_eq!(fall_speed_for_level(40, &t), 20.0);

        assert_eq!(spawn_interval_for_level(1, &t), 1000.0);
        assert!((spawn_interval_for_level(2, &t) - 950.0).abs() < 1e-3);
        assert_eq!(spawn_interval_for_level(60, &t), 250.0);
    }

    #[test]
    fn test_score_ten_reaches_level_two() {
        let mut s = state();
        s.players[0].score = 10;
        assert!(level_up(&mut s));
        assert_eq!(s.level(), 2);
        assert!((s.progression.fall_speed - 3.0 * 1.10).abs() < 1e-5);
        assert!((s.progression.spawn_interval_ms - 950.0f32.max(250.0)).abs() < 1e-3);
        assert!(!s.boss.active);

        // No further change without more points
        assert!(!level_up(&mut s));
    }

    #[test]
    fn test_level_never_decreases() {
        let mut s = state();
        s.players[0].score = 25;
        level_up(&mut s);
        assert_eq!(s.level(), 3);
        s.players[0].score = 0;
        assert!(!level_up(&mut s));
        assert_eq!(s.level(), 3);
    }

    #[test]
    fn test_two_player_uses_best_score() {
        let mut s = GameState::new(GameMode::TwoPlayer, 3, Tuning::default(), 0);
        s.players[0].score = 4;
        s.players[1].score = 21;
        level_up(&mut s);
        assert_eq!(s.level(), 3);
    }

    #[test]
    fn test_boss_every_fourth_level() {
        let mut s = state();
        s.players[0].score = 30;
        level_up(&mut s);
        assert_eq!(s.level(), 4);
        assert!(s.boss.active);
        assert_eq!(s.boss.hp, 50.0);

        s.players[0].score = 40;
        level_up(&mut s);
        assert_eq!(s.level(), 5);
        assert!(!s.boss.active);

        s.players[0].score = 70;
        level_up(&mut s);
        assert_eq!(s.level(), 8);
        assert!(s.boss.active);
        assert_eq!(s.boss.hp, 70.0);
    }

    #[test]
    fn test_boss_drains_and_falls_once() {
        let mut s = state();
        s.players[0].score = 30;
        level_up(&mut s);
        s.events.clear();

        let mut last_hp = s.boss.hp;
        let mut defeats = 0;
        for _ in 0..1100 {
            if boss_tick(&mut s) {
                defeats += 1;
            } else if s.boss.active {
                assert!(s.boss.hp < last_hp);
                last_hp = s.boss.hp;
            }
        }
        assert_eq!(defeats, 1);
        assert!(!s.boss.active);
        let defeated = s
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::BossDefeated))
            .count();
        assert_eq!(defeated, 1);
    }

    #[test]
    fn test_boss_bounces_between_edges() {
        let mut s = state();
        s.boss.active = true;
        s.boss.hp = 1000.0;
        s.boss.x = 618.0;
        s.boss.dir = 1.0;

        boss_tick(&mut s);
        assert_eq!(s.boss.x, 621.0);
        assert_eq!(s.boss.dir, -1.0);
        boss_tick(&mut s);
        assert_eq!(s.boss.x, 618.0);

        s.boss.x = 1.0;
        boss_tick(&mut s);
        assert_eq!(s.boss.x, -2.0);
        assert_eq!(s.boss.dir, 1.0);
    }
}
