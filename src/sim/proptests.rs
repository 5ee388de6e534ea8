//! Property tests over whole rounds and single catches

use glam::Vec2;
use proptest::prelude::*;

use super::*;
use crate::consts::FRAME_MS;
use crate::platform::KeySet;
use crate::tuning::Tuning;

fn fresh(mode: GameMode, seed: u64) -> GameState {
    GameState::new(mode, seed, Tuning::default(), 0)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Lives stay within 0..=max and the level never drops, whatever is pressed
    #[test]
    fn prop_round_invariants(
        seed in any::<u64>(),
        two_player in any::<bool>(),
        presses in prop::collection::vec(any::<u16>(), 1..40),
    ) {
        let mode = if two_player { GameMode::TwoPlayer } else { GameMode::SinglePlayer };
        let mut state = fresh(mode, seed);
        let max_lives = state.tuning.max_lives;
        let mut level = state.level();
        let mut now = 0;

        for bits in presses {
            let input = KeySet::from_bits_truncate(bits).to_tick_input();
            for _ in 0..30 {
                now += FRAME_MS;
                tick(&mut state, &input, now);
                state.drain_events();

                for player in &state.players {
                    prop_assert!(player.lives <= max_lives);
                    prop_assert!(player.alive || player.lives == 0);
                    prop_assert!(player.x >= 0.0 && player.x <= state.tuning.catcher_max_x());
                }
                prop_assert!(state.level() >= level);
                level = state.level();
            }
        }
    }

    /// The boss appears exactly when a boss level is reached
    #[test]
    fn prop_boss_on_every_fourth_level(scores in prop::collection::vec(0u32..200, 1..30)) {
        let mut state = fresh(GameMode::SinglePlayer, 1);
        let mut level = state.level();

        for score in scores {
            state.players[0].score = score;
            let changed = level_up(&mut state);
            prop_assert!(state.level() >= level);
            prop_assert_eq!(changed, state.level() != level);
            if changed {
                prop_assert_eq!(state.boss.active, state.level() % 4 == 0);
            }
            level = state.level();
        }
    }

    /// A shielded catcher never loses a life to a bomb
    #[test]
    fn prop_shield_blocks_bombs(
        boss_bomb in any::<bool>(),
        lives in 1u8..=5,
        x in 0.0f32..660.0,
        now in 0u64..3999,
    ) {
        let mut state = fresh(GameMode::SinglePlayer, 1);
        state.players[0].lives = lives;
        state.players[0].effects.activate(EffectKind::Shield, 0, 4000);

        let kind = if boss_bomb { ItemKind::BossBomb } else { ItemKind::Bomb };
        let item = FallingItem::with_default_sprite(1, kind, Vec2::new(x, 440.0));
        resolve_catch(&mut state, 1, &item, now);

        prop_assert_eq!(state.players[0].lives, lives);
        prop_assert!(state.players[0].effects.shielded());
    }

    /// Catching Tnt clears the playfield no matter what else is falling
    #[test]
    fn prop_tnt_clears_items(
        kinds in prop::collection::vec(0usize..9, 0..20),
        player_two in any::<bool>(),
    ) {
        const KINDS: [ItemKind; 9] = [
            ItemKind::Normal,
            ItemKind::Heal,
            ItemKind::Shield,
            ItemKind::Magnet,
            ItemKind::Freeze,
            ItemKind::Poison,
            ItemKind::Tnt,
            ItemKind::Bomb,
            ItemKind::BossBomb,
        ];
        let mut state = fresh(GameMode::TwoPlayer, 1);
        for (i, k) in kinds.into_iter().enumerate() {
            let pos = Vec2::new(i as f32 * 30.0, 100.0);
            state.items.push(FallingItem::with_default_sprite(i as u32 + 10, KINDS[k], pos));
        }

        let catcher = if player_two { 2 } else { 1 };
        let tnt = FallingItem::with_default_sprite(1, ItemKind::Tnt, Vec2::new(300.0, 440.0));
        prop_assert!(resolve_catch(&mut state, catcher, &tnt, 0));
        prop_assert!(state.items.is_empty());
    }
}
