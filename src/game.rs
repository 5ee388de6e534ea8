//! Round lifecycle and the surface the shell drives
//!
//! `Game` owns the current round (if any), the player's presentation
//! settings and the in-memory leaderboard. The shell calls `tick` once per
//! frame with its clock and input, then dispatches the returned frame.

use serde::{Deserialize, Serialize};

use crate::audio::{AudioManager, SoundCue};
use crate::highscores::HighScores;
use crate::platform::{Frontend, KeySet};
use crate::renderer::RenderCommands;
use crate::settings::Settings;
use crate::sim::{self, GameEvent, GameMode, GameState, TickInput};
use crate::tuning::Tuning;

/// Top-level screen state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecyclePhase {
    Menu,
    Playing,
    GameOver,
}

/// How a finished round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    SinglePlayer { score: u32, high_score: u32 },
    Winner { player: u8, p1_score: u32, p2_score: u32 },
    Draw { p1_score: u32, p2_score: u32 },
}

impl Outcome {
    /// Decide the result of a finished round.
    ///
    /// Two-player: a lone survivor wins; otherwise the higher score wins.
    pub fn decide(state: &GameState, high_score: u32) -> Self {
        let score_of = |id| state.player(id).map(|p| p.score).unwrap_or(0);
        let dead = |id| state.player(id).map(|p| !p.alive).unwrap_or(true);

        if !state.is_two_player() {
            let score = score_of(1);
            return Outcome::SinglePlayer {
                score,
                high_score: high_score.max(score),
            };
        }

        let (p1_score, p2_score) = (score_of(1), score_of(2));
        let winner = match (dead(1), dead(2)) {
            (true, false) => Some(2),
            (false, true) => Some(1),
            _ if p1_score > p2_score => Some(1),
            _ if p2_score > p1_score => Some(2),
            _ => None,
        };
        match winner {
            Some(player) => Outcome::Winner {
                player,
                p1_score,
                p2_score,
            },
            None => Outcome::Draw { p1_score, p2_score },
        }
    }

    pub fn headline(&self) -> String {
        match self {
            Outcome::SinglePlayer { .. } => "GAME OVER".to_string(),
            Outcome::Winner { player, .. } => format!("PLAYER {player} WINS!"),
            Outcome::Draw { .. } => "DRAW!".to_string(),
        }
    }
}

/// Scores as reported to the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreSnapshot {
    pub p1: u32,
    /// Only present in two-player rounds
    pub p2: Option<u32>,
    pub level: u32,
}

/// The game as seen by the shell
#[derive(Debug)]
pub struct Game {
    phase: LifecyclePhase,
    mode: GameMode,
    state: Option<GameState>,
    outcome: Option<Outcome>,
    tuning: Tuning,
    settings: Settings,
    audio: AudioManager,
    high_scores: HighScores,
    seed: u64,
    rounds_started: u64,
    /// Latest clock reading from the shell (ms)
    clock_ms: u64,
}

impl Game {
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, Tuning::default(), Settings::default())
    }

    pub fn with_config(seed: u64, tuning: Tuning, settings: Settings) -> Self {
        let audio = AudioManager::from_settings(&settings);
        Self {
            phase: LifecyclePhase::Menu,
            mode: GameMode::SinglePlayer,
            state: None,
            outcome: None,
            tuning: tuning.sanitized(),
            settings,
            audio,
            high_scores: HighScores::new(),
            seed,
            rounds_started: 0,
            clock_ms: 0,
        }
    }

    /// Start a fresh round, discarding any round in progress
    pub fn init_round(&mut self, mode: GameMode) {
        let seed = self.seed.wrapping_add(self.rounds_started);
        self.rounds_started += 1;

        let mut state = GameState::new(mode, seed, self.tuning.clone(), self.clock_ms);
        state.emit(GameEvent::Sound(SoundCue::Music));

        log::info!("Round {} started ({mode:?}, seed {seed})", self.rounds_started);
        self.mode = mode;
        self.state = Some(state);
        self.outcome = None;
        self.phase = LifecyclePhase::Playing;
    }

    /// Play the last mode again
    pub fn restart(&mut self) {
        self.init_round(self.mode);
    }

    /// Abandon the round and show the title screen
    pub fn return_to_menu(&mut self) {
        if self.phase != LifecyclePhase::Menu {
            log::info!("Returning to menu");
        }
        self.state = None;
        self.outcome = None;
        self.phase = LifecyclePhase::Menu;
    }

    /// Advance one frame. `elapsed_ms` is the shell's clock.
    pub fn tick(&mut self, elapsed_ms: u64, input: &TickInput) -> RenderCommands {
        self.clock_ms = self.clock_ms.max(elapsed_ms);

        if input.menu && self.phase != LifecyclePhase::Menu {
            self.return_to_menu();
            return RenderCommands::menu(&self.tuning);
        }

        match self.phase {
            LifecyclePhase::Menu => {
                if input.start_single {
                    self.init_round(GameMode::SinglePlayer);
                } else if input.start_two {
                    self.init_round(GameMode::TwoPlayer);
                } else {
                    return RenderCommands::menu(&self.tuning);
                }
            }
            LifecyclePhase::GameOver => {
                if input.restart {
                    self.restart();
                } else {
                    return self.game_over_frame(Vec::new());
                }
            }
            LifecyclePhase::Playing => {}
        }

        let Some(state) = self.state.as_mut() else {
            self.phase = LifecyclePhase::Menu;
            return RenderCommands::menu(&self.tuning);
        };

        sim::tick(state, input, self.clock_ms);
        let events = state.drain_events();

        if state.game_over {
            self.finish_round();
            return self.game_over_frame(events);
        }
        RenderCommands::from_state(state, events)
    }

    /// Handle raw keys (including the mute toggle) and advance one frame
    pub fn handle_keys(&mut self, elapsed_ms: u64, keys: KeySet) -> RenderCommands {
        if keys.contains(KeySet::MUTE) {
            self.settings.muted = self.audio.toggle_mute();
        }
        self.tick(elapsed_ms, &keys.to_tick_input())
    }

    /// One full shell frame: poll, simulate, present
    pub fn run_frame(&mut self, frontend: &mut impl Frontend) -> LifecyclePhase {
        let keys = frontend.poll_input();
        let frame = self.handle_keys(frontend.elapsed_millis(), keys);
        frame.dispatch_with(frontend, &self.settings, &self.audio);
        self.phase
    }

    fn finish_round(&mut self) {
        let Some(state) = self.state.as_ref() else {
            return;
        };
        if !state.is_two_player() {
            let score = state.player(1).map(|p| p.score).unwrap_or(0);
            self.high_scores.add_score(score, state.level(), self.clock_ms);
        }
        let outcome = Outcome::decide(state, self.high_scores.top_score());
        log::info!("Round over: {}", outcome.headline());
        self.outcome = Some(outcome);
        self.phase = LifecyclePhase::GameOver;
    }

    fn game_over_frame(&self, events: Vec<GameEvent>) -> RenderCommands {
        match (self.state.as_ref(), self.outcome) {
            (Some(state), Some(outcome)) => RenderCommands::game_over(state, outcome, events),
            _ => RenderCommands::menu(&self.tuning),
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == LifecyclePhase::GameOver
    }

    pub fn phase(&self) -> LifecyclePhase {
        self.phase
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Current round, if one is running or just finished
    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Scores for the current (or just finished) round
    pub fn score_snapshot(&self) -> ScoreSnapshot {
        let Some(state) = self.state.as_ref() else {
            return ScoreSnapshot::default();
        };
        let score_of = |id| state.player(id).map(|p| p.score);
        ScoreSnapshot {
            p1: score_of(1).unwrap_or(0),
            p2: if state.is_two_player() {
                score_of(2)
            } else {
                None
            },
            level: state.level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::Screen;

    fn start_single() -> TickInput {
        TickInput {
            start_single: true,
            ..TickInput::default()
        }
    }

    fn start_two() -> TickInput {
        TickInput {
            start_two: true,
            ..TickInput::default()
        }
    }

    #[test]
    fn test_menu_to_playing() {
        let mut game = Game::new(1);
        let frame = game.tick(0, &TickInput::default());
        assert_eq!(frame.screen, Screen::Menu);
        assert_eq!(game.phase(), LifecyclePhase::Menu);
        assert_eq!(game.score_snapshot(), ScoreSnapshot::default());

        let frame = game.tick(16, &start_two());
        assert_eq!(frame.screen, Screen::Playing);
        assert!(frame.events.contains(&GameEvent::Sound(SoundCue::Music)));
        let snap = game.score_snapshot();
        assert_eq!(snap.p2, Some(0));
        assert_eq!(snap.level, 1);
    }

    #[test]
    fn test_fresh_rounds_match_after_one_tick() {
        let mut a = Game::new(5);
        let mut b = Game::new(77);
        a.init_round(GameMode::TwoPlayer);
        a.tick(16, &TickInput::default());
        b.init_round(GameMode::TwoPlayer);
        b.tick(16, &TickInput::default());

        let (sa, sb) = (a.state().unwrap(), b.state().unwrap());
        assert_eq!(sa.players, sb.players);
        assert_eq!(sa.items, sb.items);

        // Restarting gives the same opening frame again
        a.restart();
        a.tick(32, &TickInput::default());
        assert_eq!(a.state().unwrap().players, sb.players);
    }

    #[test]
    fn test_single_player_game_over_records_score() {
        let mut game = Game::new(3);
        game.tick(0, &start_single());
        {
            let state = game.state.as_mut().unwrap();
            state.players[0].score = 17;
            state.players[0].lives = 0;
        }
        let frame = game.tick(16, &TickInput::default());
        assert!(game.is_game_over());
        assert_eq!(
            frame.screen,
            Screen::GameOver(Outcome::SinglePlayer {
                score: 17,
                high_score: 17
            })
        );
        assert_eq!(game.high_scores().top_score(), 17);

        // Game over screen holds until restart
        let frame = game.tick(32, &TickInput::default());
        assert!(matches!(frame.screen, Screen::GameOver(_)));

        let restart = TickInput {
            restart: true,
            ..TickInput::default()
        };
        let frame = game.tick(48, &restart);
        assert_eq!(frame.screen, Screen::Playing);
        assert_eq!(game.score_snapshot().p1, 0);
        assert!(game.state().unwrap().players[0].lives > 0);
    }

    #[test]
    fn test_two_player_outcomes() {
        let mut state = GameState::new(GameMode::TwoPlayer, 1, Tuning::default(), 0);
        state.players[0].score = 20;
        state.players[1].score = 5;
        state.players[0].alive = false;
        assert_eq!(
            Outcome::decide(&state, 0),
            Outcome::Winner {
                player: 2,
                p1_score: 20,
                p2_score: 5
            }
        );

        state.players[1].alive = false;
        assert!(matches!(
            Outcome::decide(&state, 0),
            Outcome::Winner { player: 1, .. }
        ));

        state.players[1].score = 20;
        let outcome = Outcome::decide(&state, 0);
        assert_eq!(
            outcome,
            Outcome::Draw {
                p1_score: 20,
                p2_score: 20
            }
        );
        assert_eq!(outcome.headline(), "DRAW!");
    }

    #[test]
    fn test_two_player_not_recorded_as_high_score() {
        let mut game = Game::new(9);
        game.tick(0, &start_two());
        {
            let state = game.state.as_mut().unwrap();
            state.players[0].score = 40;
            state.players[1].lives = 0;
        }
        game.tick(16, &TickInput::default());
        assert!(game.is_game_over());
        assert!(matches!(
            game.outcome(),
            Some(Outcome::Winner { player: 1, .. })
        ));
        assert!(game.high_scores().entries().is_empty());
    }

    #[test]
    fn test_menu_from_anywhere() {
        let mut game = Game::new(2);
        game.tick(0, &start_single());
        let menu = TickInput {
            menu: true,
            ..TickInput::default()
        };
        let frame = game.tick(16, &menu);
        assert_eq!(frame.screen, Screen::Menu);
        assert!(game.state().is_none());
        assert!(!game.is_game_over());
    }

    #[test]
    fn test_mute_key_toggles_audio() {
        let mut game = Game::new(2);
        game.handle_keys(0, KeySet::MUTE);
        assert!(game.settings().muted);
        game.handle_keys(16, KeySet::MUTE);
        assert!(!game.settings().muted);
    }
}
