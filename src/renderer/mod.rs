//! Frame description handed to the frontend
//!
//! The core never touches pixels. Each tick produces a `RenderCommands`
//! list (sprite placements, indicator rings, HUD labels and the tick's
//! feedback events) which `dispatch` replays onto a `Frontend`.

pub mod palette;

use glam::Vec2;
use serde::Serialize;

use crate::audio::AudioManager;
use crate::consts::*;
use crate::game::Outcome;
use crate::platform::Frontend;
use crate::settings::Settings;
use crate::sim::{AssetHandle, GameEvent, GameState, Player, Rgb, Season, TextSize, colors};
use crate::tuning::Tuning;

pub const SHIELD_RING_RADIUS: f32 = 40.0;
pub const SHIELD_RING_WIDTH: u32 = 3;
pub const MAGNET_RING_RADIUS: f32 = 45.0;
pub const MAGNET_RING_WIDTH: u32 = 1;

const HEART_SPACING: f32 = 30.0;
const HUD_ROW_Y: f32 = 10.0;
const HEART_ROW_Y: f32 = 40.0;

/// Which screen the frame belongs to
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Screen {
    Menu,
    Playing,
    GameOver(Outcome),
}

/// Art placed at a top-left position
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpriteDraw {
    pub handle: AssetHandle,
    pub pos: Vec2,
    /// Follows the screen shake offset (catchers only)
    pub shakes: bool,
}

/// Outline circle around a catcher
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RingDraw {
    pub center: Vec2,
    pub radius: f32,
    pub color: Rgb,
    pub width: u32,
}

/// Static text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Label {
    pub text: String,
    pub pos: Vec2,
    pub color: Rgb,
    pub size: TextSize,
}

impl Label {
    fn new(text: impl Into<String>, x: f32, y: f32, color: Rgb) -> Self {
        Self {
            text: text.into(),
            pos: Vec2::new(x, y),
            color,
            size: TextSize::Normal,
        }
    }

    fn header(text: impl Into<String>, x: f32, y: f32, color: Rgb) -> Self {
        Self {
            size: TextSize::Header,
            ..Self::new(text, x, y, color)
        }
    }
}

/// Everything needed to present one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderCommands {
    pub screen: Screen,
    pub background: AssetHandle,
    /// Sprites in draw order (back to front)
    pub sprites: Vec<SpriteDraw>,
    pub rings: Vec<RingDraw>,
    pub labels: Vec<Label>,
    /// Feedback produced this tick
    pub events: Vec<GameEvent>,
    /// Jitter applied to shaking sprites and rings
    pub shake_offset: Vec2,
}

impl RenderCommands {
    fn empty(screen: Screen, season: Season) -> Self {
        Self {
            screen,
            background: AssetHandle::Background {
                season: season.index(),
            },
            sprites: Vec::new(),
            rings: Vec::new(),
            labels: Vec::new(),
            events: Vec::new(),
            shake_offset: Vec2::ZERO,
        }
    }

    /// Title screen
    pub fn menu(tuning: &Tuning) -> Self {
        let mut cmds = Self::empty(Screen::Menu, Season::Spring);
        let mid = tuning.screen_width / 2.0;
        cmds.labels.push(Label::header("FRUIT CATCHER", mid - 150.0, 80.0, colors::WHITE));
        cmds.labels.push(Label::new("1 - One Player", mid - 70.0, 215.0, colors::WHITE));
        cmds.labels.push(Label::new("2 - Two Players", mid - 70.0, 285.0, colors::WHITE));
        cmds.labels.push(Label::new("M - Mute", mid - 70.0, 355.0, palette::colors::BUTTON));
        cmds
    }

    /// A frame of the running round
    pub fn from_state(state: &GameState, events: Vec<GameEvent>) -> Self {
        let tuning = &state.tuning;
        let mut cmds = Self::empty(Screen::Playing, state.season());
        cmds.events = events;
        cmds.shake_offset = state.shake_offset;

        if state.boss.active {
            cmds.sprites.push(SpriteDraw {
                handle: AssetHandle::Boss,
                pos: Vec2::new(state.boss.x, BOSS_Y),
                shakes: false,
            });
        }

        for player in state.players.iter().filter(|p| p.alive) {
            cmds.push_catcher(player, tuning);
        }

        cmds.sprites.extend(state.items.iter().map(|item| SpriteDraw {
            handle: item.sprite,
            pos: item.pos,
            shakes: false,
        }));

        cmds.push_hud(state);
        cmds
    }

    /// The frame shown once a round is over
    pub fn game_over(state: &GameState, outcome: Outcome, events: Vec<GameEvent>) -> Self {
        let mut cmds = Self::empty(Screen::GameOver(outcome), state.season());
        cmds.events = events;
        cmds.labels.push(Label::header("GAME OVER", 220.0, 50.0, colors::WHITE));

        match outcome {
            Outcome::SinglePlayer { score, high_score } => {
                cmds.labels
                    .push(Label::new(format!("Score: {score}"), 300.0, 150.0, colors::WHITE));
                cmds.labels.push(Label::new(
                    format!("High Score: {high_score}"),
                    280.0,
                    200.0,
                    colors::WHITE,
                ));
            }
            Outcome::Winner {
                p1_score, p2_score, ..
            }
            | Outcome::Draw { p1_score, p2_score } => {
                let color = match outcome {
                    Outcome::Winner { player, .. } => palette::player_tint(player),
                    _ => palette::colors::DRAW,
                };
                cmds.labels
                    .push(Label::header(outcome.headline(), 180.0, 130.0, color));
                cmds.labels.push(Label::new(
                    format!("Player 1: {p1_score}"),
                    200.0,
                    200.0,
                    colors::P1,
                ));
                cmds.labels.push(Label::new(
                    format!("Player 2: {p2_score}"),
                    400.0,
                    200.0,
                    colors::P2,
                ));
            }
        }

        cmds.labels
            .push(Label::new("R - Restart", 300.0, 315.0, palette::colors::BUTTON));
        cmds.labels
            .push(Label::new("Esc - Menu", 300.0, 385.0, palette::colors::BUTTON));
        cmds
    }

    fn push_catcher(&mut self, player: &Player, tuning: &Tuning) {
        let pos = player.catcher_pos(tuning);
        self.sprites.push(SpriteDraw {
            handle: AssetHandle::Bucket { player: player.id },
            pos,
            shakes: true,
        });

        let center = pos + Vec2::splat(tuning.catcher_size / 2.0);
        if player.effects.shielded() {
            self.rings.push(RingDraw {
                center,
                radius: SHIELD_RING_RADIUS,
                color: palette::shield_ring(player.id),
                width: SHIELD_RING_WIDTH,
            });
        }
        if player.effects.magnetic() {
            self.rings.push(RingDraw {
                center,
                radius: MAGNET_RING_RADIUS,
                color: palette::colors::MAGNET_RING,
                width: MAGNET_RING_WIDTH,
            });
        }
    }

    fn push_hearts(&mut self, lives: u8, x_for: impl Fn(f32) -> f32) {
        for i in 0..lives {
            self.sprites.push(SpriteDraw {
                handle: AssetHandle::Heart,
                pos: Vec2::new(x_for(i as f32 * HEART_SPACING), HEART_ROW_Y),
                shakes: false,
            });
        }
    }

    fn push_hud(&mut self, state: &GameState) {
        let width = state.tuning.screen_width;
        let max_lives = state.tuning.max_lives;

        if state.is_two_player() {
            // Player 2 (left keys) on the left, player 1 on the right
            for player in &state.players {
                let (text, x) = if player.id == 1 {
                    (format!("P1 (Arrows): {}", player.score), width - 210.0)
                } else {
                    (format!("P2 (A/D): {}", player.score), 10.0)
                };
                self.push_shadowed(text, x, palette::player_tint(player.id));

                if !player.alive {
                    let dead_x = if player.id == 1 { width - 80.0 } else { 10.0 };
                    self.labels
                        .push(Label::new("DEAD", dead_x, HEART_ROW_Y, colors::RED));
                } else if player.id == 1 {
                    self.push_hearts(player.display_lives(max_lives), |dx| width - 40.0 - dx);
                } else {
                    self.push_hearts(player.display_lives(max_lives), |dx| 10.0 + dx);
                }
            }
            self.labels.push(Label::new(
                format!("LVL {}", state.level()),
                width / 2.0 - 20.0,
                HUD_ROW_Y,
                palette::colors::HUD_TEXT,
            ));
        } else if let Some(player) = state.player(1) {
            let text = format!("Score: {} | Level: {}", player.score, state.level());
            self.push_shadowed(text, 10.0, palette::colors::HUD_TEXT);
            self.push_hearts(player.display_lives(max_lives), |dx| 10.0 + dx);
        }

        if state.global.frozen() {
            self.sprites.push(SpriteDraw {
                handle: AssetHandle::Freeze,
                pos: Vec2::new(width / 2.0 - 20.0, HEART_ROW_Y),
                shakes: false,
            });
        }
    }

    /// Text with a drop shadow two pixels down-right
    fn push_shadowed(&mut self, text: String, x: f32, color: Rgb) {
        self.labels.push(Label::new(
            text.clone(),
            x + 2.0,
            HUD_ROW_Y + 2.0,
            palette::colors::HUD_SHADOW,
        ));
        self.labels.push(Label::new(text, x, HUD_ROW_Y, color));
    }

    /// Replay this frame with default presentation settings
    pub fn dispatch(&self, frontend: &mut impl Frontend) {
        let settings = Settings::default();
        self.dispatch_with(frontend, &settings, &AudioManager::from_settings(&settings));
    }

    /// Replay this frame onto the frontend
    pub fn dispatch_with(
        &self,
        frontend: &mut impl Frontend,
        settings: &Settings,
        audio: &AudioManager,
    ) {
        let offset = if settings.effective_screen_shake() {
            self.shake_offset
        } else {
            Vec2::ZERO
        };

        frontend.draw_sprite(self.background, 0.0, 0.0);
        for sprite in &self.sprites {
            let pos = if sprite.shakes {
                sprite.pos + offset
            } else {
                sprite.pos
            };
            frontend.draw_sprite(sprite.handle, pos.x, pos.y);
        }
        for ring in &self.rings {
            frontend.draw_ring(ring.center + offset, ring.radius, ring.color, ring.width);
        }

        for event in &self.events {
            match event {
                GameEvent::Text {
                    text,
                    pos,
                    color,
                    size,
                } if settings.floating_text => {
                    frontend.spawn_feedback_text(text, pos.x, pos.y, *color, *size);
                }
                GameEvent::Particles { pos, color, count } => {
                    let count = settings.particle_count(*count);
                    if count > 0 {
                        frontend.spawn_particles(pos.x, pos.y, *color, count);
                    }
                }
                GameEvent::Sound(cue) => {
                    if let Some(volume) = audio.volume_for(*cue) {
                        frontend.play_sound(*cue, volume);
                    }
                }
                _ => {}
            }
        }

        for label in &self.labels {
            frontend.draw_text(&label.text, label.pos.x, label.pos.y, label.color, label.size);
        }
    }
}
