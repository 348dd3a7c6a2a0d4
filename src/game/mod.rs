//! Pong lifecycle glue
//!
//! [`PongApp`] owns the game data for one session and plugs the simulation
//! and drawing into the engine's init/update/shutdown callbacks.

pub mod draw;

use crate::consts::*;
use crate::engine::{App, AudioHandle, Engine, EngineError, FontHandle, Key};
use crate::sim::{self, GameEvent, GameState, PaddleInput, PaddleSide, TickInput};

pub use draw::draw_game;

/// Every file `init` loads, for hosts that must fetch ahead of time
pub const ASSET_PATHS: [&str; 3] = [FONT_PATH, BALL_HIT_AUDIO_PATH, SCORE_AUDIO_PATH];

/// Assets loaded at init and held for the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameAssets {
    pub font: FontHandle,
    pub ball_hit_audio: AudioHandle,
    pub score_audio: AudioHandle,
}

/// Everything the game keeps between frames
#[derive(Debug, Clone)]
pub struct GameData {
    pub state: GameState,
    pub assets: GameAssets,
}

#[derive(Debug, Default)]
pub struct PongApp {
    data: Option<GameData>,
}

impl PongApp {
    pub fn new() -> Self {
        Self::default()
    }

    /// Game data, present between init and shutdown
    pub fn data(&self) -> Option<&GameData> {
        self.data.as_ref()
    }

    pub fn data_mut(&mut self) -> Option<&mut GameData> {
        self.data.as_mut()
    }
}

impl App for PongApp {
    fn init(&mut self, engine: &mut Engine) -> Result<(), EngineError> {
        let state = GameState::new(engine.window_size());

        let font = engine.load_font(FONT_PATH, FONT_POINT_SIZE)?;
        let ball_hit_audio = engine.load_audio(BALL_HIT_AUDIO_PATH)?;
        let score_audio = engine.load_audio(SCORE_AUDIO_PATH)?;

        self.data = Some(GameData {
            state,
            assets: GameAssets {
                font,
                ball_hit_audio,
                score_audio,
            },
        });
        Ok(())
    }

    fn update(&mut self, engine: &mut Engine) {
        if engine.key_pressed(Key::Escape) {
            engine.quit();
            return;
        }

        let Some(gd) = self.data.as_mut() else {
            return;
        };

        let window = engine.window_size();
        let input = read_input(engine);
        sim::tick(&mut gd.state, &input, window);
        play_events(gd, engine);

        draw_game(gd, engine);
    }

    fn shutdown(&mut self, engine: &mut Engine) {
        let Some(gd) = self.data.take() else {
            return;
        };
        engine.assets.unload_font(gd.assets.font);
        engine.assets.unload_audio(gd.assets.ball_hit_audio);
        engine.assets.unload_audio(gd.assets.score_audio);
        log::info!(
            "Final score {} - {}",
            gd.state.score_of(PaddleSide::Left),
            gd.state.score_of(PaddleSide::Right)
        );
    }
}

/// W/S drive the left paddle, Up/Down the right
fn read_input(engine: &Engine) -> TickInput {
    TickInput {
        paddles: [
            PaddleInput {
                up: engine.key_down(Key::W),
                down: engine.key_down(Key::S),
            },
            PaddleInput {
                up: engine.key_down(Key::Up),
                down: engine.key_down(Key::Down),
            },
        ],
    }
}

fn play_events(gd: &mut GameData, engine: &mut Engine) {
    for event in gd.state.drain_events() {
        match event {
            GameEvent::BallHit => engine.play_sound(gd.assets.ball_hit_audio, SFX_VOLUME),
            GameEvent::Scored(side) => {
                engine.play_sound(gd.assets.score_audio, SFX_VOLUME);
                log::info!(
                    "{:?} scores: {} - {}",
                    side,
                    gd.state.score_of(PaddleSide::Left),
                    gd.state.score_of(PaddleSide::Right)
                );
            }
        }
    }
}
