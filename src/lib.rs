//! Pong - two-player arcade Pong on a small immediate-mode engine
//!
//! Core modules:
//! - `sim`: Paddle movement, ball physics and scoring (no rendering or platform dependencies)
//! - `game`: Lifecycle glue and per-frame drawing of the play field
//! - `engine`: Input, assets, sound queue and the init/update/shutdown runner
//! - `renderer`: Immediate-mode draw recording and the WebGPU pipeline
//! - `audio`: Sound effect playback
//! - `platform`: Native window and browser canvas hosts
//! - `settings`: User settings

pub mod audio;
pub mod engine;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use engine::{App, AppDesc, Engine, EngineError};
pub use game::PongApp;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Play field inset from the window edges
    pub const GAME_FIELD_X: f32 = 10.0;
    pub const GAME_FIELD_Y: f32 = 10.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 20.0;
    pub const PADDLE_HEIGHT: f32 = 80.0;
    pub const PADDLE_SIZE: Vec2 = Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT);
    /// Vertical step per frame while a movement key is held
    pub const PADDLE_SPEED: f32 = 10.0;

    /// Ball defaults
    pub const BALL_WIDTH: f32 = 10.0;
    pub const BALL_HEIGHT: f32 = 10.0;
    pub const BALL_SIZE: Vec2 = Vec2::new(BALL_WIDTH, BALL_HEIGHT);
    /// Displacement per frame along each axis
    pub const BALL_SPEED: f32 = 5.0;

    /// Volume for both sound effects
    pub const SFX_VOLUME: f32 = 0.5;

    /// Window defaults
    pub const WINDOW_WIDTH: u32 = 800;
    pub const WINDOW_HEIGHT: u32 = 600;
    pub const WINDOW_TITLE: &str = "Pong";

    /// Asset paths (relative to the asset root)
    pub const FONT_PATH: &str = "assets/bit9x9.ttf";
    pub const FONT_POINT_SIZE: u32 = 48;
    pub const BALL_HIT_AUDIO_PATH: &str = "assets/ball_hit.wav";
    pub const SCORE_AUDIO_PATH: &str = "assets/score.wav";
}
