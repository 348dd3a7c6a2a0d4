//! The engine contract the game is written against
//!
//! The game only ever sees an [`Engine`]: window size, keyboard state, asset
//! loading, fire-and-forget sound requests, the immediate-mode draw recorder
//! and a frame submit slot. Platform hosts fill the inputs in and drain the
//! outputs (sounds, submitted frames) after every update.

pub mod assets;
pub mod error;
pub mod input;
pub mod runner;

pub use assets::{
    AssetManager, AssetSource, AudioAsset, AudioHandle, FontAsset, FontHandle, FsSource,
    MemorySource,
};
pub use error::EngineError;
pub use input::{InputState, Key};
pub use runner::{ControlFlow, Runner};

use glam::Vec2;

use crate::consts::{WINDOW_HEIGHT, WINDOW_TITLE, WINDOW_WIDTH};
use crate::renderer::{ImmediateDraw, RenderPass};

/// Window the host should open for the app
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDesc {
    pub window_width: u32,
    pub window_height: u32,
    pub window_title: String,
}

impl Default for AppDesc {
    fn default() -> Self {
        Self {
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,
            window_title: WINDOW_TITLE.to_string(),
        }
    }
}

impl AppDesc {
    pub fn window_size(&self) -> Vec2 {
        Vec2::new(self.window_width as f32, self.window_height as f32)
    }
}

/// Lifecycle callbacks driven by a [`Runner`]
pub trait App {
    /// Called once before the first frame. An error aborts startup.
    fn init(&mut self, engine: &mut Engine) -> Result<(), EngineError>;
    /// Called once per frame
    fn update(&mut self, engine: &mut Engine);
    /// Called exactly once after a successful `init`
    fn shutdown(&mut self, engine: &mut Engine);
}

/// A queued request to play a loaded clip
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoundRequest {
    pub clip: AudioHandle,
    pub volume: f32,
}

pub struct Engine {
    pub input: InputState,
    pub assets: AssetManager,
    /// Immediate-mode draw recorder
    pub gsi: ImmediateDraw,
    window_size: Vec2,
    sounds: Vec<SoundRequest>,
    command_buffer: Option<RenderPass>,
    quit_requested: bool,
}

impl Engine {
    pub fn new(window_size: Vec2, source: impl AssetSource + 'static) -> Self {
        Self {
            input: InputState::new(),
            assets: AssetManager::new(source),
            gsi: ImmediateDraw::new(),
            window_size,
            sounds: Vec::new(),
            command_buffer: None,
            quit_requested: false,
        }
    }

    /// Logical window size
    pub fn window_size(&self) -> Vec2 {
        self.window_size
    }

    pub fn set_window_size(&mut self, size: Vec2) {
        self.window_size = size;
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.input.key_down(key)
    }

    pub fn key_pressed(&self, key: Key) -> bool {
        self.input.key_pressed(key)
    }

    pub fn load_font(&mut self, path: &str, point_size: u32) -> Result<FontHandle, EngineError> {
        let handle = self.assets.load_font(path, point_size)?;
        log::info!("Loaded font {} ({}pt)", path, point_size);
        Ok(handle)
    }

    pub fn load_audio(&mut self, path: &str) -> Result<AudioHandle, EngineError> {
        let handle = self.assets.load_audio(path)?;
        log::info!("Loaded audio {}", path);
        Ok(handle)
    }

    /// Queue a clip for playback (volume 0.0 - 1.0)
    pub fn play_sound(&mut self, clip: AudioHandle, volume: f32) {
        if self.assets.audio(clip).is_none() {
            log::warn!("play_sound on released clip {:?}", clip);
            return;
        }
        self.sounds.push(SoundRequest {
            clip,
            volume: volume.clamp(0.0, 1.0),
        });
    }

    /// Take all sound requests queued since the last drain
    pub fn drain_sounds(&mut self) -> Vec<SoundRequest> {
        std::mem::take(&mut self.sounds)
    }

    /// Hand a finished frame to the graphics backend
    pub fn submit_command_buffer(&mut self, pass: RenderPass) {
        if self.command_buffer.replace(pass).is_some() {
            log::trace!("Dropping unpresented frame");
        }
    }

    pub fn take_command_buffer(&mut self) -> Option<RenderPass> {
        self.command_buffer.take()
    }

    /// Ask the host to stop after the current frame
    pub fn quit(&mut self) {
        if !self.quit_requested {
            log::info!("Quit requested");
        }
        self.quit_requested = true;
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }
}
