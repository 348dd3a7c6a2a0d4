//! Platform hosts
//!
//! Each host owns a [`Runner`](crate::engine::Runner), feeds it window size and
//! keyboard events, and after every frame presents the submitted render pass
//! and drains the sound queue.

#[cfg(not(target_arch = "wasm32"))]
pub mod native;
#[cfg(target_arch = "wasm32")]
pub mod web;

use crate::audio::AudioManager;
use crate::engine::{App, ControlFlow, Runner};
use crate::renderer::{RenderPass, RenderState};

/// Draw a finished pass, recovering from a lost or outdated surface
pub fn present(render_state: &mut RenderState, pass: &RenderPass) {
    match render_state.render(pass) {
        Ok(()) => {}
        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
            let (w, h) = render_state.size;
            render_state.resize(w, h);
        }
        Err(wgpu::SurfaceError::OutOfMemory) => {
            log::error!("Out of memory!");
        }
        Err(e) => log::warn!("Render error: {:?}", e),
    }
}

/// Why the page was hidden
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageHide {
    /// Kept in the back-forward cache and may be shown again
    Cached,
    Unloading,
}

impl PageHide {
    /// From `PageTransitionEvent.persisted`
    pub fn from_persisted(persisted: bool) -> Self {
        if persisted {
            PageHide::Cached
        } else {
            PageHide::Unloading
        }
    }
}

/// A cached page keeps running with its keys released; an unloading page
/// shuts the app down.
pub fn page_hidden<A: App>(runner: &mut Runner<A>, hide: PageHide) {
    match hide {
        PageHide::Cached => runner.engine_mut().input.clear(),
        PageHide::Unloading => runner.stop(),
    }
}

/// Run one frame and flush its outputs
pub fn step<A: App>(
    runner: &mut Runner<A>,
    render_state: Option<&mut RenderState>,
    audio: &mut AudioManager,
) -> ControlFlow {
    let flow = runner.frame();

    let engine = runner.engine_mut();
    if let Some(pass) = engine.take_command_buffer() {
        match render_state {
            Some(render_state) => present(render_state, &pass),
            None => log::trace!("No surface; dropping frame"),
        }
    }
    audio.play_queued(engine);

    flow
}
