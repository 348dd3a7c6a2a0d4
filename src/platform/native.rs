//! Desktop host: winit window, wgpu surface, blocking adapter setup

use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::audio::AudioManager;
use crate::engine::{App, AppDesc, ControlFlow, Engine, EngineError, FsSource, Key, Runner};
use crate::renderer::RenderState;
use crate::settings::Settings;

struct Graphics {
    window: Arc<Window>,
    render_state: RenderState,
}

struct Host<A: App> {
    desc: AppDesc,
    runner: Runner<A>,
    audio: AudioManager,
    graphics: Option<Graphics>,
    error: Option<EngineError>,
}

impl<A: App> Host<A> {
    fn create_graphics(&self, event_loop: &ActiveEventLoop) -> Result<Graphics, EngineError> {
        let attrs = Window::default_attributes()
            .with_title(self.desc.window_title.clone())
            .with_inner_size(LogicalSize::new(
                self.desc.window_width,
                self.desc.window_height,
            ))
            .with_resizable(false);
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(|e| EngineError::Platform(format!("failed to create window: {e}")))?,
        );

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let surface = instance
            .create_surface(window.clone())
            .map_err(|e| EngineError::Platform(format!("failed to create surface: {e}")))?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .map_err(|e| EngineError::Platform(format!("no suitable adapter: {e}")))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let size = window.inner_size();
        let render_state =
            pollster::block_on(RenderState::new(surface, &adapter, size.width, size.height))?;

        Ok(Graphics {
            window,
            render_state,
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: EngineError) {
        log::error!("{}", error);
        self.error = Some(error);
        event_loop.exit();
    }

    fn set_logical_size(&mut self, size: PhysicalSize<u32>, scale_factor: f64) {
        let logical: LogicalSize<f32> = size.to_logical(scale_factor);
        self.runner
            .engine_mut()
            .set_window_size(glam::Vec2::new(logical.width, logical.height));
    }
}

impl<A: App> ApplicationHandler for Host<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.graphics.is_some() {
            return;
        }

        let graphics = match self.create_graphics(event_loop) {
            Ok(graphics) => graphics,
            Err(e) => return self.fail(event_loop, e),
        };
        let size = graphics.window.inner_size();
        log::info!("Window created: {}x{}", size.width, size.height);
        self.set_logical_size(size, graphics.window.scale_factor());
        self.graphics = Some(graphics);

        if let Err(e) = self.runner.start() {
            self.fail(event_loop, e);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(graphics) = &self.graphics {
            graphics.window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(graphics) = self.graphics.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting.");
                self.runner.stop();
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if size.width > 0 && size.height > 0 {
                    graphics.render_state.resize(size.width, size.height);
                    let scale_factor = graphics.window.scale_factor();
                    self.set_logical_size(size, scale_factor);
                    log::debug!("Resized to {}x{}", size.width, size.height);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    if let Some(key) = map_key(code) {
                        let input = &mut self.runner.engine_mut().input;
                        match event.state {
                            ElementState::Pressed => input.press(key),
                            ElementState::Released => input.release(key),
                        }
                    }
                }
            }

            WindowEvent::Focused(false) => {
                // Key-up events are lost while unfocused
                self.runner.engine_mut().input.clear();
            }

            WindowEvent::RedrawRequested => {
                if !self.runner.is_running() {
                    return;
                }
                let flow = super::step(
                    &mut self.runner,
                    Some(&mut graphics.render_state),
                    &mut self.audio,
                );
                if flow == ControlFlow::Exit {
                    self.runner.stop();
                    event_loop.exit();
                }
            }

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.runner.stop();
    }
}

fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::KeyW => Some(Key::W),
        KeyCode::KeyS => Some(Key::S),
        KeyCode::ArrowUp => Some(Key::Up),
        KeyCode::ArrowDown => Some(Key::Down),
        KeyCode::Escape => Some(Key::Escape),
        _ => None,
    }
}

/// Open a window and run `app` until it quits or the window closes
pub fn run<A: App>(app: A, settings: &Settings) -> Result<(), EngineError> {
    let desc = settings.app_desc();
    let engine = Engine::new(desc.window_size(), FsSource::new(&settings.asset_root));

    let mut host = Host {
        desc,
        runner: Runner::new(app, engine),
        audio: AudioManager::new(settings),
        graphics: None,
        error: None,
    };

    let event_loop = EventLoop::new()
        .map_err(|e| EngineError::Platform(format!("failed to create event loop: {e}")))?;
    event_loop.set_control_flow(winit::event_loop::ControlFlow::Poll);
    event_loop
        .run_app(&mut host)
        .map_err(|e| EngineError::Platform(format!("event loop error: {e}")))?;

    host.runner.stop();
    match host.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
