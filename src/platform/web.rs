//! Browser host: `#canvas` element, WebGPU surface, requestAnimationFrame loop

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlCanvasElement, KeyboardEvent, PageTransitionEvent, Response};

use super::PageHide;
use crate::audio::AudioManager;
use crate::engine::{App, ControlFlow, Engine, EngineError, Key, MemorySource, Runner};
use crate::renderer::RenderState;
use crate::settings::Settings;

struct WebHost<A: App> {
    runner: Runner<A>,
    render_state: RenderState,
    audio: AudioManager,
}

fn platform_err(what: &str, e: impl std::fmt::Debug) -> EngineError {
    EngineError::Platform(format!("{what}: {e:?}"))
}

/// Fetch `paths` relative to the page into an in-memory asset source.
///
/// A failed fetch is only logged; the load that needs the file reports it.
pub async fn fetch_assets(paths: &[&str]) -> Result<MemorySource, EngineError> {
    let window = web_sys::window().ok_or_else(|| EngineError::Platform("no window".to_string()))?;
    let mut source = MemorySource::new();

    for path in paths {
        let resp: Response = match JsFuture::from(window.fetch_with_str(path)).await {
            Ok(resp) => resp.unchecked_into(),
            Err(e) => {
                log::warn!("Fetch {} failed: {:?}", path, e);
                continue;
            }
        };
        if !resp.ok() {
            log::warn!("Fetch {} returned {}", path, resp.status());
            continue;
        }
        let buf = resp
            .array_buffer()
            .map_err(|e| platform_err("array_buffer", e))?;
        let buf = JsFuture::from(buf)
            .await
            .map_err(|e| platform_err("array_buffer", e))?;
        source.insert(*path, js_sys::Uint8Array::new(&buf).to_vec());
        log::debug!("Fetched {}", path);
    }

    Ok(source)
}

/// Set up the canvas and run `app` from the browser's frame callback
pub async fn run<A: App + 'static>(
    app: A,
    settings: &Settings,
    preload: &[&str],
) -> Result<(), EngineError> {
    let desc = settings.app_desc();
    let window = web_sys::window().ok_or_else(|| EngineError::Platform("no window".to_string()))?;
    let document = window
        .document()
        .ok_or_else(|| EngineError::Platform("no document".to_string()))?;

    let canvas: HtmlCanvasElement = document
        .get_element_by_id("canvas")
        .ok_or_else(|| EngineError::Platform("no #canvas element".to_string()))?
        .dyn_into()
        .map_err(|e| platform_err("#canvas is not a canvas", e))?;
    canvas.set_width(desc.window_width);
    canvas.set_height(desc.window_height);

    let source = fetch_assets(preload).await?;

    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::BROWSER_WEBGPU,
        ..Default::default()
    });
    let surface = instance
        .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
        .map_err(|e| platform_err("failed to create surface", e))?;
    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        })
        .await
        .map_err(|e| platform_err("no suitable adapter", e))?;

    log::info!("Using adapter: {:?}", adapter.get_info().name);

    let render_state =
        RenderState::new(surface, &adapter, desc.window_width, desc.window_height).await?;

    let engine = Engine::new(desc.window_size(), source);
    let mut runner = Runner::new(app, engine);
    runner.start()?;

    let host = Rc::new(RefCell::new(WebHost {
        runner,
        render_state,
        audio: AudioManager::new(settings),
    }));

    setup_input_handlers(&window, host.clone())?;
    request_animation_frame(host);

    Ok(())
}

fn setup_input_handlers<A: App + 'static>(
    window: &web_sys::Window,
    host: Rc<RefCell<WebHost<A>>>,
) -> Result<(), EngineError> {
    // Keyboard
    {
        let host = host.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if let Some(key) = Key::from_code(&event.code()) {
                // Keep arrow keys from scrolling the page
                event.prevent_default();
                host.borrow_mut().runner.engine_mut().input.press(key);
            }
        });
        window
            .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())
            .map_err(|e| platform_err("keydown listener", e))?;
        closure.forget();
    }

    {
        let host = host.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if let Some(key) = Key::from_code(&event.code()) {
                host.borrow_mut().runner.engine_mut().input.release(key);
            }
        });
        window
            .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())
            .map_err(|e| platform_err("keyup listener", e))?;
        closure.forget();
    }

    // Window blur: key-up events will not arrive
    {
        let host = host.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
            host.borrow_mut().runner.engine_mut().input.clear();
        });
        window
            .add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())
            .map_err(|e| platform_err("blur listener", e))?;
        closure.forget();
    }

    // Page going away, or into the back-forward cache
    {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: PageTransitionEvent| {
            let hide = PageHide::from_persisted(event.persisted());
            log::info!("Page hidden: {:?}", hide);
            super::page_hidden(&mut host.borrow_mut().runner, hide);
        });
        window
            .add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref())
            .map_err(|e| platform_err("pagehide listener", e))?;
        closure.forget();
    }

    Ok(())
}

fn request_animation_frame<A: App + 'static>(host: Rc<RefCell<WebHost<A>>>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let closure = Closure::once(move |_time: f64| {
        game_loop(host);
    });
    let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
    closure.forget();
}

fn game_loop<A: App + 'static>(host: Rc<RefCell<WebHost<A>>>) {
    let flow = {
        let mut h = host.borrow_mut();
        let WebHost {
            runner,
            render_state,
            audio,
        } = &mut *h;
        if !runner.is_running() {
            return;
        }
        super::step(runner, Some(render_state), audio)
    };

    match flow {
        ControlFlow::Continue => request_animation_frame(host),
        ControlFlow::Exit => {
            host.borrow_mut().runner.stop();
            log::info!("Stopped");
        }
    }
}
