//! Pong entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }

    log::info!("Pong starting...");

    let settings = pong::Settings::load();
    if let Err(e) =
        pong::platform::web::run(pong::PongApp::new(), &settings, &pong::game::ASSET_PATHS).await
    {
        log::error!("Pong failed to start: {}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Pong (native) starting...");

    let settings = pong::Settings::load();
    match pong::platform::native::run(pong::PongApp::new(), &settings) {
        Ok(()) => {
            log::info!("Goodbye");
            std::process::ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Pong exited with error: {}", e);
            std::process::ExitCode::FAILURE
        }
    }
}
