//! Game settings and preferences
//!
//! Native builds read `pong.json` from the working directory; the web build
//! keeps the same JSON in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::consts::{WINDOW_HEIGHT, WINDOW_TITLE, WINDOW_WIDTH};
use crate::engine::AppDesc;

/// Smallest window the play field still fits in
pub const MIN_WINDOW_WIDTH: u32 = 200;
pub const MIN_WINDOW_HEIGHT: u32 = 150;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Window ===
    pub window_width: u32,
    pub window_height: u32,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    pub muted: bool,

    /// Directory assets are loaded from (native only)
    pub asset_root: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,

            master_volume: 1.0,
            muted: false,

            asset_root: ".".to_string(),
        }
    }
}

impl Settings {
    /// Settings file name / LocalStorage key
    pub const STORAGE_KEY: &'static str = "pong.json";

    /// Parse settings JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let settings: Self = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    /// Clamp values into their usable ranges
    pub fn sanitized(mut self) -> Self {
        self.master_volume = if self.master_volume.is_finite() {
            self.master_volume.clamp(0.0, 1.0)
        } else {
            1.0
        };
        self.window_width = self.window_width.max(MIN_WINDOW_WIDTH);
        self.window_height = self.window_height.max(MIN_WINDOW_HEIGHT);
        self
    }

    /// Window the host should open
    pub fn app_desc(&self) -> AppDesc {
        AppDesc {
            window_width: self.window_width,
            window_height: self.window_height,
            window_title: WINDOW_TITLE.to_string(),
        }
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Load `pong.json` from the working directory, or defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::load_from(std::path::Path::new(Self::STORAGE_KEY))
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    return settings;
                }
                Err(e) => log::warn!("Ignoring {}: {}", path.display(), e),
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => log::warn!("Failed to read {}: {}", path.display(), e),
        }

        log::info!("Using default settings");
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings = Settings::from_json(r#"{ "muted": true }"#).unwrap();
        assert!(settings.muted);
        assert_eq!(settings.window_width, 800);
        assert_eq!(settings.window_height, 600);
        assert_eq!(settings.asset_root, ".");
    }

    #[test]
    fn test_sanitize() {
        let settings =
            Settings::from_json(r#"{ "master_volume": 4.0, "window_width": 10 }"#).unwrap();
        assert_eq!(settings.master_volume, 1.0);
        assert_eq!(settings.window_width, MIN_WINDOW_WIDTH);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(Settings::from_json("not json").is_err());
    }

    #[test]
    fn test_app_desc() {
        let desc = Settings::default().app_desc();
        assert_eq!(desc, AppDesc::default());
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_load_file() {
        let path = std::env::temp_dir().join(format!("pong-settings-{}.json", std::process::id()));
        let settings = Settings {
            master_volume: 0.25,
            asset_root: "data".to_string(),
            ..Settings::default()
        };
        std::fs::write(&path, serde_json::to_string_pretty(&settings).unwrap()).unwrap();
        assert_eq!(Settings::load_from(&path), settings);
        let _ = std::fs::remove_file(&path);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("pong-settings-does-not-exist.json");
        assert_eq!(Settings::load_from(&path), Settings::default());
    }
}
