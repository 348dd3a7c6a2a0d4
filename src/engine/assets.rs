//! Asset loading and typed handles
//!
//! Assets are read once through an [`AssetSource`] and held until explicitly
//! unloaded. Handles are plain ids; a released handle simply stops resolving.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use super::EngineError;

/// Where asset bytes come from
pub trait AssetSource {
    fn read(&self, path: &str) -> Result<Vec<u8>, EngineError>;
}

/// Reads assets from disk relative to a root directory
#[derive(Debug, Clone)]
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AssetSource for FsSource {
    fn read(&self, path: &str) -> Result<Vec<u8>, EngineError> {
        let full = self.root.join(path);
        std::fs::read(&full).map_err(|source| {
            let path = full.display().to_string();
            if source.kind() == std::io::ErrorKind::NotFound {
                EngineError::AssetNotFound { path }
            } else {
                EngineError::AssetIo { path, source }
            }
        })
    }
}

/// Serves bytes that were fetched or embedded ahead of time
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: HashMap<String, Vec<u8>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, bytes: Vec<u8>) {
        self.files.insert(path.into(), bytes);
    }

    /// Builder form of [`MemorySource::insert`]
    pub fn with(mut self, path: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.insert(path, bytes);
        self
    }
}

impl AssetSource for MemorySource {
    fn read(&self, path: &str) -> Result<Vec<u8>, EngineError> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| EngineError::AssetNotFound {
                path: path.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontHandle(u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AudioHandle(u32);

/// A loaded font
#[derive(Debug, Clone)]
pub struct FontAsset {
    pub path: String,
    pub point_size: u32,
}

/// A loaded audio clip
#[derive(Debug, Clone)]
pub struct AudioAsset {
    pub path: String,
    /// Encoded RIFF/WAVE bytes, shared with the audio output
    pub data: Arc<[u8]>,
}

pub struct AssetManager {
    source: Box<dyn AssetSource>,
    fonts: HashMap<u32, FontAsset>,
    audio: HashMap<u32, AudioAsset>,
    next_id: u32,
}

impl AssetManager {
    pub fn new(source: impl AssetSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            fonts: HashMap::new(),
            audio: HashMap::new(),
            next_id: 1,
        }
    }

    fn next_asset_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn load_font(&mut self, path: &str, point_size: u32) -> Result<FontHandle, EngineError> {
        let data = self.source.read(path)?;
        if !is_font(&data) {
            return Err(EngineError::InvalidAsset {
                path: path.to_string(),
                reason: "not a TrueType/OpenType font",
            });
        }
        if point_size == 0 {
            return Err(EngineError::InvalidAsset {
                path: path.to_string(),
                reason: "point size must be positive",
            });
        }

        let id = self.next_asset_id();
        self.fonts.insert(
            id,
            FontAsset {
                path: path.to_string(),
                point_size,
            },
        );
        Ok(FontHandle(id))
    }

    pub fn load_audio(&mut self, path: &str) -> Result<AudioHandle, EngineError> {
        let data = self.source.read(path)?;
        if !is_wave(&data) {
            return Err(EngineError::InvalidAsset {
                path: path.to_string(),
                reason: "not a RIFF/WAVE file",
            });
        }

        let id = self.next_asset_id();
        self.audio.insert(
            id,
            AudioAsset {
                path: path.to_string(),
                data: data.into(),
            },
        );
        Ok(AudioHandle(id))
    }

    pub fn font(&self, handle: FontHandle) -> Option<&FontAsset> {
        self.fonts.get(&handle.0)
    }

    pub fn audio(&self, handle: AudioHandle) -> Option<&AudioAsset> {
        self.audio.get(&handle.0)
    }

    /// Release a font. Returns false if the handle was already released.
    pub fn unload_font(&mut self, handle: FontHandle) -> bool {
        self.fonts.remove(&handle.0).is_some()
    }

    /// Release an audio clip. Returns false if the handle was already released.
    pub fn unload_audio(&mut self, handle: AudioHandle) -> bool {
        self.audio.remove(&handle.0).is_some()
    }

    /// Number of assets currently held
    pub fn len(&self) -> usize {
        self.fonts.len() + self.audio.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn is_font(data: &[u8]) -> bool {
    matches!(
        data.get(..4),
        Some([0x00, 0x01, 0x00, 0x00]) | Some(b"OTTO") | Some(b"true") | Some(b"ttcf")
    )
}

fn is_wave(data: &[u8]) -> bool {
    data.len() >= 12 && &data[..4] == b"RIFF" && &data[8..12] == b"WAVE"
}

#[cfg(test)]
mod tests {
    use super::*;

    fn font_bytes() -> Vec<u8> {
        vec![0x00, 0x01, 0x00, 0x00, 0x00, 0x0A]
    }

    fn wav_bytes() -> Vec<u8> {
        b"RIFF\x24\x00\x00\x00WAVEfmt ".to_vec()
    }

    fn manager() -> AssetManager {
        AssetManager::new(
            MemorySource::new()
                .with("font.ttf", font_bytes())
                .with("hit.wav", wav_bytes())
                .with("junk.wav", b"not audio".to_vec()),
        )
    }

    #[test]
    fn test_load_and_lookup() {
        let mut assets = manager();
        let font = assets.load_font("font.ttf", 48).unwrap();
        let clip = assets.load_audio("hit.wav").unwrap();

        let loaded = assets.font(font).unwrap();
        assert_eq!(loaded.path, "font.ttf");
        assert_eq!(loaded.point_size, 48);
        assert_eq!(assets.audio(clip).unwrap().path, "hit.wav");
        assert_eq!(&assets.audio(clip).unwrap().data[..], &wav_bytes()[..]);
        assert_eq!(assets.len(), 2);
    }

    #[test]
    fn test_missing_asset() {
        let mut assets = manager();
        let err = assets.load_audio("score.wav").unwrap_err();
        assert!(matches!(err, EngineError::AssetNotFound { .. }));
    }

    #[test]
    fn test_invalid_asset() {
        let mut assets = manager();
        let err = assets.load_audio("junk.wav").unwrap_err();
        assert!(matches!(err, EngineError::InvalidAsset { .. }));

        // A wav is not a font either
        let err = assets.load_font("hit.wav", 12).unwrap_err();
        assert!(matches!(err, EngineError::InvalidAsset { .. }));
    }

    #[test]
    fn test_unload_releases_handle() {
        let mut assets = manager();
        let font = assets.load_font("font.ttf", 48).unwrap();
        assert!(assets.unload_font(font));
        assert!(assets.font(font).is_none());
        assert!(!assets.unload_font(font));
        assert!(assets.is_empty());
    }

    #[test]
    fn test_handles_are_unique() {
        let mut assets = manager();
        let a = assets.load_audio("hit.wav").unwrap();
        let b = assets.load_audio("hit.wav").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_fs_source_not_found() {
        let source = FsSource::new("/nonexistent-pong-assets");
        let err = source.read("assets/score.wav").unwrap_err();
        assert!(matches!(err, EngineError::AssetNotFound { .. }));
    }
}
