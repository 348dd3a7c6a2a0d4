//! Engine-reported failures
//!
//! Everything here is fatal at startup: the game has no fallback rendering
//! or audio path.

use std::fmt;

#[derive(Debug)]
pub enum EngineError {
    /// No asset at the requested path
    AssetNotFound { path: String },
    /// Asset exists but could not be read
    AssetIo { path: String, source: std::io::Error },
    /// Asset bytes are not the expected format
    InvalidAsset { path: String, reason: &'static str },
    /// Window, surface or GPU setup failed
    Platform(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::AssetNotFound { path } => write!(f, "asset not found: {path}"),
            EngineError::AssetIo { path, source } => {
                write!(f, "failed to read asset {path}: {source}")
            }
            EngineError::InvalidAsset { path, reason } => {
                write!(f, "invalid asset {path}: {reason}")
            }
            EngineError::Platform(msg) => write!(f, "platform error: {msg}"),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::AssetIo { source, .. } => Some(source),
            _ => None,
        }
    }
}
