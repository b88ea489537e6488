//! Error types for tumbleblock.
//!
//! Fallible operations happen at startup: reading the configuration, loading
//! the sprite catalog, decoding the sprite sheet and creating the frame
//! texture. Once the
//! [`TumbleController`](crate::resources::tumble::TumbleController) exists,
//! the only per-frame error is a rejected texture upload, which the host logs.

use std::path::PathBuf;
use thiserror::Error;

/// Tumbleblock error type.
#[derive(Error, Debug)]
pub enum TumbleError {
    /// The sprite catalog has no regions to choose from.
    #[error("sprite catalog is empty")]
    EmptyCatalog,

    /// A catalog region with zero width or height.
    #[error("sprite region {index} has degenerate size {width}x{height}")]
    DegenerateRegion { index: usize, width: u32, height: u32 },

    /// An asset file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The catalog JSON is malformed.
    #[error("failed to parse sprite catalog: {0}")]
    CatalogFormat(#[from] serde_json::Error),

    /// The INI file could not be loaded or written.
    #[error("config file error: {0}")]
    ConfigFile(String),

    /// A configuration value is out of range or unknown.
    #[error("invalid config value `{key}`: {reason}")]
    InvalidConfig { key: &'static str, reason: String },

    /// The sprite sheet image could not be decoded.
    #[error("failed to load sprite sheet {}: {reason}", .path.display())]
    SpriteSheet { path: PathBuf, reason: String },

    /// The window texture for the frame buffer could not be created or filled.
    #[error("frame texture error: {0}")]
    FrameTexture(String),
}

/// Result type alias for tumbleblock operations.
pub type Result<T> = std::result::Result<T, TumbleError>;
