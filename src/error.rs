//! Error types for frame composition

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for frame operations
pub type Result<T> = std::result::Result<T, FrameError>;

/// Errors that can occur while loading, composing or exporting
#[derive(Error, Debug)]
pub enum FrameError {
    /// Export was requested while no frame is selected
    #[error("Please select a frame image first!")]
    NoFrameSelected,

    /// The photo could not be decoded as an image
    #[error("Could not read {}: {message}", .path.display())]
    Decode { path: PathBuf, message: String },

    /// A frame identifier that is not part of the bundled set
    #[error("Unknown frame '{0}'")]
    UnknownFrame(String),

    /// A bundled frame asset is missing from the binary
    #[error("Frame asset missing: {0}")]
    MissingAsset(String),

    /// Adjustment value outside of its allowed range
    #[error("Invalid adjustment: {0}")]
    InvalidAdjustment(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Settings error: {0}")]
    Settings(#[from] serde_json::Error),

    /// A background worker panicked or was cancelled
    #[error("Background task failed: {0}")]
    Worker(String),
}

impl From<tokio::task::JoinError> for FrameError {
    fn from(err: tokio::task::JoinError) -> Self {
        FrameError::Worker(err.to_string())
    }
}
