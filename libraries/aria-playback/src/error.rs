//! Error types for playback

use thiserror::Error;

/// Playback errors
///
/// Queue operations themselves are total functions (empty-queue advance is a
/// no-op, not an error); these errors surface from the audio sink seam.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// The sink could not open or decode the audio resource
    #[error("Decode failure: {0}")]
    Decode(String),

    /// Audio device error
    #[error("Audio sink error: {0}")]
    Sink(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
